use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, FormatError>;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Could not (de)serialize mesh data: {0}")]
    Serialization(#[from] Box<bincode::ErrorKind>),
    #[error("Could not read mesh data: {0}")]
    Io(#[from] std::io::Error),
    /// A decoded mesh references a vertex it does not contain.
    #[error("Mesh `{mesh}` references vertex {index}, but only has {vertex_count} vertices")]
    IndexOutOfBounds {
        mesh: String,
        index: u32,
        vertex_count: usize,
    },
}
