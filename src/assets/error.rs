use std::{fmt, io, num, path::Path, path::PathBuf};

use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}:{line}: {kind} (in \"{content}\")", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
        #[source]
        kind: ParseErrorKind,
    },
    /// `index` and `first` count from 1 like the indices in the file
    #[error("Face references {attribute} {index}, but the object declares {len} starting at {first}")]
    ReferenceIndex {
        attribute: Attribute,
        index: usize,
        first: usize,
        len: usize,
    },
    #[error("Could not read `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not decode texture `{}`", .path.display())]
    TextureDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Invalid import meta `{}`", .path.display())]
    Meta {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Mesh has more vertices than a 32 bit index buffer can address")]
    TooManyVertices,
}

impl Error {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseErrorKind {
    #[error("Failed to parse float")]
    ParseFloat(#[from] num::ParseFloatError),
    #[error("Failed to parse integer")]
    ParseInt(#[from] num::ParseIntError),
    #[error("`{directive}` expects {expected} fields, found {found}")]
    FieldCount {
        directive: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("`{0}` is missing its argument")]
    MissingArgument(&'static str),
    #[error("Invalid number of indices for face vertex `{0}`")]
    FaceVertexIndices(String),
    #[error("Face vertex index {0} is not supported, indices start at 1")]
    UnsupportedIndex(i64),
    #[error("Face needs at least 3 vertices, found {0}")]
    FaceTooSmall(usize),
    #[error("Failed to read line")]
    Read(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Position => "position",
            Attribute::TexCoord => "texture coordinate",
            Attribute::Normal => "normal",
        })
    }
}

/// Position of a line inside an asset file, used to attach context to parse errors.
pub(crate) struct Line<'a> {
    pub(crate) path: &'a Path,
    pub(crate) number: usize,
    pub(crate) content: &'a str,
}

impl Line<'_> {
    pub(crate) fn error(&self, kind: ParseErrorKind) -> Error {
        Error::Parse {
            path: self.path.to_path_buf(),
            line: self.number,
            content: self.content.to_owned(),
            kind,
        }
    }
}

pub(crate) trait AtLine<T> {
    fn at(self, line: &Line<'_>) -> Result<T>;
}

impl<T, E: Into<ParseErrorKind>> AtLine<T> for ::std::result::Result<T, E> {
    fn at(self, line: &Line<'_>) -> Result<T> {
        self.map_err(|err| line.error(err.into()))
    }
}
