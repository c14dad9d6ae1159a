pub mod error;
pub mod mesh;

pub use error::{FormatError, Result};
