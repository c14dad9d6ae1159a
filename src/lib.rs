pub mod assets;
pub mod color;

pub use gs_format;
