//! Loading of Wavefront `.obj` models and their `.mtl` material libraries.

pub mod error;
pub mod geometry;
pub mod meta;
pub mod mtl;
pub mod obj;
mod reader;
pub mod texture;
pub mod weld;

use std::path::Path;

use gs_format::mesh::ModelData;

pub use error::{Error, ParseErrorKind, Result};
pub use geometry::{AttributeOffsets, FaceVertexRef, Model, Normal, Position, SubObject, TexCoord};
pub use meta::ImportMeta;
pub use mtl::Material;
pub use texture::Texture;

/// Parses the model at `path` and centers it if the meta asks for it.
pub fn load_model(path: &Path, meta: &ImportMeta) -> Result<Model> {
    let mut model = obj::parse(path, meta)?;
    if meta.center {
        model.center();
    }
    Ok(model)
}

/// Parses and welds the model at `path` into GPU ready buffers.
pub fn import(path: &Path, meta: &ImportMeta) -> Result<ModelData> {
    load_model(path, meta)?.weld()
}
