use crate::error::{FormatError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single welded vertex as it is laid out in the vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex {
    /// Number of floats per vertex in the interleaved buffer
    pub const STRIDE: usize = 8;

    pub fn to_array(&self) -> [f32; Self::STRIDE] {
        let [x, y, z] = self.position;
        let [u, v] = self.uv;
        let [nx, ny, nz] = self.normal;
        [x, y, z, u, v, nx, ny, nz]
    }
}

/// Indexed triangle list built from one object of a model.
///
/// Vertices are stored in the order they were first referenced by a face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeldedMesh {
    pub name: Option<String>,
    /// Name of the material the mesh should be rendered with
    pub material: Option<String>,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl WeldedMesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flattens the vertices into `[x, y, z, u, v, nx, ny, nz]` records.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * Vertex::STRIDE);
        for vertex in &self.vertices {
            data.extend_from_slice(&vertex.to_array());
        }
        data
    }

    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        match self
            .indices
            .iter()
            .find(|&&index| index as usize >= vertex_count)
        {
            Some(&index) => Err(FormatError::IndexOutOfBounds {
                mesh: self.name.clone().unwrap_or_default(),
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelData {
    pub meshes: Vec<WeldedMesh>,
}

impl ModelData {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let data = bincode::deserialize::<ModelData>(&bytes)?;
        for mesh in &data.meshes {
            mesh.validate()?;
        }
        Ok(data)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        ModelData::from_bytes(data)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self)?)
    }
}
