//! Turns the face soup of a [`SubObject`] into an indexed triangle list.
//!
//! Every distinct combination of position, texture coordinate and normal becomes
//! one output vertex. Vertices are compared by their exact float values, so
//! attributes that only differ by rounding noise are not merged.

use std::collections::HashMap;

use gs_format::mesh::{Vertex, WeldedMesh};

use super::{
    error::{Attribute, Error, Result},
    geometry::{FaceVertexRef, SubObject},
};

/// Hashable identity of a welded vertex.
///
/// `-0.0` is folded into `0.0` so that the key agrees with float equality for zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey([u32; Vertex::STRIDE]);

impl From<&Vertex> for VertexKey {
    fn from(vertex: &Vertex) -> Self {
        let mut bits = [0; Vertex::STRIDE];
        for (bit, value) in bits.iter_mut().zip(vertex.to_array()) {
            *bit = (value + 0.0).to_bits();
        }
        VertexKey(bits)
    }
}

#[derive(Debug, Default)]
struct Welder {
    vertices: Vec<Vertex>,
    lookup: HashMap<VertexKey, u32>,
}

impl Welder {
    /// Returns the index of `vertex`, appending it if it was not seen before.
    fn insert(&mut self, vertex: Vertex) -> Result<u32> {
        let key = VertexKey::from(&vertex);
        if let Some(&index) = self.lookup.get(&key) {
            return Ok(index);
        }

        let index = u32::try_from(self.vertices.len()).map_err(|_| Error::TooManyVertices)?;
        self.vertices.push(vertex);
        self.lookup.insert(key, index);
        Ok(index)
    }
}

/// Looks up the file-global `index` in the attributes of one object.
fn attribute_at<'a, T>(
    attribute: Attribute,
    values: &'a [T],
    offset: usize,
    index: usize,
) -> Result<&'a T> {
    index
        .checked_sub(offset)
        .and_then(|local| values.get(local))
        .ok_or(Error::ReferenceIndex {
            attribute,
            index: index + 1,
            first: offset + 1,
            len: values.len(),
        })
}

/// Resolves the attributes a face corner points to.
fn resolve(object: &SubObject, r: &FaceVertexRef) -> Result<Vertex> {
    let offsets = &object.offsets;
    let position = attribute_at(
        Attribute::Position,
        &object.positions,
        offsets.positions,
        r.position,
    )?;

    // missing or dangling texture coordinates fall back to (0, 0)
    let uv = r
        .tex_coord
        .and_then(|i| attribute_at(Attribute::TexCoord, &object.tex_coords, offsets.tex_coords, i).ok())
        .map(|t| [t.u, t.v])
        .unwrap_or_default();

    let normal = match r.normal {
        Some(i) => {
            let n = attribute_at(Attribute::Normal, &object.normals, offsets.normals, i)?;
            [n.x, n.y, n.z]
        }
        None => [0.0; 3],
    };

    Ok(Vertex {
        position: [position.x, position.y, position.z],
        uv,
        normal,
    })
}

/// Builds the deduplicated vertex and index buffers of `object`.
pub fn weld(object: &SubObject) -> Result<WeldedMesh> {
    let mut welder = Welder::default();
    let mut indices = Vec::with_capacity(object.triangles.len() * 3);

    for triangle in &object.triangles {
        for r in triangle {
            indices.push(welder.insert(resolve(object, r)?)?);
        }
    }

    log::debug!(
        "Welded {:?}: {} face vertices into {} vertices",
        object.name,
        indices.len(),
        welder.vertices.len()
    );

    Ok(WeldedMesh {
        name: object.name.clone(),
        material: object.material.clone(),
        vertices: welder.vertices,
        indices,
    })
}
