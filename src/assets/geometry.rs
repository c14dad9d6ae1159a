use std::{collections::HashMap, fmt};

use gfx_maths::Vec3;
use gs_format::mesh::ModelData;

use super::{error::Result, mtl::Material, weld};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TexCoord {
    pub u: f32,
    pub v: f32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Normal {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<[f32; 3]> for Position {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 2]> for TexCoord {
    fn from([u, v]: [f32; 2]) -> Self {
        Self { u, v }
    }
}

impl From<[f32; 3]> for Normal {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Zero-based, file-global attribute indices of one corner of a face.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceVertexRef {
    pub position: usize,
    pub tex_coord: Option<usize>,
    pub normal: Option<usize>,
}

/// Writes the reference back in its one-based on-disk form (`1`, `1/2`, `1//3`, `1/2/3`).
impl fmt::Display for FaceVertexRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position + 1)?;
        match (self.tex_coord, self.normal) {
            (None, None) => Ok(()),
            (Some(uv), None) => write!(f, "/{}", uv + 1),
            (uv, Some(normal)) => {
                f.write_str("/")?;
                if let Some(uv) = uv {
                    write!(f, "{}", uv + 1)?;
                }
                write!(f, "/{}", normal + 1)
            }
        }
    }
}

/// Number of attributes declared in the file before an object.
///
/// Face indices in `.obj` files count from the start of the file, while every
/// [`SubObject`] stores its own attribute arrays.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AttributeOffsets {
    pub positions: usize,
    pub tex_coords: usize,
    pub normals: usize,
}

/// A named part of a model (`o` record) with its own attribute arrays.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SubObject {
    pub name: Option<String>,
    /// Material that was active when the first face of the object was read
    pub material: Option<String>,
    pub offsets: AttributeOffsets,
    pub positions: Vec<Position>,
    pub tex_coords: Vec<TexCoord>,
    pub normals: Vec<Normal>,
    /// Faces after fan triangulation, indices as written in the file
    pub triangles: Vec<[FaceVertexRef; 3]>,
}

impl SubObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Offsets of the object that follows this one in the file.
    pub fn next_offsets(&self) -> AttributeOffsets {
        AttributeOffsets {
            positions: self.offsets.positions + self.positions.len(),
            tex_coords: self.offsets.tex_coords + self.tex_coords.len(),
            normals: self.offsets.normals + self.normals.len(),
        }
    }

    /// `true` if nothing has been declared for this object yet
    pub fn is_untouched(&self) -> bool {
        self.name.is_none()
            && self.positions.is_empty()
            && self.tex_coords.is_empty()
            && self.normals.is_empty()
            && self.triangles.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Mean of all positions, `None` for an object without positions.
    pub fn center_of_mass(&self) -> Option<Vec3> {
        if self.positions.is_empty() {
            return None;
        }

        let mut sum = Vec3::zero();
        for p in &self.positions {
            sum += Vec3::new(p.x, p.y, p.z);
        }

        let len = self.positions.len() as f32;
        Some(Vec3::new(sum.x / len, sum.y / len, sum.z / len))
    }

    /// Translates the positions so that their mean lies in the origin.
    pub fn center(&mut self) {
        if let Some(center) = self.center_of_mass() {
            for p in &mut self.positions {
                p.x -= center.x;
                p.y -= center.y;
                p.z -= center.z;
            }
        }
    }

    pub fn weld(&self) -> Result<gs_format::mesh::WeldedMesh> {
        weld::weld(self)
    }
}

/// Everything read from one `.obj` file.
#[derive(Debug, Default)]
pub struct Model {
    pub objects: Vec<SubObject>,
    pub materials: HashMap<String, Material>,
}

impl Model {
    pub fn object(&self, name: &str) -> Option<&SubObject> {
        self.objects
            .iter()
            .find(|object| object.name.as_deref() == Some(name))
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Looks up the material of `object`, falling back to `fallback` if the object
    /// has none or names one that is not part of the loaded libraries.
    pub fn resolve_material<'a>(&'a self, object: &SubObject, fallback: &'a Material) -> &'a Material {
        match object.material.as_deref() {
            None => fallback,
            Some(name) => self.material(name).unwrap_or_else(|| {
                log::warn!(
                    "Material `{}` of object {:?} is not defined, using `{}`",
                    name,
                    object.name,
                    fallback.name
                );
                fallback
            }),
        }
    }

    /// Centers every object around its own mean position.
    pub fn center(&mut self) {
        for object in &mut self.objects {
            object.center();
        }
    }

    pub fn weld(&self) -> Result<ModelData> {
        let meshes = self
            .objects
            .iter()
            .map(weld::weld)
            .collect::<Result<_>>()?;
        Ok(ModelData { meshes })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::color::Color;

    fn face_ref(position: usize, tex_coord: Option<usize>, normal: Option<usize>) -> FaceVertexRef {
        FaceVertexRef {
            position,
            tex_coord,
            normal,
        }
    }

    #[test]
    fn test_display_face_ref() {
        assert_eq!(face_ref(0, None, None).to_string(), "1");
        assert_eq!(face_ref(0, Some(1), None).to_string(), "1/2");
        assert_eq!(face_ref(0, Some(1), Some(2)).to_string(), "1/2/3");
        assert_eq!(face_ref(4, None, Some(1)).to_string(), "5//2");
    }

    #[test]
    fn test_center() {
        let mut object = SubObject {
            positions: vec![
                [1.0, 2.0, 3.0].into(),
                [3.0, 2.0, -1.0].into(),
                [2.0, 5.0, 1.0].into(),
            ],
            ..SubObject::new("cube")
        };

        object.center();

        let mean = object.center_of_mass().unwrap();
        assert!(mean.x.abs() < 1e-6);
        assert!(mean.y.abs() < 1e-6);
        assert!(mean.z.abs() < 1e-6);
        assert_eq!(object.positions[0], Position::from([-1.0, -1.0, 2.0]));
    }

    #[test]
    fn test_center_empty() {
        let mut object = SubObject::new("empty");
        object.center();
        assert!(object.center_of_mass().is_none());
        assert!(object.positions.is_empty());
    }

    #[test]
    fn test_resolve_material() {
        let mut model = Model::default();
        let red = Material {
            diffuse: Color::RED,
            ..Material::named("red")
        };
        model.materials.insert("red".into(), red);
        let fallback = Material::default();

        let mut object = SubObject::new("a");
        assert_eq!(model.resolve_material(&object, &fallback).name, "default");

        object.material = Some("red".into());
        assert_eq!(model.resolve_material(&object, &fallback).diffuse, Color::RED);

        object.material = Some("missing".into());
        assert_eq!(model.resolve_material(&object, &fallback).name, "default");
    }
}
