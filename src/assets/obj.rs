//! Parses Wavefront `.obj` files (https://en.wikipedia.org/wiki/Wavefront_.obj_file).
//!
//! The parser is forgiving: unknown directives are skipped, but malformed
//! geometry aborts the whole file.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::{
    error::{AtLine, ParseErrorKind, Result},
    geometry::{FaceVertexRef, Model, Normal, Position, SubObject, TexCoord},
    meta::ImportMeta,
    mtl,
    reader::{for_each_directive, parse_floats, required},
};

type ParseResult<T> = std::result::Result<T, ParseErrorKind>;

#[derive(Debug, Default)]
struct ObjModelBuilder {
    model: Model,
    current: SubObject,
    active_material: Option<String>,
    dir: PathBuf,
    meta: ImportMeta,
}

impl ObjModelBuilder {
    fn new(dir: &Path, meta: ImportMeta) -> Self {
        Self {
            dir: dir.to_path_buf(),
            meta,
            ..Default::default()
        }
    }

    fn start_object(&mut self, name: &str) {
        if self.current.is_untouched() {
            self.current.name = Some(name.into());
            return;
        }

        let next = SubObject {
            offsets: self.current.next_offsets(),
            ..SubObject::new(name)
        };
        let finished = std::mem::replace(&mut self.current, next);
        self.model.objects.push(finished);
    }

    fn push_position(&mut self, position: [f32; 3]) {
        self.current.positions.push(Position::from(self.meta.flip(position)));
    }

    fn push_tex_coord(&mut self, tex_coord: [f32; 2]) {
        self.current.tex_coords.push(TexCoord::from(tex_coord));
    }

    fn push_normal(&mut self, normal: [f32; 3]) {
        self.current.normals.push(Normal::from(self.meta.flip(normal)));
    }

    fn use_material(&mut self, name: &str) {
        self.active_material = Some(name.into());
    }

    fn load_library(&mut self, file_name: &str) -> Result<()> {
        let path = self.dir.join(file_name);
        let materials = mtl::parse(&path, &self.meta)?;
        self.model.materials.extend(materials);
        Ok(())
    }

    /// Triangulates the face into the current object.
    ///
    /// References are resolved against the object's arrays when welding.
    fn push_face(&mut self, face: Vec<FaceVertexRef>) -> ParseResult<()> {
        if face.len() < 3 {
            return Err(ParseErrorKind::FaceTooSmall(face.len()));
        }

        if self.current.triangles.is_empty() {
            self.current.material = self.active_material.clone();
        } else if self.current.material != self.active_material {
            warn!(
                "Object {:?} switches material to {:?}, only one material per object is supported",
                self.current.name, self.active_material
            );
        }

        // triangulate polygons as a fan around the first vertex (only correct for convex faces)
        for i in 1..face.len() - 1 {
            self.current.triangles.push([face[0], face[i], face[i + 1]]);
        }

        Ok(())
    }

    fn build(mut self) -> Model {
        if !self.current.is_untouched() {
            self.model.objects.push(self.current);
        }
        self.model
    }
}

/// Reads the `.obj` file at `path` including all referenced material libraries.
pub fn parse(path: &Path, meta: &ImportMeta) -> Result<Model> {
    info!("Loading mesh: {}", path.display());
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut builder = ObjModelBuilder::new(dir, *meta);

    for_each_directive(path, |line, token, value| {
        if let Some(library) = parse_token(token, value, &mut builder).at(line)? {
            builder.load_library(library)?;
        }
        Ok(())
    })?;

    let model = builder.build();
    debug!(
        "Loaded {} objects and {} materials from {}",
        model.objects.len(),
        model.materials.len(),
        path.display()
    );
    Ok(model)
}

/// Applies one directive to the builder.
///
/// Material libraries are returned instead of loaded, so that their errors are
/// reported for the library file and not for the current line.
fn parse_token<'a>(
    token: &str,
    value: &'a str,
    builder: &mut ObjModelBuilder,
) -> ParseResult<Option<&'a str>> {
    match token {
        // name
        "o" => builder.start_object(required("o", value)?),
        // vertex
        "v" => builder.push_position(parse_floats::<3>("v", value)?),
        // texture coordinates
        "vt" => builder.push_tex_coord(parse_floats::<2>("vt", value)?),
        // vertex normals
        "vn" => builder.push_normal(parse_floats::<3>("vn", value)?),
        "f" => builder.push_face(parse_face(value)?)?,
        // material
        "mtllib" => return Ok(Some(required("mtllib", value)?)),
        "usemtl" => builder.use_material(required("usemtl", value)?),
        // groups and smoothing groups do not change the produced model
        "g" | "s" => debug!("Ignoring `{} {}`", token, value),
        _ => debug!("Skipping unsupported directive `{}`", token),
    };

    Ok(None)
}

// parses face vertex references separated by whitespace
fn parse_face(value: &str) -> ParseResult<Vec<FaceVertexRef>> {
    value.split_whitespace().map(parse_face_vertex).collect()
}

/// Parses a single `p`, `p/t`, `p/t/n` or `p//n` token into zero-based indices.
pub fn parse_face_vertex(value: &str) -> std::result::Result<FaceVertexRef, ParseErrorKind> {
    let fields: Vec<&str> = value.split('/').collect();
    let (position, tex_coord, normal) = match fields.as_slice() {
        [p] => (p, None, None),
        [p, t] => (p, Some(t), None),
        [p, t, n] => (p, Some(t), Some(n)),
        _ => return Err(ParseErrorKind::FaceVertexIndices(value.into())),
    };

    Ok(FaceVertexRef {
        position: parse_index(position)?,
        tex_coord: tex_coord
            .filter(|t| !t.is_empty())
            .map(|t| parse_index(t))
            .transpose()?,
        normal: normal.map(|n| parse_index(n)).transpose()?,
    })
}

// on disk indices start at 1, relative (negative) indices are not supported
fn parse_index(value: &str) -> ParseResult<usize> {
    let index: i64 = value.parse()?;
    if index < 1 {
        return Err(ParseErrorKind::UnsupportedIndex(index));
    }
    Ok(index as usize - 1)
}
