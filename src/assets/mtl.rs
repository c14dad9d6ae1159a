//! Parses Wavefront material libraries (`.mtl`).

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::{debug, info};

use super::{
    error::{AtLine, Line, ParseErrorKind, Result},
    meta::ImportMeta,
    reader::{for_each_directive, parse_floats, required},
    texture::Texture,
};
use crate::color::Color;

#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub emissive: Color,
    /// Specular exponent (`Ns`)
    pub shininess: f32,
    /// Opacity, 1 is fully opaque (`d`, `Tr`)
    pub dissolve: f32,
    pub diffuse_texture: Option<Texture>,
}

impl Material {
    /// A material with the renderer's default look.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: Color::grey(0.1),
            diffuse: Color::grey(0.5),
            specular: Color::grey(0.5),
            emissive: Color::BLACK,
            shininess: 32.0,
            dissolve: 1.0,
            diffuse_texture: None,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::named("default")
    }
}

#[derive(Debug, Default)]
struct MtlBuilder {
    materials: HashMap<String, Material>,
    current: Option<Material>,
}

impl MtlBuilder {
    fn start(&mut self, name: &str) {
        self.finish();
        self.current = Some(Material::named(name));
    }

    fn finish(&mut self) {
        if let Some(material) = self.current.take() {
            if self.materials.contains_key(&material.name) {
                debug!("Material `{}` is defined twice, keeping the last one", material.name);
            }
            self.materials.insert(material.name.clone(), material);
        }
    }

    fn build(mut self) -> HashMap<String, Material> {
        self.finish();
        self.materials
    }
}

/// Reads all materials of the library at `path`.
///
/// Textures are resolved relative to the directory of the library.
pub fn parse(path: &Path, meta: &ImportMeta) -> Result<HashMap<String, Material>> {
    info!("Loading material library: {}", path.display());
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut builder = MtlBuilder::default();

    for_each_directive(path, |line, token, value| {
        parse_token(token, value, line, dir, meta, &mut builder)
    })?;

    Ok(builder.build())
}

fn parse_token(
    token: &str,
    value: &str,
    line: &Line<'_>,
    dir: &Path,
    meta: &ImportMeta,
    builder: &mut MtlBuilder,
) -> Result<()> {
    if token == "newmtl" {
        let name = parse_name(value).at(line)?;
        builder.start(name);
        return Ok(());
    }

    // everything else modifies the current material
    let material = match builder.current.as_mut() {
        Some(material) => material,
        None => {
            debug!("Ignoring `{}` outside of a material", token);
            return Ok(());
        }
    };

    match token {
        "Ka" => material.ambient = parse_floats::<3>("Ka", value).at(line)?.into(),
        "Kd" => material.diffuse = parse_floats::<3>("Kd", value).at(line)?.into(),
        "Ks" => material.specular = parse_floats::<3>("Ks", value).at(line)?.into(),
        "Ke" => material.emissive = parse_floats::<3>("Ke", value).at(line)?.into(),
        "Ns" => material.shininess = parse_floats::<1>("Ns", value).at(line)?[0],
        "d" => material.dissolve = parse_floats::<1>("d", value).at(line)?[0],
        "Tr" => material.dissolve = 1.0 - parse_floats::<1>("Tr", value).at(line)?[0],
        "map_Kd" => {
            let path = texture_path(dir, required("map_Kd", value).at(line)?);
            material.diffuse_texture = Some(if meta.decode_textures {
                Texture::load(&path)?
            } else {
                Texture::reference(&path)?
            });
        }
        _ => debug!("Ignoring unsupported material directive `{}`", token),
    }

    Ok(())
}

fn parse_name(value: &str) -> std::result::Result<&str, ParseErrorKind> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    match fields.as_slice() {
        [name] => Ok(*name),
        _ => Err(ParseErrorKind::FieldCount {
            directive: "newmtl",
            expected: 1,
            found: fields.len(),
        }),
    }
}

// texture paths are often exported with absolute paths of the authoring machine,
// so only the file name is kept and looked up next to the library
fn texture_path(dir: &Path, value: &str) -> PathBuf {
    let normalized = value.replace('\\', "/");
    let file_name = normalized.rsplit('/').next().unwrap_or(&normalized);
    dir.join(file_name)
}
