use anyhow::{Context, Result};
use gl_sandbox::assets::{self, ImportMeta};
use gs_format::mesh::ModelData;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::utils;

/// Extension of the welded mesh files
pub(crate) const EXTENSION: &str = "gsm";

fn serialize(data: &ModelData) -> Result<Vec<u8>> {
    data.to_bytes().context("Could not serialize ModelData")
}

fn save(path: &Path, output_dir: &Path, data: &[u8]) -> Result<PathBuf> {
    let file_name = utils::file_name(path)?;
    let target = utils::combine_path(output_dir, file_name, EXTENSION);
    utils::write_file(&target, data)?;
    Ok(target)
}

/// Parse meta from file called `file.toml` or alternatively from folder scoped meta file named `obj.toml` or else use default meta
fn parse_meta(path: &Path) -> Result<ImportMeta> {
    let dir = path
        .parent()
        .with_context(|| format!("Path terminates in root or prefix: {}", path.display()))?;

    let candidates = [
        utils::combine_path(dir, utils::file_name(path)?, "toml"),
        utils::combine_path(dir, "obj", "toml"),
    ];

    match candidates.iter().find(|meta| meta.is_file()) {
        Some(meta) => {
            debug!("Using import meta `{}`", meta.display());
            Ok(ImportMeta::parse(meta)?)
        }
        None => Ok(ImportMeta::default()),
    }
}

pub(crate) fn process(path: &Path, output_dir: &Path) -> Result<PathBuf> {
    info!("Processing Wavefront `.obj`-file: `{}`", path.display());
    let meta = parse_meta(path)?;
    let data = assets::import(path, &meta)
        .with_context(|| format!("Could not import `{}`", path.display()))?;

    for mesh in &data.meshes {
        debug!(
            "Mesh {:?}: {} vertices, {} triangles",
            mesh.name,
            mesh.vertices.len(),
            mesh.triangle_count()
        );
    }

    save(path, output_dir, &serialize(&data)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    const TRIANGLE: &str = "o tri\nv 0 0 0\nv 2 0 0\nv 0 2 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";

    #[test]
    fn test_process() -> Result<()> {
        let input = tempfile::tempdir()?;
        let output = tempfile::tempdir()?;
        let path = input.path().join("tri.obj");
        fs::write(&path, TRIANGLE)?;

        let target = process(&path, output.path())?;
        assert_eq!(target, output.path().join("tri.gsm"));

        let data = ModelData::from_file(&target)?;
        assert_eq!(data.meshes.len(), 1);
        assert_eq!(data.meshes[0].indices, vec![0, 1, 2]);
        assert_eq!(data.meshes[0].vertices[1].position, [2.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_meta_lookup() -> Result<()> {
        let input = tempfile::tempdir()?;
        let path = input.path().join("tri.obj");
        fs::write(&path, TRIANGLE)?;

        assert_eq!(parse_meta(&path)?, ImportMeta::default());

        fs::write(input.path().join("obj.toml"), "flip_axis = [true, false, false]\n")?;
        assert_eq!(parse_meta(&path)?.flip_axis, [true, false, false]);

        // a file specific meta wins over the folder scoped one
        fs::write(input.path().join("tri.toml"), "center = true\n")?;
        let meta = parse_meta(&path)?;
        assert!(meta.center);
        assert_eq!(meta.flip_axis, [false; 3]);
        Ok(())
    }
}
