pub(crate) mod obj;
pub(crate) mod utils;

use anyhow::{Context, Result};
use log::{debug, info};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use structopt::StructOpt;
use walkdir::WalkDir;

#[derive(StructOpt, Debug)]
#[structopt(name = "gs_asset", about = "Welds the Wavefront models of a folder into .gsm meshes")]
struct CliArgs {
    /// Folder that is searched for `.obj` files
    #[structopt(parse(from_os_str))]
    input: PathBuf,
    /// Output folder, mirrors the layout of the input folder
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output: PathBuf,
    /// Output debug info
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Input folder does not exist: {0}")]
    InputFolderNonExistent(String),
    #[error("Output folder could not be created: {0}")]
    CreatingOutputFolder(#[from] io::Error),
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let written = prepare(&args)?;
    info!("Wrote {} meshes to {}", written.len(), args.output.display());
    Ok(())
}

fn is_obj(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map_or(false, |extension| extension.eq_ignore_ascii_case("obj"))
}

/// Converts every `.obj` file below the input folder, returns the written files.
fn prepare(args: &CliArgs) -> Result<Vec<PathBuf>> {
    if !args.input.is_dir() {
        return Err(CliError::InputFolderNonExistent(args.input.display().to_string()).into());
    }

    let mut written = Vec::new();
    for entry in WalkDir::new(&args.input) {
        let entry = entry.context("Could not walk the input folder")?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_obj(path) {
            debug!("Skipping `{}`", path.display());
            continue;
        }

        let relative = path
            .parent()
            .unwrap_or(&args.input)
            .strip_prefix(&args.input)?;
        let output_dir = args.output.join(relative);
        fs::create_dir_all(&output_dir).map_err(CliError::CreatingOutputFolder)?;

        written.push(obj::process(path, &output_dir)?);
    }

    Ok(written)
}

#[cfg(test)]
mod test {
    use super::*;
    use gs_format::mesh::ModelData;

    #[test]
    fn test_prepare_mirrors_folders() -> Result<()> {
        let input = tempfile::tempdir()?;
        let output = tempfile::tempdir()?;
        let nested = input.path().join("props");
        fs::create_dir(&nested)?;
        fs::write(
            nested.join("plane.obj"),
            "mtllib plane.mtl\nv 0 0 0\nv 1 0 0\nv 1 0 1\nv 0 0 1\nusemtl grass\nf 1 2 3 4\n",
        )?;
        fs::write(nested.join("plane.mtl"), "newmtl grass\nKd 0 1 0\n")?;
        fs::write(input.path().join("notes.txt"), "not a model")?;

        let args = CliArgs {
            input: input.path().to_path_buf(),
            output: output.path().to_path_buf(),
            verbose: false,
        };
        let target = output.path().join("props").join("plane.gsm");
        assert_eq!(prepare(&args)?, vec![target.clone()]);

        let data = ModelData::from_file(&target)?;
        assert_eq!(data.meshes[0].triangle_count(), 2);
        assert_eq!(data.meshes[0].material.as_deref(), Some("grass"));
        assert!(!output.path().join("props").join("plane.mtl").exists());
        Ok(())
    }

    #[test]
    fn test_missing_input() {
        let args = CliArgs {
            input: PathBuf::from("/definitely/not/here"),
            output: PathBuf::from("out"),
            verbose: false,
        };
        assert!(prepare(&args).is_err());
    }

    #[test]
    fn test_is_obj() {
        assert!(is_obj(Path::new("models/crate.obj")));
        assert!(is_obj(Path::new("CRATE.OBJ")));
        assert!(!is_obj(Path::new("models/crate.mtl")));
        assert!(!is_obj(Path::new("models/obj")));
    }
}
