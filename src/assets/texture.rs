use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use image::{ImageError, RgbaImage};

use super::error::{Error, Result};

/// A texture referenced by a material, resolved to a file on disk.
#[derive(Debug, Clone)]
pub struct Texture {
    pub path: PathBuf,
    /// Decoded pixels, `None` if decoding was disabled for the import
    pub image: Option<RgbaImage>,
}

impl Texture {
    /// Opens and decodes the image at `path` into RGBA8 pixels.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = image::io::Reader::new(BufReader::new(open(path)?))
            .with_guessed_format()
            .map_err(|err| Error::io(path, err))?;
        let image = reader.decode().map_err(|err| match err {
            ImageError::IoError(err) => Error::io(path, err),
            err => Error::TextureDecode {
                path: path.to_path_buf(),
                source: err,
            },
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            image: Some(image.to_rgba8()),
        })
    }

    /// Only checks that the file can be opened.
    pub fn reference(path: &Path) -> Result<Self> {
        open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            image: None,
        })
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|image| image.dimensions())
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| Error::io(path, err))
}
