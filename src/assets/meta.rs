use serde::Deserialize;
use std::path::Path;

use super::error::{Error, Result};

/// Per-asset import settings, usually read from a `.toml` file next to the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportMeta {
    /// Move every object so that the mean of its positions is the origin
    pub center: bool,
    /// Negate the x, y or z axis of positions and normals
    pub flip_axis: [bool; 3],
    /// Decode `map_Kd` textures into pixel buffers
    pub decode_textures: bool,
}

impl Default for ImportMeta {
    fn default() -> Self {
        Self {
            center: false,
            flip_axis: [false; 3],
            decode_textures: true,
        }
    }
}

impl ImportMeta {
    pub fn parse(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|err| Error::io(path, err))?;
        toml::from_slice(&data).map_err(|source| Error::Meta {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn flip(&self, mut value: [f32; 3]) -> [f32; 3] {
        for n in 0..3 {
            if self.flip_axis[n] {
                value[n] = -value[n];
            }
        }
        value
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_meta() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "center = true\nflip_axis = [false, false, true]").unwrap();

        let meta = ImportMeta::parse(file.path())?;
        assert!(meta.center);
        assert_eq!(meta.flip_axis, [false, false, true]);
        assert!(meta.decode_textures);

        assert_eq!(meta.flip([1.0, 2.0, 3.0]), [1.0, 2.0, -3.0]);
        Ok(())
    }

    #[test]
    fn test_invalid_meta() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "center = \"yes\"").unwrap();

        assert!(matches!(
            ImportMeta::parse(file.path()),
            Err(Error::Meta { .. })
        ));
    }
}
