//! Directory-backed PNG adapter.
//!
//! Maps legacy asset names onto a directory of PNG files so re-extracted
//! artwork can be dropped in without reconstructing the original container
//! formats: `NAME.EXT` resolves to `name.png`, and a frame sequence to
//! `name_00.png`, `name_01.png`, ... in order. Grayscale pixel values are
//! taken as palette indices.

use std::path::{Path, PathBuf};

use log::debug;

use crate::{AssetError, PixelBuffer, TextureProvider};

/// Texture provider reading 8-bit grayscale PNGs from a directory.
#[derive(Clone, Debug)]
pub struct PngTextureProvider {
    root: PathBuf,
}

impl PngTextureProvider {
    /// Provider rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn stem(filename: &str) -> &str {
        match filename.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => filename,
        }
    }

    fn single_path(&self, filename: &str) -> PathBuf {
        self.root
            .join(format!("{}.png", Self::stem(filename).to_ascii_lowercase()))
    }

    fn frame_path(&self, filename: &str, frame: usize) -> PathBuf {
        self.root.join(format!(
            "{}_{frame:02}.png",
            Self::stem(filename).to_ascii_lowercase()
        ))
    }

    fn decode(path: &Path) -> Result<PixelBuffer, AssetError> {
        let image = image::open(path).map_err(|source| match source {
            image::ImageError::IoError(source) => AssetError::Io {
                path: path.display().to_string(),
                source,
            },
            source => AssetError::Decode {
                path: path.display().to_string(),
                source,
            },
        })?;
        let gray = image.into_luma8();
        let (width, height) = (gray.width() as usize, gray.height() as usize);
        Ok(PixelBuffer::new(width, height, gray.into_raw()))
    }
}

impl TextureProvider for PngTextureProvider {
    fn load_image(&mut self, filename: &str) -> Result<PixelBuffer, AssetError> {
        let path = self.single_path(filename);
        if !path.exists() {
            return Err(AssetError::MissingTexture(filename.to_string()));
        }
        Self::decode(&path)
    }

    fn load_image_set(&mut self, filename: &str) -> Result<Vec<PixelBuffer>, AssetError> {
        let mut frames = Vec::new();
        loop {
            let path = self.frame_path(filename, frames.len());
            if !path.exists() {
                break;
            }
            frames.push(Self::decode(&path)?);
        }

        if frames.is_empty() {
            return Err(AssetError::MissingTexture(filename.to_string()));
        }
        debug!("loaded {} frame(s) for {filename}", frames.len());
        Ok(frames)
    }
}
