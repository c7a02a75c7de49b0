//! Per-sky texture registry: stable integer handles memoized by filename.

use relic_assets::PixelBuffer;

use crate::SkyError;

/// A single named image.
#[derive(Clone, Debug)]
pub struct TextureEntry {
    filename: String,
    image: PixelBuffer,
}

impl TextureEntry {
    /// Name the entry was registered under.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The entry's pixels.
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }
}

/// A named, ordered frame sequence.
#[derive(Clone, Debug)]
pub struct TextureSetEntry {
    filename: String,
    frames: Vec<PixelBuffer>,
}

impl TextureSetEntry {
    /// Name the set was registered under.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// All frames in playback order.
    pub fn frames(&self) -> &[PixelBuffer] {
        &self.frames
    }
}

/// Append-only store of the images one generated sky references.
///
/// Sky objects hold integer handles into these sequences rather than the
/// pixel data itself; a handle stays valid and points at the same entry for
/// the life of the sky. Lookup is a linear scan, which is fine at per-sky
/// entry counts.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    images: Vec<TextureEntry>,
    sets: Vec<TextureSetEntry>,
}

impl TextureRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the single image named `filename`, if already present.
    pub fn find_image(&self, filename: &str) -> Option<usize> {
        self.images.iter().position(|e| e.filename == filename)
    }

    /// Index of the frame set named `filename`, if already present.
    pub fn find_set(&self, filename: &str) -> Option<usize> {
        self.sets.iter().position(|e| e.filename == filename)
    }

    /// Index for the single image `filename`, running `load` only on the
    /// first reference.
    pub fn image_or_insert_with<F>(&mut self, filename: &str, load: F) -> Result<usize, SkyError>
    where
        F: FnOnce() -> Result<PixelBuffer, SkyError>,
    {
        if let Some(index) = self.find_image(filename) {
            return Ok(index);
        }
        let image = load()?;
        self.images.push(TextureEntry {
            filename: filename.to_string(),
            image,
        });
        Ok(self.images.len() - 1)
    }

    /// Index for the frame set `filename`, running `load` only on the first
    /// reference.
    pub fn set_or_insert_with<F>(&mut self, filename: &str, load: F) -> Result<usize, SkyError>
    where
        F: FnOnce() -> Result<Vec<PixelBuffer>, SkyError>,
    {
        if let Some(index) = self.find_set(filename) {
            return Ok(index);
        }
        let frames = load()?;
        self.sets.push(TextureSetEntry {
            filename: filename.to_string(),
            frames,
        });
        Ok(self.sets.len() - 1)
    }

    /// Number of single-image entries.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Number of frame-set entries.
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Single-image entry `index`. Panics when out of range.
    pub fn image_entry(&self, index: usize) -> &TextureEntry {
        &self.images[index]
    }

    /// Pixels of single-image entry `index`. Panics when out of range.
    pub fn image(&self, index: usize) -> &PixelBuffer {
        self.images[index].image()
    }

    /// Frame-set entry `index`. Panics when out of range.
    pub fn set_entry(&self, index: usize) -> &TextureSetEntry {
        &self.sets[index]
    }

    /// Frame count of set entry `index`. Panics when out of range.
    pub fn set_len(&self, index: usize) -> usize {
        self.sets[index].frames.len()
    }

    /// Frame `frame` of set entry `index`. Panics when out of range.
    pub fn set_frame(&self, index: usize, frame: usize) -> &PixelBuffer {
        &self.sets[index].frames[frame]
    }
}
