//! The texture provider seam.
//!
//! The sky generator pulls pixel data through [`TextureProvider`]; the
//! game's proprietary container formats live behind it, outside this
//! repository.

use std::collections::HashMap;

use crate::{AssetError, PixelBuffer};

/// Resolves legacy asset filenames to pixel data.
pub trait TextureProvider {
    /// Load a single image.
    fn load_image(&mut self, filename: &str) -> Result<PixelBuffer, AssetError>;

    /// Load an ordered frame sequence.
    fn load_image_set(&mut self, filename: &str) -> Result<Vec<PixelBuffer>, AssetError>;
}

/// In-memory provider backed by a filename-to-frames map.
///
/// The standard test double, also used by the demo binary. With a fallback
/// configured, unknown filenames synthesize placeholder frames instead of
/// failing, which keeps procedurally-derived names (mountain and cloud
/// variants) from needing to be enumerated up front.
#[derive(Clone, Debug, Default)]
pub struct MemoryTextureProvider {
    frames: HashMap<String, Vec<PixelBuffer>>,
    fallback: Option<(usize, usize)>,
}

/// Frames synthesized for an unknown set filename; enough for a full moon
/// phase cycle.
const FALLBACK_SET_FRAMES: usize = 32;

impl MemoryTextureProvider {
    /// Empty provider; every lookup must be registered with
    /// [`insert`](Self::insert) first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that synthesizes a `width`x`height` placeholder for any
    /// filename not explicitly registered.
    pub fn with_fallback(width: usize, height: usize) -> Self {
        Self {
            frames: HashMap::new(),
            fallback: Some((width, height)),
        }
    }

    /// Register `frames` under `filename`, replacing any previous entry.
    pub fn insert(&mut self, filename: impl Into<String>, frames: Vec<PixelBuffer>) {
        self.frames.insert(filename.into(), frames);
    }

    fn fallback_frames(&self, count: usize) -> Option<Vec<PixelBuffer>> {
        let (width, height) = self.fallback?;
        Some(
            (0..count)
                .map(|i| PixelBuffer::filled(width, height, i as u8))
                .collect(),
        )
    }
}

impl TextureProvider for MemoryTextureProvider {
    fn load_image(&mut self, filename: &str) -> Result<PixelBuffer, AssetError> {
        if let Some(frames) = self.frames.get(filename) {
            return frames
                .first()
                .cloned()
                .ok_or_else(|| AssetError::EmptySequence(filename.to_string()));
        }
        self.fallback_frames(1)
            .map(|mut frames| frames.remove(0))
            .ok_or_else(|| AssetError::MissingTexture(filename.to_string()))
    }

    fn load_image_set(&mut self, filename: &str) -> Result<Vec<PixelBuffer>, AssetError> {
        if let Some(frames) = self.frames.get(filename) {
            if frames.is_empty() {
                return Err(AssetError::EmptySequence(filename.to_string()));
            }
            return Ok(frames.clone());
        }
        self.fallback_frames(FALLBACK_SET_FRAMES)
            .ok_or_else(|| AssetError::MissingTexture(filename.to_string()))
    }
}
