//! Asset primitives for the reconstructed engine: 8-bit paletted pixel
//! buffers, display palettes, and the provider seams the sky subsystem pulls
//! texture data through.
//!
//! The original game stored artwork in proprietary container formats. Those
//! formats are not reconstructed here; instead, consumers load pixel data
//! through the [`TextureProvider`] trait, with an in-memory implementation
//! for tests and demos and a PNG-backed adapter for re-extracted data.

mod error;
mod palette;
mod pixel;
mod png;
mod provider;

pub use error::AssetError;
pub use palette::{Palette, PaletteProvider};
pub use pixel::PixelBuffer;
pub use png::PngTextureProvider;
pub use provider::{MemoryTextureProvider, TextureProvider};
