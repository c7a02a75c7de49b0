//! Sky generation error types.
//!
//! Everything here is a fatal configuration problem: the static data tables,
//! the settings, or the assets they name are corrupt, and generation cannot
//! proceed.

use crate::ClimateKind;

/// Errors aborting sky generation.
#[derive(Debug, thiserror::Error)]
pub enum SkyError {
    /// No mountain-traits row exists for the location's climate.
    #[error("no mountain traits for climate {0:?}")]
    UnknownClimate(ClimateKind),

    /// A filename table was indexed out of range.
    #[error("{table} has no entry {index}")]
    MissingFilenameEntry { table: &'static str, index: usize },

    /// A filename template cannot take the variant it was asked to encode.
    #[error("malformed filename template {template:?}: {reason}")]
    MalformedTemplate { template: String, reason: String },

    /// The star-density setting is not one of the supported values.
    #[error("unsupported star density {0}")]
    UnsupportedStarDensity(i32),

    /// A moon frame set is shorter than the requested phase index.
    #[error("moon set {filename} has {frames} frame(s), phase index {phase} requested")]
    MoonPhaseOutOfRange {
        filename: String,
        frames: usize,
        phase: usize,
    },

    /// The data table file could not be read.
    #[error("failed to read sky tables: {0}")]
    TableRead(#[source] std::io::Error),

    /// The data table file is not valid RON.
    #[error("failed to parse sky tables: {0}")]
    TableParse(#[source] ron::error::SpannedError),

    /// The texture provider failed to resolve a referenced asset.
    #[error(transparent)]
    Texture(#[from] relic_assets::AssetError),
}
