//! Inputs describing where and when a sky is generated.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::SkyError;

/// Terrain/weather classification of a city, driving mountain texture
/// selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateKind {
    Temperate,
    Desert,
    Mountain,
}

/// Current weather. Only clear skies receive clouds and space objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherKind {
    Clear,
    Overcast,
    Rain,
    Snow,
}

/// Per-location generation inputs.
#[derive(Clone, Copy, Debug)]
pub struct LocationContext {
    /// Climate of the city the sky is seen from.
    pub climate: ClimateKind,
    /// Location-derived seed for the terrain pass.
    pub sky_seed: u32,
    /// Global position on the province map, used to place the animated land
    /// mass on the horizon.
    pub map_position: IVec2,
}

/// Per-province generation inputs.
#[derive(Clone, Copy, Debug)]
pub struct ProvinceContext {
    /// Whether this province has an animated land mass on its horizon.
    pub has_animated_land: bool,
}

/// Maps the star-density setting to a star count.
///
/// Density 0 is the count the original game shipped with; the higher tiers
/// are denser modern options. Any other value indicates corrupt settings
/// data and is a fatal configuration error.
pub fn star_count_from_density(star_density: i32) -> Result<u32, SkyError> {
    match star_density {
        0 => Ok(40),
        1 => Ok(1000),
        2 => Ok(8000),
        other => Err(SkyError::UnsupportedStarDensity(other)),
    }
}
