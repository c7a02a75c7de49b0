//! Procedural distant-sky generation: the horizon backdrop of the original
//! game (distant mountains, clouds, an animated land mass, two moons, the
//! star field, and the sun) rebuilt deterministically from a location seed,
//! weather, and day.
//!
//! The generator replays the retail executable's pseudo-random stream
//! ([`relic_rand::LegacyRng`]), so identical inputs reconstruct the identical
//! sky, object for object and filename for filename. Rendering is not
//! handled here: each frame the renderer reads the generated [`DistantSky`]
//! through its query surface and blits the referenced registry textures.

mod context;
mod error;
mod generator;
mod model;
mod registry;
mod tables;

pub use context::{
    ClimateKind, LocationContext, ProvinceContext, WeatherKind, star_count_from_density,
};
pub use error::SkyError;
pub use generator::generate;
pub use model::{
    AirObject, AnimatedLandObject, DistantSky, LandObject, MoonKind, MoonObject, StarKind,
    StarObject,
};
pub use registry::{TextureEntry, TextureRegistry, TextureSetEntry};
pub use tables::{MountainTraits, SkyTables};
