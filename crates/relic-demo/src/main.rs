//! Generates a sample distant sky and logs what it built.
//!
//! Runs entirely against placeholder textures, so it exercises the whole
//! generation pipeline without any game data on disk.

use glam::IVec2;
use relic_assets::{MemoryTextureProvider, Palette};
use relic_sky::{
    ClimateKind, LocationContext, ProvinceContext, SkyError, SkyTables, WeatherKind,
    star_count_from_density,
};

fn main() -> Result<(), SkyError> {
    relic_log::init_logging("info,relic_sky=debug");

    let sky_tables = SkyTables::default();
    let mut provider = MemoryTextureProvider::with_fallback(64, 32);
    let palette = Palette::grayscale();

    let location = LocationContext {
        climate: ClimateKind::Temperate,
        sky_seed: 0xBEEF_CAFE,
        map_position: IVec2::new(60, 70),
    };
    let province = ProvinceContext {
        has_animated_land: true,
    };
    let star_count = star_count_from_density(1)?;

    let mut sky = relic_sky::generate(
        &location,
        &province,
        WeatherKind::Clear,
        12,
        star_count,
        &sky_tables,
        &mut provider,
        &palette,
    )?;

    log::info!(
        "distant sky: {} mountains, {} clouds, {} animated, {} moons, {} star objects, sun: {}",
        sky.land_object_count(),
        sky.air_object_count(),
        sky.animated_land_object_count(),
        sky.moon_object_count(),
        sky.star_object_count(),
        sky.has_sun()
    );

    // A few simulation steps to exercise the animation path.
    for _ in 0..90 {
        sky.tick(1.0 / 60.0);
    }
    if sky.animated_land_object_count() > 0 {
        let anim = sky.animated_land_object(0);
        log::info!(
            "animated land on frame {}/{} after 1.5s",
            anim.frame_index(),
            sky.texture_set_len(anim.set_entry_index())
        );
    }

    Ok(())
}
