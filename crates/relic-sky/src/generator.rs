//! The procedural sky generator.
//!
//! Rebuilds the horizon backdrop for one location by replaying the retail
//! game's pseudo-random stream. Draw order is load-bearing: every `next()`
//! call below consumes a value the original consumed at the same point, so
//! steps cannot be reordered without changing every sky in the game.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::{DMat3, DVec3, IVec2};
use log::debug;
use relic_assets::{PaletteProvider, TextureProvider};
use relic_rand::LegacyRng;

use crate::model::{
    AirObject, AnimatedLandObject, DistantSky, LandObject, MoonKind, MoonObject, StarObject,
};
use crate::tables::{self, SkyTables};
use crate::{LocationContext, ProvinceContext, SkyError, WeatherKind};

/// Discrete horizon directions in the source angle convention.
const UNIQUE_ANGLES: u32 = 512;

/// Reference screen dimension for constellation member offsets.
const IDENTITY_DIM: f64 = 320.0;

/// Reference angle for constellation member offsets.
const IDENTITY_ANGLE_RADIANS: f64 = FRAC_PI_2;

/// Cloud template parameters. Unlike the per-climate mountain traits these
/// never vary, so they are not part of the data tables.
const CLOUD_COUNT: usize = 7;
const CLOUD_POSITION: usize = 5;
const CLOUD_VARIATION: u32 = 17;
const CLOUD_MAX_DIGITS: usize = 2;

/// Province-map position of the animated land mass.
const ANIMATED_LAND_POSITION: IVec2 = IVec2::new(132, 52);

/// Fixed seed for the star pass; the night sky is the same everywhere.
const STAR_SEED: u32 = 0x1234_5679;

/// Frames in a moon phase cycle.
const MOON_PHASE_COUNT: usize = 32;

/// Day offset between the two moons' phases.
const SECOND_MOON_PHASE_OFFSET: i32 = 14;

/// A filename template plus its digit-field parameters.
struct FilenameTemplate<'a> {
    base: &'a str,
    position: usize,
    variation: u32,
    max_digits: usize,
}

/// Build the distant sky for one location/weather/day context.
///
/// Deterministic: identical inputs produce identical objects and identical
/// registry contents. The terrain pass always runs; clouds and space
/// objects (moons, stars, sun) require clear weather, and the animated land
/// mass requires province support. Table or asset inconsistencies abort
/// generation with a fatal [`SkyError`].
#[allow(clippy::too_many_arguments)]
pub fn generate(
    location: &LocationContext,
    province: &ProvinceContext,
    weather: WeatherKind,
    current_day: i32,
    star_count: u32,
    sky_tables: &SkyTables,
    provider: &mut dyn TextureProvider,
    palette: &dyn PaletteProvider,
) -> Result<DistantSky, SkyError> {
    let mut sky = DistantSky::new();
    let mut rng = LegacyRng::new(location.sky_seed);

    // Terrain pass: climate-specific distant mountains.
    let traits = sky_tables.traits_for(location.climate)?;
    let base = tables::filename_entry(
        "distant_mountain_filenames",
        &sky_tables.distant_mountain_filenames,
        traits.filename_index,
    )?;
    let mountain_template = FilenameTemplate {
        base,
        position: traits.position,
        variation: traits.variation,
        max_digits: traits.max_digits,
    };
    let count = usize::from(rng.next() % 4 + 2);
    place_static_objects(&mut sky, provider, &mut rng, count, &mountain_template, false)?;
    debug!(
        "placed {count} distant mountains for {:?} climate",
        location.climate
    );

    let clear = weather == WeatherKind::Clear;

    // Clouds only under a clear sky. The pass re-seeds from the live
    // generator state so the layout shifts with the day of the month.
    if clear {
        let cloud_seed = rng.state().wrapping_add((current_day % 32) as u32);
        rng.srand(cloud_seed);
        let cloud_template = FilenameTemplate {
            base: &sky_tables.cloud_filename,
            position: CLOUD_POSITION,
            variation: CLOUD_VARIATION,
            max_digits: CLOUD_MAX_DIGITS,
        };
        place_static_objects(&mut sky, provider, &mut rng, CLOUD_COUNT, &cloud_template, true)?;
    }

    if province.has_animated_land {
        place_animated_land(&mut sky, provider, sky_tables, location)?;
    }

    if clear {
        place_moons(&mut sky, provider, sky_tables, current_day)?;
        place_stars(&mut sky, provider, sky_tables, palette, &mut rng, star_count)?;
        place_sun(&mut sky, provider, sky_tables)?;
    }

    Ok(sky)
}

/// Convert a source horizon angle to radians.
///
/// Source convention: 0 = south, 128 = west, 256 = north, 384 = east,
/// clockwise in 512 steps. Output convention: 0 = east, counter-clockwise.
fn source_angle_to_radians(angle: u32) -> f64 {
    let source_radians = TAU * (f64::from(angle) / f64::from(UNIQUE_ANGLES));
    (TAU - source_radians) - FRAC_PI_2
}

/// Right-align the decimal digits of `variant` into the template's digit
/// field and uppercase the result (the game's archives are all uppercase).
fn splice_variant(template: &FilenameTemplate, variant: u32) -> Result<String, SkyError> {
    let malformed = |reason: String| SkyError::MalformedTemplate {
        template: template.base.to_string(),
        reason,
    };

    if !template.base.is_ascii() {
        return Err(malformed("template is not ASCII".into()));
    }
    let digits = variant.to_string();
    if digits.len() > template.max_digits {
        return Err(malformed(format!(
            "variant {variant} needs {} digit(s), field holds {}",
            digits.len(),
            template.max_digits
        )));
    }
    let end = template.position + template.max_digits;
    let mut name = template.base.to_ascii_uppercase().into_bytes();
    if end > name.len() {
        return Err(malformed(format!(
            "digit field {}..{end} is outside the template",
            template.position
        )));
    }

    let start = template.position + (template.max_digits - digits.len());
    name[start..start + digits.len()].copy_from_slice(digits.as_bytes());
    Ok(String::from_utf8(name).expect("ASCII template stays ASCII"))
}

/// Shared placement routine for mountains and clouds.
///
/// Per object the draws are: filename variant, then (clouds only) height,
/// then horizon angle. Mountains become [`LandObject`]s with no height;
/// clouds become [`AirObject`]s with one.
fn place_static_objects(
    sky: &mut DistantSky,
    provider: &mut dyn TextureProvider,
    rng: &mut LegacyRng,
    count: usize,
    template: &FilenameTemplate,
    random_height: bool,
) -> Result<(), SkyError> {
    if template.variation == 0 {
        return Err(SkyError::MalformedTemplate {
            template: template.base.to_string(),
            reason: "variation must be at least 1".into(),
        });
    }

    for _ in 0..count {
        // Variant values are 1-based: a roll of 0 names the last variant.
        let roll = u32::from(rng.next()) % template.variation;
        let variant = if roll == 0 { template.variation } else { roll };
        let filename = splice_variant(template, variant)?;

        let height = if random_height {
            Some(f64::from(rng.next() % 64) / 64.0)
        } else {
            None
        };

        let source_angle = u32::from(rng.next()) % UNIQUE_ANGLES;
        let angle_radians = source_angle_to_radians(source_angle);

        let entry_index = sky
            .registry
            .image_or_insert_with(&filename, || Ok(provider.load_image(&filename)?))?;

        match height {
            None => sky
                .land_objects
                .push(LandObject::new(entry_index, angle_radians)),
            Some(height) => sky
                .air_objects
                .push(AirObject::new(entry_index, angle_radians, height)),
        }
    }
    Ok(())
}

/// Overland map distance, the diagonal-friendly approximation the original
/// overworld code used everywhere.
fn map_distance(a: IVec2, b: IVec2) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    dx.max(dy) + dx.min(dy) / 2
}

fn place_animated_land(
    sky: &mut DistantSky,
    provider: &mut dyn TextureProvider,
    sky_tables: &SkyTables,
    location: &LocationContext,
) -> Result<(), SkyError> {
    let dist = map_distance(location.map_position, ANIMATED_LAND_POSITION);

    // Horizon angle straight from the overland coordinate delta; the map's
    // y axis points south, hence the sign arrangement. Not the quantized
    // angle convention the random placements use.
    let angle_radians = libm::atan2(
        f64::from(location.map_position.y - ANIMATED_LAND_POSITION.y),
        f64::from(ANIMATED_LAND_POSITION.x - location.map_position.x),
    );

    // Closer land masses get the larger animation variants.
    let anim_index = if dist < 80 {
        0
    } else if dist < 150 {
        1
    } else {
        2
    };
    let filename = tables::filename_entry(
        "animated_land_filenames",
        &sky_tables.animated_land_filenames,
        anim_index,
    )?
    .to_ascii_uppercase();

    // Frame sets come from .DFA archives; anything else is a single image.
    let set_entry_index = sky.registry.set_or_insert_with(&filename, || {
        if filename.contains(".DFA") {
            Ok(provider.load_image_set(&filename)?)
        } else {
            Ok(vec![provider.load_image(&filename)?])
        }
    })?;

    sky.animated_land_objects
        .push(AnimatedLandObject::new(set_entry_index, angle_radians));
    debug!("animated land at map distance {dist}, animation {anim_index}");
    Ok(())
}

fn place_moons(
    sky: &mut DistantSky,
    provider: &mut dyn TextureProvider,
    sky_tables: &SkyTables,
    current_day: i32,
) -> Result<(), SkyError> {
    for (table_index, kind) in [MoonKind::First, MoonKind::Second].into_iter().enumerate() {
        let day = match kind {
            MoonKind::First => current_day,
            MoonKind::Second => current_day + SECOND_MOON_PHASE_OFFSET,
        };
        let phase_index = day.rem_euclid(MOON_PHASE_COUNT as i32) as usize;

        let filename = tables::filename_entry(
            "moon_filenames",
            &sky_tables.moon_filenames,
            table_index,
        )?
        .to_ascii_uppercase();

        // The registry keeps only the single frame matching today's phase.
        let entry_index = sky.registry.image_or_insert_with(&filename, || {
            let mut frames = provider.load_image_set(&filename)?;
            if phase_index >= frames.len() {
                return Err(SkyError::MoonPhaseOutOfRange {
                    filename: filename.clone(),
                    frames: frames.len(),
                    phase: phase_index,
                });
            }
            Ok(frames.swap_remove(phase_index))
        })?;

        let phase_percent = phase_index as f64 / MOON_PHASE_COUNT as f64;
        sky.moon_objects
            .push(MoonObject::new(entry_index, phase_percent, kind));
    }
    Ok(())
}

/// A constellation member before conversion to world space.
struct SubStar {
    dx: i16,
    dy: i16,
    color: u8,
}

/// A star as drawn from the random stream, before conversion.
struct ProtoStar {
    x: i16,
    y: i16,
    z: i16,
    sub_stars: Vec<SubStar>,
    large_type: Option<u8>,
}

/// Signed 12-bit celestial coordinate. Bit 1 of the masked value selects
/// the sign.
fn random_coordinate(rng: &mut LegacyRng) -> i16 {
    let d = ((0x800 + i32::from(rng.next())) & 0x0FFF) as i16;
    if d & 2 == 0 { d } else { -d }
}

/// Offset a constellation member from its parent direction.
///
/// Member offsets are stored as screen-space pixel deltas; they are applied
/// as a pair of rotations scaled against a 320px/90-degree identity rather
/// than after projection, keeping star generation self-contained.
fn sub_direction(direction: DVec3, sub: &SubStar) -> DVec3 {
    let dx_radians = f64::from(sub.dx) / IDENTITY_DIM * IDENTITY_ANGLE_RADIANS;
    let dy_radians = f64::from(sub.dy) / IDENTITY_DIM * IDENTITY_ANGLE_RADIANS;
    DMat3::from_rotation_y(dy_radians) * (DMat3::from_rotation_x(dx_radians) * direction)
}

/// Large-star filename: the template's `1` digit becomes the 1-based type.
fn star_filename(template: &str, large_type: u8) -> Result<String, SkyError> {
    let Some(index) = template.find('1') else {
        return Err(SkyError::MalformedTemplate {
            template: template.to_string(),
            reason: "no digit 1 to substitute".into(),
        });
    };
    let mut filename = template.to_string();
    filename.replace_range(index..index + 1, &(large_type + 1).to_string());
    Ok(filename.to_ascii_uppercase())
}

fn place_stars(
    sky: &mut DistantSky,
    provider: &mut dyn TextureProvider,
    sky_tables: &SkyTables,
    palette: &dyn PaletteProvider,
    rng: &mut LegacyRng,
    star_count: u32,
) -> Result<(), SkyError> {
    rng.srand(STAR_SEED);

    // Unique-slot tracking for the three planets (large-star types 5..8).
    let mut planets = [false; 3];
    let mut stars: Vec<ProtoStar> = Vec::with_capacity(star_count as usize);

    for _ in 0..star_count {
        let x = random_coordinate(rng);
        let y = random_coordinate(rng);
        let z = random_coordinate(rng);

        let selection = rng.next() % 4;
        let star = if selection != 0 {
            // Constellation of small stars around the base direction.
            let member_count = usize::from(2 + rng.next() % 4);
            let mut sub_stars = Vec::with_capacity(member_count);
            for _ in 0..member_count {
                // Arithmetic shift keeps the legacy sign behavior.
                let dx = (rng.next() as i16) >> 9;
                let dy = (rng.next() as i16) >> 9;
                let color = (rng.next() % 10 + 64) as u8;
                sub_stars.push(SubStar { dx, dy, color });
            }
            ProtoStar {
                x,
                y,
                z,
                sub_stars,
                large_type: None,
            }
        } else {
            // Large star or planet; a planet slot may not repeat.
            let large_type = loop {
                let value = (rng.next() % 8) as u8;
                match value.checked_sub(5) {
                    Some(slot) if planets[usize::from(slot)] => continue,
                    Some(slot) => {
                        planets[usize::from(slot)] = true;
                        break value;
                    }
                    None => break value,
                }
            };
            ProtoStar {
                x,
                y,
                z,
                sub_stars: Vec::new(),
                large_type: Some(large_type),
            }
        };
        stars.push(star);
    }

    // Large stars draw in front of the constellation points; the sort is
    // stable, so equal types keep their generation order.
    stars.sort_by_key(|star| star.large_type.map_or(i32::MAX, i32::from));

    for star in &stars {
        let direction = DVec3::new(f64::from(star.x), f64::from(star.y), f64::from(star.z))
            .normalize();
        match star.large_type {
            Some(large_type) => {
                let filename = star_filename(&sky_tables.star_filename, large_type)?;
                let entry_index = sky
                    .registry
                    .image_or_insert_with(&filename, || Ok(provider.load_image(&filename)?))?;
                sky.star_objects
                    .push(StarObject::large(entry_index, direction));
            }
            None => {
                for sub in &star.sub_stars {
                    let color = palette.color_at(sub.color);
                    sky.star_objects
                        .push(StarObject::small(color, sub_direction(direction, sub)));
                }
            }
        }
    }
    debug!(
        "generated {star_count} stars ({} render objects)",
        sky.star_objects.len()
    );
    Ok(())
}

fn place_sun(
    sky: &mut DistantSky,
    provider: &mut dyn TextureProvider,
    sky_tables: &SkyTables,
) -> Result<(), SkyError> {
    let filename = sky_tables.sun_filename.to_ascii_uppercase();
    let entry_index = sky
        .registry
        .image_or_insert_with(&filename, || Ok(provider.load_image(&filename)?))?;
    sky.sun_entry_index = Some(entry_index);
    Ok(())
}
