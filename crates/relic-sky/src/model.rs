//! The generated sky: object types, the renderer query surface, and
//! animation state.

use glam::DVec3;
use relic_assets::PixelBuffer;

use crate::registry::TextureRegistry;

/// A static distant mountain silhouette on the horizon.
#[derive(Clone, Copy, Debug)]
pub struct LandObject {
    entry_index: usize,
    angle_radians: f64,
}

impl LandObject {
    pub(crate) fn new(entry_index: usize, angle_radians: f64) -> Self {
        Self {
            entry_index,
            angle_radians,
        }
    }

    /// Registry index of the silhouette image.
    pub fn entry_index(&self) -> usize {
        self.entry_index
    }

    /// Horizon direction, radians counter-clockwise from east.
    pub fn angle_radians(&self) -> f64 {
        self.angle_radians
    }
}

/// The animated land mass on the horizon, cycling through a frame set.
#[derive(Clone, Debug)]
pub struct AnimatedLandObject {
    set_entry_index: usize,
    angle_radians: f64,
    target_frame_time: f64,
    current_frame_time: f64,
    frame_index: usize,
}

impl AnimatedLandObject {
    /// Seconds per frame when no explicit rate is set.
    pub const DEFAULT_FRAME_TIME: f64 = 1.0 / 18.0;

    pub(crate) fn new(set_entry_index: usize, angle_radians: f64) -> Self {
        Self::with_frame_time(set_entry_index, angle_radians, Self::DEFAULT_FRAME_TIME)
    }

    pub(crate) fn with_frame_time(
        set_entry_index: usize,
        angle_radians: f64,
        frame_time: f64,
    ) -> Self {
        assert!(frame_time > 0.0, "frame time must be positive, got {frame_time}");
        Self {
            set_entry_index,
            angle_radians,
            target_frame_time: frame_time,
            current_frame_time: 0.0,
            frame_index: 0,
        }
    }

    /// Registry index of the frame set.
    pub fn set_entry_index(&self) -> usize {
        self.set_entry_index
    }

    /// Horizon direction, radians counter-clockwise from east.
    pub fn angle_radians(&self) -> f64 {
        self.angle_radians
    }

    /// Seconds each frame is held.
    pub fn frame_time(&self) -> f64 {
        self.target_frame_time
    }

    /// Time accumulated toward the next frame advance, in `[0, frame_time)`.
    pub fn current_frame_time(&self) -> f64 {
        self.current_frame_time
    }

    /// Currently displayed frame within the set.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Change the playback rate. Must be positive.
    pub fn set_frame_time(&mut self, frame_time: f64) {
        assert!(frame_time > 0.0, "frame time must be positive, got {frame_time}");
        self.target_frame_time = frame_time;
    }

    pub(crate) fn update(&mut self, dt: f64, frame_count: usize) {
        if frame_count == 0 {
            return;
        }
        self.current_frame_time += dt;
        while self.current_frame_time >= self.target_frame_time {
            self.current_frame_time -= self.target_frame_time;
            self.frame_index = (self.frame_index + 1) % frame_count;
        }
    }
}

/// A cloud at a fixed horizon angle and height.
#[derive(Clone, Copy, Debug)]
pub struct AirObject {
    entry_index: usize,
    angle_radians: f64,
    height: f64,
}

impl AirObject {
    pub(crate) fn new(entry_index: usize, angle_radians: f64, height: f64) -> Self {
        Self {
            entry_index,
            angle_radians,
            height,
        }
    }

    /// Registry index of the cloud image.
    pub fn entry_index(&self) -> usize {
        self.entry_index
    }

    /// Horizon direction, radians counter-clockwise from east.
    pub fn angle_radians(&self) -> f64 {
        self.angle_radians
    }

    /// Vertical position as a fraction of the maximum cloud height, in
    /// `[0, 1)`.
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Which of the two moons an object represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoonKind {
    First,
    Second,
}

/// One of the two moons, fixed to the phase image for the current day.
#[derive(Clone, Copy, Debug)]
pub struct MoonObject {
    entry_index: usize,
    phase_percent: f64,
    kind: MoonKind,
}

impl MoonObject {
    pub(crate) fn new(entry_index: usize, phase_percent: f64, kind: MoonKind) -> Self {
        Self {
            entry_index,
            phase_percent,
            kind,
        }
    }

    /// Registry index of the phase image.
    pub fn entry_index(&self) -> usize {
        self.entry_index
    }

    /// Progress through the phase cycle, in `[0, 1)`.
    pub fn phase_percent(&self) -> f64 {
        self.phase_percent
    }

    /// Which moon this is.
    pub fn kind(&self) -> MoonKind {
        self.kind
    }
}

/// What a star object is: a palette-colored point or a textured sprite.
#[derive(Clone, Copy, Debug)]
pub enum StarKind {
    /// Constellation member drawn as a single palette-colored point.
    Small { color: u32 },
    /// Bright star or planet drawn from a sprite.
    Large { entry_index: usize },
}

/// A star on the celestial sphere.
#[derive(Clone, Copy, Debug)]
pub struct StarObject {
    direction: DVec3,
    kind: StarKind,
}

impl StarObject {
    pub(crate) fn small(color: u32, direction: DVec3) -> Self {
        Self {
            direction,
            kind: StarKind::Small { color },
        }
    }

    pub(crate) fn large(entry_index: usize, direction: DVec3) -> Self {
        Self {
            direction,
            kind: StarKind::Large { entry_index },
        }
    }

    /// Unit direction on the celestial sphere.
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Point or sprite.
    pub fn kind(&self) -> StarKind {
        self.kind
    }
}

/// A fully generated distant sky.
///
/// Built once per location/weather/day context by
/// [`generate`](crate::generate) and read-only afterwards, except for the
/// animation state advanced by [`tick`](Self::tick). Ownership is exclusive
/// to the caller; nothing here is shared or locked.
#[derive(Debug, Default)]
pub struct DistantSky {
    pub(crate) land_objects: Vec<LandObject>,
    pub(crate) animated_land_objects: Vec<AnimatedLandObject>,
    pub(crate) air_objects: Vec<AirObject>,
    pub(crate) moon_objects: Vec<MoonObject>,
    pub(crate) star_objects: Vec<StarObject>,
    pub(crate) sun_entry_index: Option<usize>,
    pub(crate) registry: TextureRegistry,
}

impl DistantSky {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of static land objects.
    pub fn land_object_count(&self) -> usize {
        self.land_objects.len()
    }

    /// Number of animated land objects.
    pub fn animated_land_object_count(&self) -> usize {
        self.animated_land_objects.len()
    }

    /// Number of clouds.
    pub fn air_object_count(&self) -> usize {
        self.air_objects.len()
    }

    /// Number of moons.
    pub fn moon_object_count(&self) -> usize {
        self.moon_objects.len()
    }

    /// Number of star render objects (constellations already expanded).
    pub fn star_object_count(&self) -> usize {
        self.star_objects.len()
    }

    /// Land object `index`. Panics when out of range.
    pub fn land_object(&self, index: usize) -> &LandObject {
        &self.land_objects[index]
    }

    /// Animated land object `index`. Panics when out of range.
    pub fn animated_land_object(&self, index: usize) -> &AnimatedLandObject {
        &self.animated_land_objects[index]
    }

    /// Mutable animated land object `index`, for playback-rate control.
    /// Panics when out of range.
    pub fn animated_land_object_mut(&mut self, index: usize) -> &mut AnimatedLandObject {
        &mut self.animated_land_objects[index]
    }

    /// Cloud `index`. Panics when out of range.
    pub fn air_object(&self, index: usize) -> &AirObject {
        &self.air_objects[index]
    }

    /// Moon `index`. Panics when out of range.
    pub fn moon_object(&self, index: usize) -> &MoonObject {
        &self.moon_objects[index]
    }

    /// Star object `index`. Panics when out of range.
    pub fn star_object(&self, index: usize) -> &StarObject {
        &self.star_objects[index]
    }

    /// Whether this sky was generated with space objects (and therefore a
    /// sun).
    pub fn has_sun(&self) -> bool {
        self.sun_entry_index.is_some()
    }

    /// Registry index of the sun image, when present.
    pub fn sun_entry_index(&self) -> Option<usize> {
        self.sun_entry_index
    }

    /// Pixels of single-image registry entry `index`. Panics when out of
    /// range.
    pub fn texture(&self, index: usize) -> &PixelBuffer {
        self.registry.image(index)
    }

    /// Frame count of set entry `index`. Panics when out of range.
    pub fn texture_set_len(&self, index: usize) -> usize {
        self.registry.set_len(index)
    }

    /// Frame `frame` of set entry `index`. Panics when out of range.
    pub fn texture_set_frame(&self, index: usize, frame: usize) -> &PixelBuffer {
        self.registry.set_frame(index, frame)
    }

    /// The texture registry backing this sky.
    pub fn registry(&self) -> &TextureRegistry {
        &self.registry
    }

    /// Advance animated objects by `dt` seconds.
    ///
    /// The only mutation after construction. Must not run concurrently with
    /// itself or with generation; the sky belongs to a single caller.
    pub fn tick(&mut self, dt: f64) {
        let registry = &self.registry;
        for anim in &mut self.animated_land_objects {
            let frame_count = registry.set_len(anim.set_entry_index());
            anim.update(dt, frame_count);
        }
    }
}
