//! Static data tables naming the sky's source artwork.
//!
//! The original engine read these strings out of the executable at startup.
//! Here they are plain data with built-in defaults, overridable from a RON
//! file for modified or re-extracted game data. Every lookup is
//! bounds-checked; a miss means the tables are corrupt and generation stops.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ClimateKind, SkyError};

/// Filename-template parameters for one climate's distant mountains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountainTraits {
    /// Index into [`SkyTables::distant_mountain_filenames`].
    pub filename_index: usize,
    /// Byte position in the template where variant digits are spliced.
    pub position: usize,
    /// Number of filename variants; variant values are 1-based.
    pub variation: u32,
    /// Width of the digit field in the template.
    pub max_digits: usize,
}

/// Every filename and template the sky generator draws from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkyTables {
    /// Mountain template traits per climate.
    pub mountain_traits: Vec<(ClimateKind, MountainTraits)>,
    /// Mountain filename templates, indexed by
    /// [`MountainTraits::filename_index`].
    pub distant_mountain_filenames: Vec<String>,
    /// Animated land mass filenames, indexed by distance class (near, mid,
    /// far).
    pub animated_land_filenames: Vec<String>,
    /// Cloud filename template.
    pub cloud_filename: String,
    /// Moon frame-set filenames (first moon, second moon).
    pub moon_filenames: Vec<String>,
    /// Large-star filename template; its digit `1` is replaced by the
    /// 1-based star type.
    pub star_filename: String,
    /// Sun filename.
    pub sun_filename: String,
}

impl Default for SkyTables {
    fn default() -> Self {
        Self {
            mountain_traits: vec![
                (
                    ClimateKind::Temperate,
                    MountainTraits {
                        filename_index: 2,
                        position: 4,
                        variation: 10,
                        max_digits: 2,
                    },
                ),
                (
                    ClimateKind::Desert,
                    MountainTraits {
                        filename_index: 1,
                        position: 6,
                        variation: 4,
                        max_digits: 1,
                    },
                ),
                (
                    ClimateKind::Mountain,
                    MountainTraits {
                        filename_index: 0,
                        position: 6,
                        variation: 11,
                        max_digits: 2,
                    },
                ),
            ],
            distant_mountain_filenames: vec![
                "MOUNTM00.IMG".into(),
                "MOUNTD0.IMG".into(),
                "TEMP00.IMG".into(),
            ],
            animated_land_filenames: vec![
                "VOLCANOA.DFA".into(),
                "VOLCANOB.DFA".into(),
                "VOLCANOC.DFA".into(),
            ],
            cloud_filename: "CLOUD00.IMG".into(),
            moon_filenames: vec!["MOON1.DFA".into(), "MOON2.DFA".into()],
            star_filename: "STAR1.IMG".into(),
            sun_filename: "SUN.IMG".into(),
        }
    }
}

impl SkyTables {
    /// Mountain traits for `climate`, or a fatal error when the table has no
    /// row for it.
    pub fn traits_for(&self, climate: ClimateKind) -> Result<&MountainTraits, SkyError> {
        self.mountain_traits
            .iter()
            .find(|(c, _)| *c == climate)
            .map(|(_, traits)| traits)
            .ok_or(SkyError::UnknownClimate(climate))
    }

    /// Parse tables from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, SkyError> {
        ron::from_str(text).map_err(SkyError::TableParse)
    }

    /// Load tables from a RON file.
    pub fn load(path: &Path) -> Result<Self, SkyError> {
        let text = std::fs::read_to_string(path).map_err(SkyError::TableRead)?;
        Self::from_ron_str(&text)
    }
}

/// Entry of an indexed filename table, or a fatal error naming the table.
pub(crate) fn filename_entry<'a>(
    table: &'static str,
    filenames: &'a [String],
    index: usize,
) -> Result<&'a str, SkyError> {
    filenames
        .get(index)
        .map(String::as_str)
        .ok_or(SkyError::MissingFilenameEntry { table, index })
}
