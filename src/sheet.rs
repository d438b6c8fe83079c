use std::collections::BTreeMap;

use log::debug;

use crate::{Animation, AxisSpec, Durations, FrameBackend, Grid, GridLayout, Result};

/// One named animation in a sheet description.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationDetails {
    /// Flat `(x, y)` axis specifier pairs, as passed to [`Grid::get_frames`]
    pub frames: Vec<AxisSpec>,
    /// Frame durations
    pub durations: Durations,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flip_h: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flip_v: bool,
}

/// Sprite sheet description from a sheet `.toml` file.
///
/// Holds the grid geometry and any number of named animations cut from it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetDetails {
    /// Path of the sheet image, for the host to load
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: Option<String>,
    pub grid: GridLayout,
    #[cfg_attr(feature = "serde", serde(default))]
    pub animations: BTreeMap<String, AnimationDetails>,
}

impl SheetDetails {
    /// Parse a sheet `.toml` string into `SheetDetails`.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Build the grid described by this sheet.
    pub fn build_grid<B: FrameBackend>(&self, backend: B) -> Result<Grid<B>> {
        Grid::new(backend, self.grid)
    }

    /// Build every named animation, creating frames in `grid` as needed.
    ///
    /// Stops at the first animation that fails to build.
    pub fn build_animations<B: FrameBackend>(&self, grid: &mut Grid<B>) -> Result<BTreeMap<String, Animation>> {
        let mut animations = BTreeMap::new();
        for (name, details) in &self.animations {
            let frames = grid.get_frames(&details.frames)?;
            let mut animation = Animation::new(frames, details.durations.clone())?;
            if details.flip_h {
                animation.flip_h();
            }
            if details.flip_v {
                animation.flip_v();
            }
            debug!("built animation \"{name}\"");
            animations.insert(name.clone(), animation);
        }
        Ok(animations)
    }
}
