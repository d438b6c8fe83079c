//! # sprite-anim
//!
//! Sprite-sheet grid addressing and frame timing for 2D animation.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Slicing a sprite sheet into a uniform grid and picking frames with
//!   compact specs like `"1-8"` or `"10-7"` (reversed)
//! - Normalizing per-frame durations given as a single value, a list, or
//!   ranges of frames
//! - Driving an animation forward in time with looping, pausing and seeking
//! - Drawing the current frame through a pluggable backend
//!
//! The crate never touches pixels itself. The host supplies a
//! [`FrameBackend`] and feeds elapsed time to [`Animation::update`].
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for layouts, specs and durations
//! - `toml` - Load sheet descriptions with [`SheetDetails::from_toml_str`]
//! - `web` - Enable web/WASM canvas rendering support
//!
//! ## Example
//!
//! ```rust
//! use sprite_anim::render::{CommandBackend, DrawList};
//! use sprite_anim::{axes, Animation, Grid, GridLayout, KeyedDurations};
//!
//! let layout = GridLayout::new(32, 32, 1024, 768).with_origin(3, 3).with_border(1);
//! let mut grid = Grid::new(CommandBackend, layout).unwrap();
//!
//! // Column 18 down rows 8-11, then back up rows 10-7
//! let spin = grid.get_frames(&axes![18, "8-11", 18, "10-7"]).unwrap();
//! let mut spin = Animation::new(spin, 0.2).unwrap();
//!
//! // Longer pauses on the first and last frames
//! let durations = KeyedDurations::new().with(1, 1.0).with("2-7", 0.1).with(8, 1.0);
//! let dive = Animation::new(grid.get_frames(&axes!["1-8", 2]).unwrap(), durations).unwrap();
//!
//! let mut list = DrawList::new();
//! spin.update(0.5);
//! spin.draw(&grid, &mut list, "media/1945.png", 0.0, 0.0).unwrap();
//! dive.draw(&grid, &mut list, "media/1945.png", 75.0, 50.0).unwrap();
//! assert_eq!(list.len(), 2);
//! ```

mod animation;
mod duration;
mod error;
mod frame;
mod grid;
mod interval;
pub mod render;
mod sheet;
mod timeline;

pub use animation::{Animation, Status};
pub use duration::{DurationTable, Durations, KeyedDurations};
pub use error::{Error, Result};
pub use frame::{Frame, FrameBackend, FrameId};
pub use grid::{Grid, GridLayout};
pub use interval::{parse_interval, AxisSpec, Interval};
pub use sheet::{AnimationDetails, SheetDetails};
pub use timeline::{seek, Timeline};

#[cfg(feature = "web")]
pub use render::web::CanvasBackend;
