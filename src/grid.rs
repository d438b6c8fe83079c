//! Uniform sprite-sheet grids with memoized frame creation.

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};

use crate::{parse_interval, AxisSpec, Error, Frame, FrameBackend, FrameId, Result};

/// Geometry of a sprite sheet sliced into equally sized frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    /// Width of one frame in pixels
    pub frame_width: u32,
    /// Height of one frame in pixels
    pub frame_height: u32,
    /// Width of the whole sheet in pixels
    pub sheet_width: u32,
    /// Height of the whole sheet in pixels
    pub sheet_height: u32,
    /// Left coordinate of the grid origin inside the sheet
    #[cfg_attr(feature = "serde", serde(default))]
    pub left: u32,
    /// Top coordinate of the grid origin inside the sheet
    #[cfg_attr(feature = "serde", serde(default))]
    pub top: u32,
    /// Gap between frames in pixels
    #[cfg_attr(feature = "serde", serde(default))]
    pub border: u32,
}

impl GridLayout {
    /// Layout with the origin at `(0, 0)` and no border.
    pub fn new(frame_width: u32, frame_height: u32, sheet_width: u32, sheet_height: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            sheet_width,
            sheet_height,
            left: 0,
            top: 0,
            border: 0,
        }
    }

    /// Move the grid origin.
    pub fn with_origin(mut self, left: u32, top: u32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Set the gap between frames.
    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }
}

/// A sprite sheet partitioned into rows and columns of frames.
///
/// Frames are created lazily the first time a cell is requested and live as
/// long as the grid. Cell `(1, 1)` in a spec is the first column of the first
/// row.
///
/// ## Example
///
/// ```rust
/// use sprite_anim::render::CommandBackend;
/// use sprite_anim::{axes, Grid, GridLayout};
///
/// let layout = GridLayout::new(32, 32, 1024, 768).with_origin(3, 3).with_border(1);
/// let mut grid = Grid::new(CommandBackend, layout).unwrap();
/// assert_eq!((grid.columns(), grid.rows()), (32, 24));
///
/// // Columns 1-3 of row 5, then column 2 of row 5 again (ping-pong)
/// let frames = grid.get_frames(&axes!["1-3", 5, 2, 5]).unwrap();
/// assert_eq!(frames.len(), 4);
/// assert_eq!(frames[1], frames[3]);
/// assert_eq!(grid.cached_len(), 3);
/// ```
pub struct Grid<B: FrameBackend> {
    backend: B,
    layout: GridLayout,
    columns: u32,
    rows: u32,
    frames: Vec<Frame<B::Handle>>,
    index: HashMap<(u32, u32), FrameId>,
}

impl<B: FrameBackend> fmt::Debug for Grid<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("layout", &self.layout)
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("cached", &self.frames.len())
            .finish()
    }
}

impl<B: FrameBackend> Grid<B> {
    /// Create a grid over a sheet. No frames are built yet.
    pub fn new(backend: B, layout: GridLayout) -> Result<Self> {
        if layout.frame_width == 0 || layout.frame_height == 0 {
            return Err(Error::EmptyFrameSize {
                width: layout.frame_width,
                height: layout.frame_height,
            });
        }

        let columns = layout.sheet_width / layout.frame_width;
        let rows = layout.sheet_height / layout.frame_height;
        debug!(
            "grid of {columns}x{rows} cells, {}x{} each",
            layout.frame_width, layout.frame_height
        );

        Ok(Self {
            backend,
            layout,
            columns,
            rows,
            frames: Vec::new(),
            index: HashMap::new(),
        })
    }

    /// Number of cells along the x-axis.
    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cells along the y-axis.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// The layout this grid was built with.
    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// The drawing backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of frames created so far.
    #[inline]
    pub fn cached_len(&self) -> usize {
        self.frames.len()
    }

    /// Resolve a frame handle.
    #[inline]
    pub fn frame(&self, id: FrameId) -> Option<&Frame<B::Handle>> {
        self.frames.get(id.0)
    }

    /// Look up an already created frame by zero-based `(column, row)`.
    pub fn frame_at(&self, column: u32, row: u32) -> Option<FrameId> {
        self.index.get(&(column, row)).copied()
    }

    /// Collect frames from `(x, y)` axis specifier pairs.
    ///
    /// Each pair is expanded row by row: for every `y` in the second spec,
    /// every `x` in the first spec. Pairs are concatenated, so the same cell
    /// may appear more than once.
    pub fn get_frames(&mut self, specs: &[AxisSpec]) -> Result<Vec<FrameId>> {
        if specs.len() % 2 != 0 {
            return Err(Error::UnpairedAxisSpec { count: specs.len() });
        }

        let mut result = Vec::new();
        for pair in specs.chunks_exact(2) {
            let xs = parse_interval(&pair[0])?;
            let ys = parse_interval(&pair[1])?;
            for y in ys.indices() {
                for x in xs.indices() {
                    result.push(self.get_or_create(x, y)?);
                }
            }
        }
        Ok(result)
    }

    /// Draw a frame through the backend.
    ///
    /// `id` must come from this grid; ids are plain positions in its cache.
    pub fn draw_frame(&self, id: FrameId, canvas: &mut B::Canvas, image: &B::Image, x: f64, y: f64) -> Result<()> {
        let frame = self.frame(id).ok_or(Error::PositionOutOfRange {
            position: id.0,
            len: self.frames.len(),
        })?;
        self.backend.draw(frame, canvas, image, x, y)
    }

    fn get_or_create(&mut self, x: i64, y: i64) -> Result<FrameId> {
        let out_of_range = || Error::IndexOutOfRange {
            column: x,
            row: y,
            columns: self.columns,
            rows: self.rows,
        };
        let column = u32::try_from(x).ok().filter(|&c| c < self.columns).ok_or_else(out_of_range)?;
        let row = u32::try_from(y).ok().filter(|&r| r < self.rows).ok_or_else(out_of_range)?;

        if let Some(id) = self.frame_at(column, row) {
            return Ok(id);
        }

        let frame = self.create_frame(column, row)?;
        let id = FrameId(self.frames.len());
        self.frames.push(frame);
        self.index.insert((column, row), id);
        Ok(id)
    }

    fn create_frame(&self, column: u32, row: u32) -> Result<Frame<B::Handle>> {
        let l = &self.layout;
        let frame_x = l.left as u64 + column as u64 * l.frame_width as u64 + (column as u64 + 1) * l.border as u64;
        let frame_y = l.top as u64 + row as u64 * l.frame_height as u64 + (row as u64 + 1) * l.border as u64;
        trace!("creating frame ({column}, {row}) at ({frame_x}, {frame_y})");

        let saturate = |v: u64| u32::try_from(v).unwrap_or(u32::MAX);
        Frame::new(
            &self.backend,
            (saturate(frame_x), saturate(frame_y), l.frame_width, l.frame_height),
            l.sheet_width,
            l.sheet_height,
        )
    }
}
