//! Error type shared by the grid, duration and animation modules.

use thiserror::Error;

/// Errors raised while building grids and animations or while drawing.
///
/// Every error is a precondition or construction failure. Nothing in the
/// crate retries or coerces; the error is returned to the caller as is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An axis specifier string does not match `a-b`
    #[error("Could not parse interval from \"{0}\"")]
    MalformedIntervalSpec(String),

    /// An even-length list of axis specifiers was expected
    #[error("Axis specifiers come in (x, y) pairs, got {count}")]
    UnpairedAxisSpec {
        /// Number of specifiers supplied
        count: usize,
    },

    /// The normalized duration table does not cover every frame exactly once
    #[error("Duration table covers {covered} frame(s), expected {expected}{}", stray_note(.stray))]
    DurationCoverageMismatch {
        /// Number of frames in the sequence
        expected: usize,
        /// Number of distinct valid indices produced by the duration spec
        covered: usize,
        /// First zero-based index a duration key names outside the sequence
        stray: Option<i64>,
    },

    /// A frame duration is negative or not finite
    #[error("Invalid duration {value} for frame {index}")]
    InvalidDuration {
        /// Zero-based frame index
        index: usize,
        /// Offending value
        value: f64,
    },

    /// A grid coordinate is outside the grid
    #[error("Index ({column}, {row}) out of range (grid is {columns}x{rows})")]
    IndexOutOfRange {
        /// Zero-based column
        column: i64,
        /// Zero-based row
        row: i64,
        /// Number of valid columns
        columns: u32,
        /// Number of valid rows
        rows: u32,
    },

    /// A position in a frame sequence or frame cache does not exist
    #[error("Position {position} out of range (length is {len})")]
    PositionOutOfRange {
        /// Zero-based position
        position: usize,
        /// Number of valid positions
        len: usize,
    },

    /// Frame width or height is zero
    #[error("Invalid frame size: {width}x{height}")]
    EmptyFrameSize {
        /// Frame width in pixels
        width: u32,
        /// Frame height in pixels
        height: u32,
    },

    /// A frame region would extend past the sheet edges
    #[error("Frame at ({x}, {y}) of size {width}x{height} exceeds sheet {sheet_width}x{sheet_height}")]
    FrameOutOfBounds {
        /// Left edge in pixels
        x: u32,
        /// Top edge in pixels
        y: u32,
        /// Frame width in pixels
        width: u32,
        /// Frame height in pixels
        height: u32,
        /// Sheet width in pixels
        sheet_width: u32,
        /// Sheet height in pixels
        sheet_height: u32,
    },

    /// An animation has no frames or a zero-length cycle
    #[error("Animation cycle is empty ({frames} frame(s), total duration {total})")]
    EmptyCycle {
        /// Number of frames
        frames: usize,
        /// Sum of all durations
        total: f64,
    },

    /// A frame backend does not provide the requested capability
    #[error("Frame backend does not implement \"{0}\"")]
    UnimplementedCapability(&'static str),

    /// The drawing backend reported a failure
    #[error("Backend error: {0}")]
    Backend(String),
}

fn stray_note(stray: &Option<i64>) -> String {
    match stray {
        Some(index) => format!(" (index {index} is outside the sequence)"),
        None => String::new(),
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
