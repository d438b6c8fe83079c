//! Frame descriptors and the drawing capability they rely on.

use crate::{Error, Result};

/// Stable handle to a frame stored in a [`Grid`](crate::Grid).
///
/// Two handles from the same grid compare equal exactly when they refer to
/// the same cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub(crate) usize);

impl FrameId {
    /// Position of the frame in its grid's arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A rectangular region of a sprite sheet plus its backing handle.
#[derive(Clone, Debug)]
pub struct Frame<H> {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    sheet_width: u32,
    sheet_height: u32,
    backing: H,
}

impl<H> Frame<H> {
    /// Create a frame, asking `backend` for its backing handle.
    ///
    /// The region must lie within the sheet.
    pub fn new<B>(
        backend: &B,
        (x, y, width, height): (u32, u32, u32, u32),
        sheet_width: u32,
        sheet_height: u32,
    ) -> Result<Self>
    where
        B: FrameBackend<Handle = H> + ?Sized,
    {
        let fits = |origin: u32, size: u32, limit: u32| {
            origin.checked_add(size).is_some_and(|end| end <= limit)
        };
        if !fits(x, width, sheet_width) || !fits(y, height, sheet_height) {
            return Err(Error::FrameOutOfBounds {
                x,
                y,
                width,
                height,
                sheet_width,
                sheet_height,
            });
        }

        let backing = backend.create_backing(width, height)?;
        Ok(Self {
            x,
            y,
            width,
            height,
            sheet_width,
            sheet_height,
            backing,
        })
    }

    /// Offset from the left of the sheet in pixels.
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Offset from the top of the sheet in pixels.
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full sheet width in pixels.
    #[inline]
    pub fn sheet_width(&self) -> u32 {
        self.sheet_width
    }

    /// Full sheet height in pixels.
    #[inline]
    pub fn sheet_height(&self) -> u32 {
        self.sheet_height
    }

    /// The source rectangle as `(x, y, width, height)`.
    #[inline]
    pub fn viewport(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }

    /// The handle created by the backend when the frame was built.
    #[inline]
    pub fn backing(&self) -> &H {
        &self.backing
    }
}

/// Drawing capability supplied by the host rendering layer.
///
/// A [`Grid`](crate::Grid) is generic over its backend. The backend creates
/// one backing handle per frame and draws a frame's region of the sheet
/// image onto a canvas. Both methods default to
/// [`Error::UnimplementedCapability`], so a backend only overrides what it
/// actually supports.
///
/// ## Example
///
/// ```rust
/// use sprite_anim::{Frame, FrameBackend, Result};
///
/// struct Blitter;
///
/// impl FrameBackend for Blitter {
///     type Handle = ();
///     type Canvas = Vec<(u32, u32, f64, f64)>;
///     type Image = ();
///
///     fn create_backing(&self, _width: u32, _height: u32) -> Result<()> {
///         Ok(())
///     }
///
///     fn draw(&self, frame: &Frame<()>, canvas: &mut Self::Canvas, _: &(), x: f64, y: f64) -> Result<()> {
///         canvas.push((frame.x(), frame.y(), x, y));
///         Ok(())
///     }
/// }
/// ```
pub trait FrameBackend {
    /// Per-frame object created once at construction
    type Handle;
    /// Surface frames are drawn onto
    type Canvas;
    /// Sheet image frames are cut from
    type Image: ?Sized;

    /// Create the backing handle for a frame of the given size.
    fn create_backing(&self, width: u32, height: u32) -> Result<Self::Handle> {
        let _ = (width, height);
        Err(Error::UnimplementedCapability("create_backing"))
    }

    /// Draw `frame` from `image` onto `canvas` at `(x, y)`.
    fn draw(
        &self,
        frame: &Frame<Self::Handle>,
        canvas: &mut Self::Canvas,
        image: &Self::Image,
        x: f64,
        y: f64,
    ) -> Result<()> {
        let _ = (frame, canvas, image, x, y);
        Err(Error::UnimplementedCapability("draw"))
    }
}
