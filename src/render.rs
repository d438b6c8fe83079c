//! Frame backends shipped with the crate.
//!
//! [`CommandBackend`] records platform-agnostic draw commands that a host can
//! replay on any rendering backend. [`NoBackend`] implements nothing and is
//! useful as a placeholder. With the `web` feature, [`web::CanvasBackend`]
//! draws straight onto an HTML canvas.

use crate::{Frame, FrameBackend, Result};

/// Backend with no capabilities.
///
/// Building a frame or drawing through it fails with
/// [`Error::UnimplementedCapability`](crate::Error::UnimplementedCapability).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBackend;

impl FrameBackend for NoBackend {
    type Handle = ();
    type Canvas = ();
    type Image = ();
}

/// Size of the backing surface a [`CommandBackend`] frame would need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackingSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// A single blit of a sheet region to a destination position.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    /// Key of the sheet image the region is cut from
    pub image: String,
    /// Source rectangle `(x, y, width, height)` in sheet pixels
    pub source: (u32, u32, u32, u32),
    /// Destination X position in pixels
    pub dest_x: f64,
    /// Destination Y position in pixels
    pub dest_y: f64,
}

/// Canvas for [`CommandBackend`]: the ordered list of recorded commands.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    /// Commands in submission order
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Create an empty draw list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded commands, typically once per host frame.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing has been drawn.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Backend that records draw commands instead of touching pixels.
///
/// Images are identified by a string key (usually the asset path).
///
/// ## Example
///
/// ```rust
/// use sprite_anim::render::{CommandBackend, DrawList};
/// use sprite_anim::{axes, Animation, Grid, GridLayout};
///
/// let mut grid = Grid::new(CommandBackend, GridLayout::new(32, 32, 384, 256)).unwrap();
/// let walk = Animation::new(grid.get_frames(&axes!["1-3", 1]).unwrap(), 0.15).unwrap();
///
/// let mut list = DrawList::new();
/// walk.draw(&grid, &mut list, "media/witch.png", 10.0, 20.0).unwrap();
///
/// assert_eq!(list.len(), 1);
/// assert_eq!(list.commands[0].source, (0, 0, 32, 32));
/// assert_eq!(list.commands[0].image, "media/witch.png");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandBackend;

impl FrameBackend for CommandBackend {
    type Handle = BackingSize;
    type Canvas = DrawList;
    type Image = str;

    fn create_backing(&self, width: u32, height: u32) -> Result<BackingSize> {
        Ok(BackingSize { width, height })
    }

    fn draw(&self, frame: &Frame<BackingSize>, canvas: &mut DrawList, image: &str, x: f64, y: f64) -> Result<()> {
        canvas.commands.push(DrawCommand {
            image: image.to_string(),
            source: frame.viewport(),
            dest_x: x,
            dest_y: y,
        });
        Ok(())
    }
}

/// Web-specific rendering implementation.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use crate::Error;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    /// Backend drawing frames from an `<img>` sheet onto a 2D canvas context.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct CanvasBackend;

    impl FrameBackend for CanvasBackend {
        type Handle = ();
        type Canvas = CanvasRenderingContext2d;
        type Image = HtmlImageElement;

        fn create_backing(&self, _width: u32, _height: u32) -> Result<()> {
            Ok(())
        }

        fn draw(
            &self,
            frame: &Frame<()>,
            canvas: &mut CanvasRenderingContext2d,
            image: &HtmlImageElement,
            x: f64,
            y: f64,
        ) -> Result<()> {
            let (sx, sy, sw, sh) = frame.viewport();
            let (sw, sh) = (sw as f64, sh as f64);
            canvas
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    image, sx as f64, sy as f64, sw, sh, x, y, sw, sh,
                )
                .map_err(|_| Error::Backend("Failed to draw image".to_string()))
        }
    }

    /// Get the 2D rendering context of a canvas element.
    ///
    /// ## Example
    ///
    /// ```rust,ignore
    /// use sprite_anim::render::web::{context_2d, CanvasBackend};
    ///
    /// let canvas: web_sys::HtmlCanvasElement = // ... get canvas element
    /// let mut ctx = context_2d(&canvas)?;
    /// animation.draw(&grid, &mut ctx, &sheet_image, 100.0, 400.0)?;
    /// ```
    pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
        canvas
            .get_context("2d")
            .map_err(|_| Error::Backend("Failed to get 2d context".to_string()))?
            .ok_or_else(|| Error::Backend("No 2d context available".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::Backend("Failed to cast to CanvasRenderingContext2d".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_command_backend_records() {
        let frame = Frame::new(&CommandBackend, (35, 3, 32, 32), 1024, 768).unwrap();
        let mut list = DrawList::new();
        assert!(list.is_empty());

        CommandBackend.draw(&frame, &mut list, "sheet", 75.0, 50.0).unwrap();
        CommandBackend.draw(&frame, &mut list, "sheet", 0.0, 0.0).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(
            list.commands[0],
            DrawCommand {
                image: "sheet".into(),
                source: (35, 3, 32, 32),
                dest_x: 75.0,
                dest_y: 50.0,
            }
        );

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_no_backend_draw() {
        struct Backing;
        impl FrameBackend for Backing {
            type Handle = ();
            type Canvas = ();
            type Image = ();

            fn create_backing(&self, _: u32, _: u32) -> Result<()> {
                Ok(())
            }
        }

        let frame = Frame::new(&Backing, (0, 0, 1, 1), 1, 1).unwrap();
        let result = NoBackend.draw(&frame, &mut (), &(), 0.0, 0.0);
        assert_eq!(result, Err(Error::UnimplementedCapability("draw")));
    }
}
