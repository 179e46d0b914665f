//! Conversions between the three coordinate spaces a HUD lives in:
//!
//! - **pixel space**: the physical canvas, Y-down, origin top-left;
//! - **HUD space**: the virtual resolution widgets are laid out in, Y-down.
//!   Coincides with pixel space when no custom resolution is set;
//! - **scenegraph space**: the 3D engine's overlay units, Y-up, integral.
//!
//! A converter is a value constructed from the owning HUD's current canvas
//! size and declared virtual resolution; every method is pure.

use crate::geometry::{Point, Size};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateConverter {
    canvas: Size,
    resolution: Option<Size>,
}

impl CoordinateConverter {
    pub const fn new(canvas: Size, resolution: Option<Size>) -> Self {
        Self { canvas, resolution }
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// The space widgets are laid out in: the virtual resolution when one is
    /// set, the canvas otherwise.
    pub fn hud_space(&self) -> Size {
        self.resolution.unwrap_or(self.canvas)
    }

    pub fn pixel_to_hud(&self, p: Point) -> Point {
        match self.resolution {
            Some(resolution) => Point {
                x: p.x * resolution.width / self.canvas.width,
                y: p.y * resolution.height / self.canvas.height,
            }
            .round(),
            None => p.round(),
        }
    }

    pub fn hud_to_pixel(&self, p: Point) -> Point {
        match self.resolution {
            Some(resolution) => Point {
                x: p.x * self.canvas.width / resolution.width,
                y: p.y * self.canvas.height / resolution.height,
            }
            .round(),
            None => p.round(),
        }
    }

    /// HUD space is Y-down, the scenegraph overlay is Y-up; the result is
    /// rounded to whole scenegraph units.
    pub fn hud_to_scene(&self, p: Point) -> Point {
        let space = self.hud_space();
        Point {
            x: p.x,
            y: space.height - p.y,
        }
        .round()
    }

    pub fn scene_to_hud(&self, p: Point) -> Point {
        // The flip is its own inverse.
        self.hud_to_scene(p)
    }

    pub fn pixel_to_scene(&self, p: Point) -> Point {
        self.hud_to_scene(self.pixel_to_hud(p))
    }
}
