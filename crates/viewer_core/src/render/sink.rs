//! Presentation sink for written raster cells
//!
//! Every cell the [`PixelGrid`](super::PixelGrid) stores is also forwarded as
//! a flat-colored quad in world space. What happens to the quad (immediate
//! mode drawing, batching, logging, nothing) is up to the sink.

use crate::foundation::math::{Vec2, Vec4};
use crate::foundation::Color;

/// A single written cell, expressed as a square in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelQuad {
    /// Grid column of the cell
    pub x: i32,
    /// Grid row of the cell
    pub y: i32,
    /// Lower-left corner in world units (`cell * pixel_size`)
    pub origin: Vec2,
    /// Edge length in world units
    pub size: f32,
    /// Color as stored in the grid
    pub color: Color,
}

impl PixelQuad {
    /// The four corners, counter-clockwise from the origin
    pub fn corners(&self) -> [Vec2; 4] {
        let o = self.origin;
        let s = self.size;
        [
            o,
            Vec2::new(o.x + s, o.y),
            Vec2::new(o.x + s, o.y + s),
            Vec2::new(o.x, o.y + s),
        ]
    }

    /// Color in `[0, 1]` with opaque alpha, ready for a graphics API
    pub fn normalized_color(&self) -> Vec4 {
        self.color.to_normalized()
    }
}

/// Receiver of written cells
pub trait PixelSink {
    /// Present one written cell
    fn fill_quad(&mut self, quad: PixelQuad);
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PixelSink for NullSink {
    fn fill_quad(&mut self, _quad: PixelQuad) {}
}

/// Recording sink, mostly useful for tests and batching
impl PixelSink for Vec<PixelQuad> {
    fn fill_quad(&mut self, quad: PixelQuad) {
        self.push(quad);
    }
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn fill_quad(&mut self, quad: PixelQuad) {
        (**self).fill_quad(quad);
    }
}

/// Sink that traces every quad through the `log` facade and counts them
#[derive(Debug, Default)]
pub struct LogSink {
    quads: usize,
}

impl LogSink {
    /// Create a new logging sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of quads received so far
    pub fn quad_count(&self) -> usize {
        self.quads
    }
}

impl PixelSink for LogSink {
    fn fill_quad(&mut self, quad: PixelQuad) {
        self.quads += 1;
        log::trace!(
            "quad ({}, {}) at ({:.3}, {:.3}) size {:.3} color {:?}",
            quad.x, quad.y, quad.origin.x, quad.origin.y, quad.size, quad.color
        );
    }
}
