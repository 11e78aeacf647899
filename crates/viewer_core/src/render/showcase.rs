//! Diagnostic primitives and the whiteboard showcase
//!
//! The scene viewer redraws a fixed set of colored lines and circles onto
//! its raster map every frame to demonstrate the rasterizer. Shapes are a
//! closed set, so they are modelled as an enum rather than a trait.

use super::pixel_grid::PixelGrid;
use super::sink::PixelSink;
use crate::foundation::Color;

/// A rasterizable shape in grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// DDA line between two cells
    Line {
        /// Start column
        x0: i32,
        /// Start row
        y0: i32,
        /// End column
        x1: i32,
        /// End row
        y1: i32,
    },
    /// Midpoint circle outline
    Circle {
        /// Center column
        x: i32,
        /// Center row
        y: i32,
        /// Radius in cells
        radius: i32,
    },
}

impl Primitive {
    /// Rasterize onto `grid` using the grid's current color
    pub fn rasterize<S: PixelSink>(&self, grid: &mut PixelGrid<S>) {
        match *self {
            Primitive::Line { x0, y0, x1, y1 } => grid.draw_line(x0, y0, x1, y1),
            Primitive::Circle { x, y, radius } => grid.draw_circle(x, y, radius),
        }
    }
}

/// A primitive together with the color it is drawn in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Drawing color
    pub color: Color,
    /// Shape to draw
    pub primitive: Primitive,
}

impl Stroke {
    /// Set the grid's current color and rasterize the shape
    pub fn draw<S: PixelSink>(&self, grid: &mut PixelGrid<S>) {
        grid.set_color(self.color);
        self.primitive.rasterize(grid);
    }
}

/// The sequence drawn on the viewer's whiteboard, in drawing order
pub const SHOWCASE: [Stroke; 6] = [
    Stroke {
        color: Color::new(255.0, 255.0, 0.0, 0.0),
        primitive: Primitive::Circle { x: 0, y: 0, radius: 15 },
    },
    Stroke {
        color: Color::new(255.0, 0.0, 0.0, 0.0),
        primitive: Primitive::Line { x0: 0, y0: 0, x1: 14, y1: 9 },
    },
    Stroke {
        color: Color::new(255.0, 0.0, 255.0, 0.0),
        primitive: Primitive::Line { x0: -4, y0: 20, x1: 35, y1: 5 },
    },
    Stroke {
        color: Color::new(70.0, 30.0, 255.0, 0.0),
        primitive: Primitive::Line { x0: 30, y0: -3, x1: 33, y1: 34 },
    },
    Stroke {
        color: Color::new(10.0, 30.0, 100.0, 0.0),
        primitive: Primitive::Line { x0: -3, y0: 23, x1: 35, y1: 23 },
    },
    Stroke {
        color: Color::new(145.0, 20.0, 0.0, 0.0),
        primitive: Primitive::Circle { x: 17, y: 17, radius: 10 },
    },
];

/// Draw every [`SHOWCASE`] stroke onto `grid`
pub fn draw_showcase<S: PixelSink>(grid: &mut PixelGrid<S>) {
    for stroke in &SHOWCASE {
        stroke.draw(grid);
    }
}
