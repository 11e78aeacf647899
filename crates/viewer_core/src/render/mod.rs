//! # Rendering System
//!
//! Software rasterization onto a simulated pixel grid.
//!
//! ## Architecture
//!
//! - **PixelGrid**: the cell buffer with line, circle and supersampling primitives
//! - **PixelSink**: presentation collaborator that receives every written cell as a quad
//! - **Showcase**: the fixed set of diagnostic strokes drawn on the viewer's whiteboard
//!
//! The grid knows nothing about windows or graphics contexts. Whatever
//! turns quads into visible geometry lives behind [`PixelSink`].

pub mod pixel_grid;
pub mod sink;
pub mod showcase;

pub use pixel_grid::{CircleReflection, PixelGrid};
pub use sink::{LogSink, NullSink, PixelQuad, PixelSink};
pub use showcase::{draw_showcase, Primitive, Stroke, SHOWCASE};
