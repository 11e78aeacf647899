//! Four-component color used by the raster grid and materials
//!
//! Channel units are mixed: `r`, `g` and `b` are conventionally in `[0, 255]`
//! while `a` lives in `[0, 1]`. Materials parsed from MTL files carry the
//! file's `[0, 1]` values unchanged in the same struct, so the convention is
//! a caller-side agreement rather than something this type enforces.

use serde::{Deserialize, Serialize};

use super::math::Vec4;

/// RGBA color with `f32` components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Black with full alpha
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a color from its four components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color (alpha 1.0)
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Color handed to a presentation layer: channels divided by 255, alpha forced to 1.0
    pub fn to_normalized(self) -> Vec4 {
        Vec4::new(self.r / 255.0, self.g / 255.0, self.b / 255.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}
