//! Math utilities and types
//!
//! Vector aliases shared by the geometry buffers and the pixel sink.

pub use nalgebra::{Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// Math utility functions
pub mod utils {
    /// Round to the nearest integer, with halves going up (`floor(v + 0.5)`).
    ///
    /// Unlike [`f32::round`], `-0.5` rounds to `0` rather than `-1`.
    pub fn round_half_up(value: f32) -> i32 {
        (value + 0.5).floor() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::utils::round_half_up;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(0.49), 0);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-0.51), -1);
        assert_eq!(round_half_up(2.0), 2);
    }
}
