//! Math utilities and types
//!
//! Provides the small set of math types the material system needs: vectors,
//! matrices for texture-coordinate transforms, and scalar helpers.

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math utility functions
pub mod utils {
    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Clamp a value to the unit interval
    pub fn clamp01(value: f32) -> f32 {
        clamp(value, 0.0, 1.0)
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

/// Extension trait for Mat4 with texture-coordinate helpers
pub trait Mat4Ext {
    /// Scale texture coordinates by `sx` and `sy`, leaving Z untouched
    fn uv_scale(sx: f32, sy: f32) -> Mat4;

    /// Uniform texture-coordinate tiling in both axes
    fn uv_tiling(scale: f32) -> Mat4 {
        Self::uv_scale(scale, scale)
    }

    /// Read back the X/Y scale factors of a diagonal texture transform
    fn uv_scale_factors(&self) -> Vec2;
}

impl Mat4Ext for Mat4 {
    fn uv_scale(sx: f32, sy: f32) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::new(sx, sy, 1.0))
    }

    fn uv_scale_factors(&self) -> Vec2 {
        Vec2::new(self[(0, 0)], self[(1, 1)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp01() {
        assert_eq!(utils::clamp01(-0.5), 0.0);
        assert_eq!(utils::clamp01(0.25), 0.25);
        assert_eq!(utils::clamp01(3.0), 1.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_relative_eq!(utils::lerp(1.0, 0.0, 0.0), 1.0);
        assert_relative_eq!(utils::lerp(1.0, 0.0, 1.0), 0.0);
        assert_relative_eq!(utils::lerp(1.0, 0.0, 0.4), 0.6, epsilon = 1e-6);
    }

    #[test]
    fn test_uv_tiling_matrix() {
        let m = Mat4::uv_tiling(3.0);
        assert_relative_eq!(m.uv_scale_factors(), Vec2::new(3.0, 3.0));
        assert_relative_eq!(m[(2, 2)], 1.0);
        assert_relative_eq!(m[(3, 3)], 1.0);

        // Applying the transform to a UV point tiles it
        let uv = m.transform_point(&nalgebra::Point3::new(0.5, 0.25, 0.0));
        assert_relative_eq!(uv.x, 1.5);
        assert_relative_eq!(uv.y, 0.75);
    }
}
