//! Unit-sphere points and the two axis rotations used to orient them.
//!
//! Points are plain `glam::Vec3` values. The rotations are exposed through the
//! [`Rotate`] extension trait so call sites read as a chain:
//! `sphere_point(lat, lon).rotate_x(pitch).rotate_y(yaw)`.

use glam::{Mat3, Vec3};

/// A 3D point in the right-handed model space (Y up).
pub type Vector3 = Vec3;

pub trait Rotate {
    /// Rotate about the X axis: `(x, y·cos − z·sin, y·sin + z·cos)`.
    fn rotate_x(self, angle: f32) -> Self;
    /// Rotate about the Y axis: `(x·cos + z·sin, y, −x·sin + z·cos)`.
    fn rotate_y(self, angle: f32) -> Self;

    /// Apply the camera orientation: pitch about X first, then yaw about Y.
    fn orient(self, pitch: f32, yaw: f32) -> Self
    where
        Self: Sized,
    {
        self.rotate_x(pitch).rotate_y(yaw)
    }
}

impl Rotate for Vec3 {
    #[inline]
    fn rotate_x(self, angle: f32) -> Self {
        Mat3::from_rotation_x(angle) * self
    }

    #[inline]
    fn rotate_y(self, angle: f32) -> Self {
        Mat3::from_rotation_y(angle) * self
    }
}

/// Point on the unit sphere for a latitude/longitude pair given in degrees.
pub fn sphere_point(lat_deg: i32, lon_deg: i32) -> Vector3 {
    let lat = (lat_deg as f32).to_radians();
    let lon = (lon_deg as f32).to_radians();
    Vec3::new(lat.cos() * lon.cos(), lat.sin(), lat.cos() * lon.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f32 = 1e-5;

    fn samples() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.3, -0.7, 0.2),
            Vec3::new(-12.5, 4.0, 9.25),
        ]
    }

    #[test]
    fn zero_angle_is_identity() {
        for v in samples() {
            assert!(v.rotate_x(0.0).abs_diff_eq(v, EPS));
            assert!(v.rotate_y(0.0).abs_diff_eq(v, EPS));
            assert!(v.orient(0.0, 0.0).abs_diff_eq(v, EPS));
        }
    }

    #[test]
    fn rotations_preserve_length() {
        for v in samples() {
            for angle in [-3.0_f32, -1.5, -0.01, 0.3, 1.0, 2.7, 10.0] {
                let tol = 1e-5 * v.length().max(1.0);
                assert_abs_diff_eq!(v.rotate_x(angle).length(), v.length(), epsilon = tol);
                assert_abs_diff_eq!(v.rotate_y(angle).length(), v.length(), epsilon = tol);
            }
        }
    }

    #[test]
    fn rotate_x_matches_component_formula() {
        let v = Vec3::new(0.4, 0.5, -0.6);
        let t = 0.7_f32;
        let (s, c) = t.sin_cos();
        let expected = Vec3::new(v.x, v.y * c - v.z * s, v.y * s + v.z * c);
        assert!(v.rotate_x(t).abs_diff_eq(expected, EPS));
    }

    #[test]
    fn rotate_y_matches_component_formula() {
        let v = Vec3::new(0.4, 0.5, -0.6);
        let t = -1.1_f32;
        let (s, c) = t.sin_cos();
        let expected = Vec3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c);
        assert!(v.rotate_y(t).abs_diff_eq(expected, EPS));
    }

    #[test]
    fn orient_applies_pitch_before_yaw() {
        // Pitch a quarter turn takes +Y to +Z, then yaw a quarter turn takes +Z to +X.
        let half_pi = std::f32::consts::FRAC_PI_2;
        let v = Vec3::Y.orient(half_pi, half_pi);
        assert!(v.abs_diff_eq(Vec3::X, EPS));

        // The opposite order leaves +Y untouched by yaw, so pitch alone takes it to +Z.
        let swapped = Vec3::Y.rotate_y(half_pi).rotate_x(half_pi);
        assert!(swapped.abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn sphere_point_lands_on_unit_sphere() {
        assert!(sphere_point(0, 0).abs_diff_eq(Vec3::X, EPS));
        assert!(sphere_point(90, 0).abs_diff_eq(Vec3::Y, EPS));
        assert!(sphere_point(0, 90).abs_diff_eq(Vec3::Z, EPS));
        for lat in (-90..=90).step_by(30) {
            for lon in (-180..=180).step_by(45) {
                assert_abs_diff_eq!(sphere_point(lat, lon).length(), 1.0, epsilon = EPS);
            }
        }
    }
}
