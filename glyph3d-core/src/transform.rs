/// Homogeneous transforms and per-frame rotation state
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// Apply a 4x4 matrix to a point treated as (x, y, z, 1).
///
/// When the resulting w is nonzero the components are divided by it
/// (perspective divide); a zero w leaves them unscaled. The caller must
/// tolerate unnormalized output in that degenerate case.
pub fn apply(m: &Matrix4<f32>, p: &Point3<f32>) -> Point3<f32> {
    let v = m * Vector4::new(p.x, p.y, p.z, 1.0);

    if v.w != 0.0 {
        Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
    } else {
        Point3::new(v.x, v.y, v.z)
    }
}

/// Rotation about the Z axis by `theta` radians.
pub fn rotation_z(theta: f32) -> Matrix4<f32> {
    Matrix4::new_rotation(Vector3::new(0.0, 0.0, theta))
}

/// Rotation about the X axis by `theta` radians.
pub fn rotation_x(theta: f32) -> Matrix4<f32> {
    Matrix4::new_rotation(Vector3::new(theta, 0.0, 0.0))
}

/// The renderer's rotation angle, advancing by a fixed step each frame.
///
/// The angle grows without bound; trigonometric periodicity makes an
/// explicit modulo reduction unnecessary.
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    theta: f32,
    step: f32,
}

impl Spin {
    pub fn new(step: f32) -> Self {
        Self { theta: 0.0, step }
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Return the current angle and advance to the next frame's, so the
    /// first frame renders at theta = 0.
    pub fn advance(&mut self) -> f32 {
        let theta = self.theta;
        self.theta += self.step;
        theta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_is_deterministic() {
        let m = crate::Projection::for_grid(80, 24).matrix();
        let p = Point3::new(0.3, -0.7, 5.0);

        let a = apply(&m, &p);
        let b = apply(&m, &p);
        assert_eq!(a, b);
    }

    #[test]
    fn rotation_preserves_magnitude() {
        let samples = [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.3, -0.4, 1.2),
            Point3::new(-2.0, 5.0, -0.1),
        ];
        for theta in [0.0, 0.05, 1.0, 3.7, 42.0] {
            for m in [rotation_z(theta), rotation_x(theta * 0.5)] {
                for p in samples {
                    let rotated = apply(&m, &p);
                    let before = p.coords.norm();
                    let after = rotated.coords.norm();
                    assert!(
                        (before - after).abs() < 1e-5,
                        "theta {} changed |v| from {} to {}",
                        theta,
                        before,
                        after
                    );
                }
            }
        }
    }

    #[test]
    fn identity_rotation_at_zero_angle() {
        assert!((rotation_z(0.0) - Matrix4::identity()).norm() < 1e-6);
        assert!((rotation_x(0.0) - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn zero_w_leaves_components_unscaled() {
        // The projection matrix derives w from z, so a point on the camera
        // plane produces w = 0 and must pass through without the divide.
        let m = crate::Projection::for_grid(80, 24).matrix();
        let p = apply(&m, &Point3::new(2.0, 3.0, 0.0));

        let aspect = 24.0 / 80.0;
        assert!((p.x - 2.0 * aspect).abs() < 1e-6);
        assert!((p.y - 3.0).abs() < 1e-6);
    }

    #[test]
    fn spin_reports_angle_before_advancing() {
        let mut spin = Spin::new(0.05);
        assert_eq!(spin.advance(), 0.0);
        assert!((spin.advance() - 0.05).abs() < 1e-6);
        assert!((spin.theta() - 0.1).abs() < 1e-6);
    }
}
