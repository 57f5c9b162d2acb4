/// Perspective projection construction
use nalgebra::Matrix4;

/// Parameters for the perspective projection matrix.
///
/// `aspect` is grid height over width, inverted relative to the usual
/// width/height convention to compensate for character cells being taller
/// than they are wide.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// Default projection for a character grid of the given dimensions.
    pub fn for_grid(width: usize, height: usize) -> Self {
        Self {
            fov_degrees: 90.0,
            aspect: height as f32 / width as f32,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Build the projection matrix. Constructed once per renderer and
    /// reused unchanged every frame.
    ///
    /// The homogeneous term in the last row copies z into w, which is what
    /// triggers the perspective divide in `transform::apply`.
    pub fn matrix(&self) -> Matrix4<f32> {
        let fov_scale = 1.0 / (self.fov_degrees.to_radians() * 0.5).tan();
        let depth_scale = self.far / (self.far - self.near);

        Matrix4::new(
            self.aspect * fov_scale, 0.0, 0.0, 0.0,
            0.0, fov_scale, 0.0, 0.0,
            0.0, 0.0, depth_scale, -self.far * self.near / (self.far - self.near),
            0.0, 0.0, 1.0, 0.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::apply;
    use nalgebra::Point3;

    #[test]
    fn aspect_is_height_over_width() {
        let projection = Projection::for_grid(80, 24);
        assert!((projection.aspect - 24.0 / 80.0).abs() < 1e-6);
    }

    #[test]
    fn on_axis_point_projects_to_center() {
        let m = Projection::for_grid(80, 24).matrix();
        let p = apply(&m, &Point3::new(0.0, 0.0, 4.0));
        assert!(p.x.abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn foreshortening_shrinks_with_depth() {
        let m = Projection::for_grid(80, 24).matrix();
        let near = apply(&m, &Point3::new(1.0, 1.0, 2.0));
        let far = apply(&m, &Point3::new(1.0, 1.0, 8.0));
        assert!(near.x.abs() > far.x.abs());
        assert!(near.y.abs() > far.y.abs());
    }

    #[test]
    fn projected_depth_is_monotone() {
        // Painter's ordering sorts projected z, so the mapping from view
        // depth to projected depth must preserve order past the near plane.
        let m = Projection::for_grid(80, 24).matrix();
        let mut previous = f32::NEG_INFINITY;
        for z in [0.5, 1.0, 2.0, 4.0, 10.0, 100.0] {
            let p = apply(&m, &Point3::new(0.0, 0.0, z));
            assert!(p.z > previous, "depth ordering broke at z = {}", z);
            previous = p.z;
        }
    }
}
