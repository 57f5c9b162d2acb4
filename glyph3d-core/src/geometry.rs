/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};

/// A triangle face defined by three corners in object space.
///
/// Corners are wound clockwise as seen from outside the solid; the cull and
/// shading stages rely on that winding to recover the outward normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Point3<f32>; 3],
}

impl Triangle {
    pub fn new(p1: Point3<f32>, p2: Point3<f32>, p3: Point3<f32>) -> Self {
        Self {
            points: [p1, p2, p3],
        }
    }

    /// Apply a point transform to every corner, yielding a new triangle.
    pub fn map<F: Fn(Point3<f32>) -> Point3<f32>>(&self, f: F) -> Self {
        Self {
            points: [f(self.points[0]), f(self.points[1]), f(self.points[2])],
        }
    }

    /// Unit outward normal from the corner winding.
    ///
    /// Returns `None` for degenerate (zero-area) triangles, which have no
    /// usable normal.
    pub fn face_normal(&self) -> Option<Vector3<f32>> {
        let edge1 = self.points[1] - self.points[0];
        let edge2 = self.points[2] - self.points[0];
        let normal = edge1.cross(&edge2);
        let len = normal.norm();

        if len > 1e-6 {
            Some(normal / len)
        } else {
            None
        }
    }
}

/// A screen-space triangle that survived culling, carrying the glyph the
/// shading stage assigned to it. Lives only between the pipeline and the
/// rasterization dispatch of a single frame.
#[derive(Debug, Clone, Copy)]
pub struct ShadedTriangle {
    pub points: [Point3<f32>; 3],
    pub glyph: char,
}

impl ShadedTriangle {
    /// Average depth of the three corners, used for painter's ordering.
    pub fn average_depth(&self) -> f32 {
        (self.points[0].z + self.points[1].z + self.points[2].z) / 3.0
    }
}

/// A 3D mesh composed of triangles. Immutable while rendering; the pipeline
/// transforms copies of its triangles each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// The unit cube spanning [0,1] on each axis, two triangles per face.
    pub fn unit_cube() -> Self {
        let mut mesh = Self::with_capacity(12);

        // Front face (z = 0)
        mesh.add_triangle(Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ));

        // Right face (x = 1)
        mesh.add_triangle(Triangle::new(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        ));
        mesh.add_triangle(Triangle::new(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
        ));

        // Back face (z = 1)
        mesh.add_triangle(Triangle::new(
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ));
        mesh.add_triangle(Triangle::new(
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ));

        // Left face (x = 0)
        mesh.add_triangle(Triangle::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ));

        // Top face (y = 1)
        mesh.add_triangle(Triangle::new(
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
        ));
        mesh.add_triangle(Triangle::new(
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 0.0),
        ));

        // Bottom face (y = 0)
        mesh.add_triangle(Triangle::new(
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ));

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
