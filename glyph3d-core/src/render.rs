/// Per-frame rendering pipeline: rotate, cull, shade, sort, dispatch
use std::cmp::Ordering;

use nalgebra::{Matrix4, Point3, Vector3};

use crate::geometry::{Mesh, ShadedTriangle};
use crate::projection::Projection;
use crate::shade;
use crate::transform::{self, Spin};

/// The character grid the renderer draws into.
///
/// Coordinates are grid cells as floats; implementations round and clip as
/// needed. The grid's dimensions stay fixed for a session.
pub trait Canvas {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Overwrite the whole grid with one glyph.
    fn clear(&mut self, glyph: char);
    /// Rasterize a filled triangle, edges included, onto the grid.
    #[allow(clippy::too_many_arguments)]
    fn fill_triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32, glyph: char);
}

/// Construction parameters for the renderer.
#[derive(Debug, Clone, Copy)]
pub struct RendererConfig {
    /// Viewpoint used for back-face culling.
    pub camera: Point3<f32>,
    /// Directional light; normalized at construction. Must be nonzero.
    pub light: Vector3<f32>,
    /// Depth added to every rotated vertex to push the mesh past the near
    /// plane.
    pub depth_offset: f32,
    /// Rotation advance per frame, in radians.
    pub spin_step: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            camera: Point3::origin(),
            light: Vector3::new(0.0, 0.0, -1.0),
            depth_offset: 4.0,
            spin_step: 0.05,
        }
    }
}

/// Renders a mesh to a canvas, one frame per call.
///
/// The projection matrix is built once at construction; the only state that
/// changes between frames is the spin angle.
pub struct Renderer {
    projection: Matrix4<f32>,
    width: usize,
    height: usize,
    camera: Point3<f32>,
    light: Vector3<f32>,
    depth_offset: f32,
    spin: Spin,
}

impl Renderer {
    /// Renderer with default configuration for a grid of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_config(width, height, RendererConfig::default())
    }

    pub fn with_config(width: usize, height: usize, config: RendererConfig) -> Self {
        Self {
            projection: Projection::for_grid(width, height).matrix(),
            width,
            height,
            camera: config.camera,
            light: config.light.normalize(),
            depth_offset: config.depth_offset,
            spin: Spin::new(config.spin_step),
        }
    }

    /// Run the pipeline for one frame at the given angle and return the
    /// visible triangles in draw order (farthest first).
    ///
    /// Pure with respect to renderer state, so a frame at any angle can be
    /// computed deterministically.
    pub fn frame(&self, theta: f32, mesh: &Mesh) -> Vec<ShadedTriangle> {
        let rot_z = transform::rotation_z(theta);
        let rot_x = transform::rotation_x(theta * 0.5);

        let mut visible = Vec::with_capacity(mesh.triangles.len());

        for tri in &mesh.triangles {
            let rotated = tri.map(|p| transform::apply(&rot_x, &transform::apply(&rot_z, &p)));
            let translated =
                rotated.map(|p| Point3::new(p.x, p.y, p.z + self.depth_offset));

            // Degenerate triangles have no normal; skip them for the frame.
            let normal = match translated.face_normal() {
                Some(normal) => normal,
                None => continue,
            };

            // Faces whose normal points away from the viewpoint contribute
            // nothing this frame.
            if normal.dot(&(translated.points[0] - self.camera)) >= 0.0 {
                continue;
            }

            let glyph = shade::glyph_for(normal.dot(&self.light));

            let projected = translated.map(|p| transform::apply(&self.projection, &p));
            let screen = projected.map(|p| {
                Point3::new(
                    (p.x + 1.0) * self.width as f32 * 0.5,
                    (p.y + 1.0) * self.height as f32 * 0.5,
                    p.z,
                )
            });

            visible.push(ShadedTriangle {
                points: screen.points,
                glyph,
            });
        }

        sort_farthest_first(&mut visible);
        visible
    }

    /// Advance the spin and draw one frame onto the canvas.
    ///
    /// The canvas is cleared and fully redrawn; nearer triangles are drawn
    /// last so they overwrite farther ones.
    pub fn render(&mut self, mesh: &Mesh, canvas: &mut impl Canvas) {
        let theta = self.spin.advance();
        let triangles = self.frame(theta, mesh);

        canvas.clear(shade::BLANK);
        for tri in &triangles {
            let [a, b, c] = tri.points;
            canvas.fill_triangle(a.x, a.y, b.x, b.y, c.x, c.y, tri.glyph);
        }
    }

    pub fn theta(&self) -> f32 {
        self.spin.theta()
    }
}

/// Painter's ordering: descending average depth. The sort is stable, so
/// equal depths keep mesh order.
pub fn sort_farthest_first(triangles: &mut [ShadedTriangle]) {
    triangles.sort_by(|a, b| {
        b.average_depth()
            .partial_cmp(&a.average_depth())
            .unwrap_or(Ordering::Equal)
    });
}
