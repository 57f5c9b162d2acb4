use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Point3;

use glyph3d_core::{Mesh, Renderer};

fn bench_frame_cube(c: &mut Criterion) {
    let renderer = Renderer::new(120, 40);
    let cube = Mesh::unit_cube();

    c.bench_function("frame_unit_cube", |b| {
        b.iter(|| renderer.frame(black_box(0.7), &cube))
    });
}

fn bench_frame_dense(c: &mut Criterion) {
    let renderer = Renderer::new(120, 40);
    let mesh = dense_mesh();

    c.bench_function("frame_dense_768_tris", |b| {
        b.iter(|| renderer.frame(black_box(0.7), &mesh))
    });
}

/// An 8x8 sheet of scaled cubes, 768 triangles.
fn dense_mesh() -> Mesh {
    let cube = Mesh::unit_cube();
    let mut mesh = Mesh::with_capacity(cube.triangles.len() * 64);

    for i in 0..64 {
        let dx = (i % 8) as f32 * 0.2 - 0.8;
        let dy = (i / 8) as f32 * 0.2 - 0.8;
        for tri in &cube.triangles {
            mesh.add_triangle(
                tri.map(|p| Point3::new(p.x * 0.15 + dx, p.y * 0.15 + dy, p.z * 0.15)),
            );
        }
    }

    mesh
}

criterion_group!(benches, bench_frame_cube, bench_frame_dense);
criterion_main!(benches);
