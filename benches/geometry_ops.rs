//! Benchmarks for tessellation, topology, curvature and spatial queries.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Point3;
use procgeom::algo::curvature::{compute_curvature, compute_curvature_sequential};
use procgeom::algo::kdtree::BoundingTree;
use procgeom::algo::tessellate::{tessellate, tessellate_sequential};
use procgeom::geom::Aabb;
use procgeom::mesh::{GridMesh, Topology};
use procgeom::procedural::surfaces;

fn torus_grid(n: usize) -> GridMesh {
    tessellate(&surfaces::torus(2.0, 0.5), 2 * n, n)
}

fn bench_tessellation(c: &mut Criterion) {
    let surface = surfaces::trefoil(1.0);
    let mut group = c.benchmark_group("tessellate_trefoil");
    for n in [32, 128] {
        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |b, &n| {
            b.iter(|| tessellate(&surface, n, n))
        });
        group.bench_with_input(BenchmarkId::new("sequential", n), &n, |b, &n| {
            b.iter(|| tessellate_sequential(&surface, n, n))
        });
    }
    group.finish();
}

fn bench_topology(c: &mut Criterion) {
    let grid = torus_grid(64);
    c.bench_function("topology_build_torus_128x64", |b| {
        b.iter(|| Topology::build(grid.quad_mesh()).unwrap())
    });
}

fn bench_curvature(c: &mut Criterion) {
    let grid = torus_grid(64);
    let topology = Topology::build(grid.quad_mesh()).unwrap();

    c.bench_function("curvature_torus_parallel", |b| {
        b.iter(|| compute_curvature(&topology))
    });
    c.bench_function("curvature_torus_sequential", |b| {
        b.iter(|| compute_curvature_sequential(&topology))
    });
}

fn bench_tree_query(c: &mut Criterion) {
    let grid = torus_grid(64);
    let mesh = grid.quad_mesh();
    let boxes: Vec<Aabb> = (0..mesh.num_faces())
        .map(|f| Aabb::from_points(mesh.face_points(f)))
        .collect();

    c.bench_function("tree_build_torus_faces", |b| {
        b.iter(|| BoundingTree::new(boxes.clone()))
    });

    let tree = BoundingTree::new(boxes);
    let window = Aabb::new(Point3::new(1.5, -0.5, -0.5), Point3::new(2.5, 0.5, 0.5));
    c.bench_function("tree_query_torus_faces", |b| {
        b.iter(|| tree.query(&window).len())
    });
}

criterion_group!(
    benches,
    bench_tessellation,
    bench_topology,
    bench_curvature,
    bench_tree_query
);
criterion_main!(benches);
