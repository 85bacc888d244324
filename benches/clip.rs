use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use nalgebra::{Point3, Vector3};
use triclip::float_types::Real;
use triclip::plane::Plane;
use triclip::soup::TriangleSoup;

/// A (2n+1)^3 lattice of small cuboids, so the clip plane rejects, accepts
/// and splits triangles in one pass.
fn cuboid_grid(n: i32) -> TriangleSoup {
    let mut soup = TriangleSoup::new();
    for x in -n..=n {
        for y in -n..=n {
            for z in -n..=n {
                let cell = TriangleSoup::cuboid(
                    Point3::new(x as Real, y as Real, z as Real),
                    Vector3::new(0.4, 0.4, 0.4),
                );
                soup.positions.extend(cell.positions);
            }
        }
    }
    soup
}

fn benchmark_clip_plane(c: &mut Criterion) {
    let plane = Plane::new(Vector3::z(), 0.01);
    let mut group = c.benchmark_group("clip_plane");

    for n in [1, 2, 4] {
        let soup = cuboid_grid(n);
        group.bench_with_input(
            BenchmarkId::from_parameter(soup.triangle_count()),
            &soup,
            |b, soup| b.iter(|| black_box(soup.clip_plane(&plane))),
        );
    }
    group.finish();
}

fn benchmark_clip_and_cap(c: &mut Criterion) {
    let plane = Plane::new(Vector3::z(), 0.01);
    let mut group = c.benchmark_group("clip_and_cap");

    for n in [1, 2, 4] {
        let soup = cuboid_grid(n);
        group.bench_with_input(
            BenchmarkId::from_parameter(soup.triangle_count()),
            &soup,
            |b, soup| b.iter(|| black_box(soup.clip_and_cap(&plane))),
        );
    }
    group.finish();
}

criterion_group!(benches, benchmark_clip_plane, benchmark_clip_and_cap);
criterion_main!(benches);
