//! Benchmarks for the CPU physics paths.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gargantua::prelude::*;

fn bench_lens_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("lens_map_build");
    let bh = BlackHole::default();
    let rs = bh.event_horizon_radius();
    let camera = DVec3::new(0.0, 5.0 * rs, 30.0 * rs);

    for resolution in [64u32, 128, 256] {
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            &resolution,
            |b, &res| {
                let mut map = LensMap::new();
                b.iter(|| {
                    map.build_for(&bh, camera, res);
                    black_box(map.samples().len())
                })
            },
        );
    }

    group.finish();
}

fn bench_lens_lookup(c: &mut Criterion) {
    let bh = BlackHole::default();
    let rs = bh.event_horizon_radius();
    let mut map = LensMap::new();
    map.build_for(&bh, DVec3::new(0.0, 5.0 * rs, 30.0 * rs), 256);

    c.bench_function("lens_map_lookup", |b| {
        b.iter(|| black_box(map.deflection_at(black_box(DVec2::new(0.25, -0.4)))))
    });
}

fn bench_dynamics(c: &mut Criterion) {
    let mut group = c.benchmark_group("dynamics_step");
    let bh = BlackHole::default();
    let rs = bh.event_horizon_radius();

    for count in [3usize, 32, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &n| {
            let mut dynamics = Dynamics::new();
            dynamics.set_primary(&bh);
            for i in 0..n {
                let radius = (50.0 + i as f64) * rs;
                let phase = i as f64 * 0.37;
                dynamics.add_body(Body::circular_orbit(&bh, radius, phase, SOLAR_MASS));
            }
            b.iter(|| {
                dynamics.step(black_box(60.0));
                black_box(dynamics.bodies()[0].position)
            })
        });
    }

    group.finish();
}

fn bench_disk_sampling(c: &mut Criterion) {
    let bh = BlackHole::default();

    c.bench_function("disk_sample_10k", |b| {
        let mut sampler = DiskSampler::seeded(1);
        b.iter(|| black_box(bh.sample_accretion_disk(10_000, &mut sampler)))
    });
}

criterion_group!(
    benches,
    bench_lens_map,
    bench_lens_lookup,
    bench_dynamics,
    bench_disk_sampling
);
criterion_main!(benches);
