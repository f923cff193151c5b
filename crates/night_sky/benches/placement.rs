mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use night_sky::config::SkyConfig;
use night_sky::scene::NightSky;
use night_sky::sky::anchors::place_anchors;
use night_sky::sky::field::generate_stars;
use rand::rngs::StdRng;
use rand::SeedableRng;

const WORLD: Vec2 = Vec2::new(2400.0, 1600.0);
const SEPARATIONS: [f32; 4] = [100.0, 200.0, 250.0, 300.0];

fn placement_anchor_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/anchors_5");
    group.throughput(common::elements_throughput(5));

    for &separation in &SEPARATIONS {
        let mut rng = StdRng::seed_from_u64(0xA11CE_u64 ^ separation as u64);
        group.bench_with_input(
            BenchmarkId::from_parameter(separation),
            &separation,
            |b, &s| {
                b.iter(|| {
                    let placed = place_anchors(5, WORLD, s, &mut rng).map(|a| a.len());
                    black_box(placed.ok());
                });
            },
        );
    }

    group.finish();
}

fn field_star_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("field/stars");

    for &count in &[100usize, 500, 5000] {
        group.throughput(common::elements_throughput(count));
        let mut rng = StdRng::seed_from_u64(0xBEEF ^ count as u64);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &n| {
            b.iter(|| {
                let stars = generate_stars(n, WORLD, &mut rng);
                black_box(stars.len());
            });
        });
    }

    group.finish();
}

fn scene_build_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    c.bench_function("scene/default_build", |b| {
        b.iter(|| {
            let sky = NightSky::new(SkyConfig::default(), &mut rng);
            black_box(sky.map(|s| s.stars().len()).ok());
        });
    });
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = placement_anchor_benches, field_star_benches, scene_build_bench
}
criterion_main!(benches);
