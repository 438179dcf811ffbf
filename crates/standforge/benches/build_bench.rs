//! Criterion benchmarks for stand builds.
//! Focus: every archetype at shelf counts {1, 4, 8}, plus surface detail sizes.
//! Results: by default under target/criterion.

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use standforge::api::{
    build_stand_group_with, generate_spec_from_form_data, normal_variation, BuildOptions, FormData,
    StandType, SurfaceCfg,
};

fn bench_builders(c: &mut Criterion) {
    let opts = BuildOptions {
        surface: SurfaceCfg { size: 8 },
        ..BuildOptions::seeded(42, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    };
    let mut group = c.benchmark_group("build");
    for kind in StandType::ALL {
        for &shelves in &[1u32, 4, 8] {
            let form = FormData::from_value(json!({
                "standType": kind.label(),
                "shelfCount": shelves,
                "frontFaceCount": 3,
            }));
            let spec = generate_spec_from_form_data(&form);
            group.bench_with_input(
                BenchmarkId::new(format!("{kind:?}"), shelves),
                &shelves,
                |b, _| b.iter(|| build_stand_group_with(&spec, &form, &opts)),
            );
        }
    }
    group.finish();
}

fn bench_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface");
    for &size in &[16usize, 64, 256] {
        group.bench_with_input(BenchmarkId::new("normal_variation", size), &size, |b, &size| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| normal_variation(size, 0.05, &mut rng))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_builders, bench_surface);
criterion_main!(benches);
