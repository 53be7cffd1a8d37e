//! Benchmarks for the CPU side of a frame.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use glowfield::{FieldConfig, ParticleField};

const FRAME: f32 = 1.0 / 60.0;

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_tick");

    for count in [200u32, 2_000, 20_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let config = FieldConfig::default().with_particle_count(count).with_seed(1);
            let mut field = ParticleField::new(&config);
            b.iter(|| {
                field.tick(black_box(FRAME));
                black_box(field.gpu_particles());
            })
        });
    }

    group.finish();
}

fn bench_spawn(c: &mut Criterion) {
    c.bench_function("field_new_200", |b| {
        let config = FieldConfig::default().with_seed(1);
        b.iter(|| black_box(ParticleField::new(&config)))
    });
}

criterion_group!(benches, bench_tick, bench_spawn);
criterion_main!(benches);
