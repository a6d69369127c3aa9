//! Benchmarks for stage sequence construction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fastflow::config::{GeneralSettings, StageDescriptions};
use fastflow::sequence_from_dict;
use fastflow::testing::recording_resolver;
use serde_json::{json, Value};

fn sequence_inputs(n: usize) -> (Value, StageDescriptions) {
    let mut stages = Vec::with_capacity(n);
    let mut descriptions = StageDescriptions::new();
    for i in 0..n {
        let name = format!("stage_{i}");
        let (tag, description) = match i % 3 {
            0 => ("Keyed", json!({"bins": i})),
            1 => ("pkg.mod.Positional", json!([i, i + 1])),
            _ => ("Scalar", json!(i)),
        };
        stages.push(json!({ name.clone(): tag }));
        descriptions.insert(name, description);
    }
    (Value::Array(stages), descriptions)
}

fn sequence_benchmark(c: &mut Criterion) {
    let resolver = recording_resolver(
        &[("mymod", &["Keyed", "Scalar"][..]), ("pkg.mod", &["Positional"][..])],
        &[],
    );
    let general = GeneralSettings::new()
        .with_backend("mymod")
        .with_output_dir("/tmp/out");

    let mut group = c.benchmark_group("sequence_from_dict");
    for n in [10, 100, 1000] {
        let (stages, descriptions) = sequence_inputs(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let built = sequence_from_dict(&stages, &general, &descriptions, &resolver);
                black_box(built.map(|s| s.len()).unwrap_or_default())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, sequence_benchmark);
criterion_main!(benches);
