use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use freqsketch::FrequencySketch;

fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("key-{i}")).collect()
}

fn bench_increment(c: &mut Criterion) {
    let mut group = c.benchmark_group("increment");
    for capacity in [1_024i64, 65_536, 1_048_576] {
        let mut sketch = FrequencySketch::new();
        sketch.ensure_capacity(capacity).unwrap();
        let keys = keys(4096);
        let mut i = 0usize;
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, _| {
            b.iter(|| {
                sketch.increment(black_box(keys[i & 4095].as_str()));
                i = i.wrapping_add(1);
            })
        });
    }
    group.finish();
}

fn bench_frequency(c: &mut Criterion) {
    let mut sketch = FrequencySketch::new();
    sketch.ensure_capacity(65_536).unwrap();
    let keys = keys(4096);
    for k in &keys {
        sketch.increment(k.as_str());
        sketch.increment(k.as_str());
    }
    let mut i = 0usize;
    c.bench_function("frequency", |b| {
        b.iter(|| {
            let f = sketch.frequency(black_box(keys[i & 4095].as_str()));
            i = i.wrapping_add(1);
            f
        })
    });
}

fn bench_reset(c: &mut Criterion) {
    let mut sketch = FrequencySketch::new();
    sketch.ensure_capacity(1_048_576).unwrap();
    c.bench_function("reset", |b| b.iter(|| sketch.reset()));
}

criterion_group!(benches, bench_increment, bench_frequency, bench_reset);
criterion_main!(benches);
