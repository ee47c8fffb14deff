use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rfi_test_utils::TestDataGenerator;
use rfi_transform::{strip_fields, transform, TransformPlan};

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    let plan = TransformPlan::default();

    for record_count in [100, 1_000, 10_000] {
        let src = TestDataGenerator::large_module(record_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}rec", record_count)),
            &src,
            |b, src| {
                b.iter(|| black_box(transform(black_box(src), &plan).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_strip(c: &mut Criterion) {
    let mut group = c.benchmark_group("strip");
    let src = TestDataGenerator::large_module(10_000);

    group.bench_function("10000rec", |b| {
        b.iter(|| black_box(strip_fields(black_box(&src), &["authorName"]).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_transform, bench_strip);
criterion_main!(benches);
