// ============================================================================
// Currency Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Checked Arithmetic - Scaled-integer add/mul/div on the hot path
// 2. Float Conversion - setf and mulf through the guard pipeline
// 3. Swedish Rounding - Every cash interval
// 4. Output - Formatter and JSON codec with and without buffer reuse
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use scaled_currency::prelude::*;
use std::hint::black_box;

fn cents() -> Currency {
    Currency::builder().with_precision(100).build().unwrap()
}

// ============================================================================
// Checked Arithmetic
// ============================================================================

fn benchmark_checked_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("checked_arithmetic");
    let a = cents().set(123_456);
    let b = cents().set(789);

    group.bench_function("add", |bench| {
        bench.iter(|| black_box(black_box(&a).checked_add(black_box(&b))))
    });
    group.bench_function("mul", |bench| {
        bench.iter(|| black_box(black_box(&a).checked_mul(black_box(&b))))
    });
    group.bench_function("div", |bench| {
        bench.iter(|| black_box(black_box(&a).checked_div(black_box(&b))))
    });

    group.finish();
}

// Summing a basket: the typical checkout workload
fn benchmark_basket_total(c: &mut Criterion) {
    let mut group = c.benchmark_group("basket_total");

    for num_items in [10usize, 100, 1000].iter() {
        let base = cents();
        let items: Vec<Currency> = (0..*num_items)
            .map(|i| base.set(199 + i as i64 * 7))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(num_items),
            &items,
            |bench, items| {
                bench.iter(|| {
                    black_box(
                        items
                            .iter()
                            .try_fold(base.set(0), |acc, item| acc.checked_add(item)),
                    )
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// Float Conversion
// ============================================================================

fn benchmark_float_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("float_conversion");
    let base = cents();
    let net = base.set(1_999);

    group.bench_function("setf", |bench| {
        bench.iter(|| black_box(base.checked_setf(black_box(1234.565))))
    });
    group.bench_function("mulf", |bench| {
        bench.iter(|| black_box(net.checked_mulf(black_box(0.19))))
    });
    group.bench_function("pow", |bench| {
        bench.iter(|| black_box(net.checked_pow(black_box(1.5))))
    });

    group.finish();
}

// ============================================================================
// Swedish Rounding
// ============================================================================

fn benchmark_swedish(c: &mut Criterion) {
    let mut group = c.benchmark_group("swedish");

    for interval in Interval::ALL.iter() {
        let value = Currency::builder()
            .with_precision(100)
            .with_interval(*interval)
            .build()
            .unwrap()
            .set(12_345);

        group.bench_with_input(
            BenchmarkId::from_parameter(interval),
            &value,
            |bench, value| bench.iter(|| black_box(value.checked_swedish())),
        );
    }

    group.finish();
}

// ============================================================================
// Output
// ============================================================================

fn benchmark_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let value = cents().set(-1_234_567);

    group.bench_function("number_fresh_buffer", |bench| {
        bench.iter(|| black_box(value.number()))
    });
    group.bench_function("number_reused_buffer", |bench| {
        let mut buf = Vec::with_capacity(32);
        bench.iter(|| {
            value.number_into(&mut buf).unwrap();
            black_box(buf.len())
        })
    });
    group.bench_function("json_encode", |bench| {
        bench.iter(|| black_box(value.to_json()))
    });
    group.bench_function("json_decode", |bench| {
        bench.iter(|| black_box(value.from_json(black_box(b"-12345.67"))))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_checked_arithmetic,
    benchmark_basket_total,
    benchmark_float_conversion,
    benchmark_swedish,
    benchmark_output,
);
criterion_main!(benches);
