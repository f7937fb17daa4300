use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ccdview_rs::capture_pipeline::{
    AccurateConverter, FastConverter, GrayDepth, Matrix, PixmapConverter,
};
use ccdview_rs::capture_pipeline::filters::{Gaussian, UniformFilter};
use ndarray::Array2;

/// Noisy background with a few bright spots, roughly what a CCD frame looks like.
fn generate_mock_capture(rows: usize, cols: usize) -> Matrix {
    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let noise = ((r * 7919 + c * 104_729) % 97) as f64 - 48.0;
        if (r * cols + c) % 5_003 == 0 { 40_000.0 } else { noise }
    })
}

fn benchmark_fast_converter(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_converter");
    let matrix = generate_mock_capture(550, 3200);

    for (depth, label) in [(GrayDepth::Eight, "3200x550_gray8"), (GrayDepth::Sixteen, "3200x550_gray16")] {
        let converter = FastConverter::new(depth);
        group.bench_with_input(BenchmarkId::from_parameter(label), &matrix, |b, matrix| {
            b.iter(|| converter.convert(black_box(matrix)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_accurate_converter(c: &mut Criterion) {
    let mut group = c.benchmark_group("accurate_converter");
    group.sample_size(20);

    let sizes = vec![(100, 100, "100x100"), (550, 3200, "3200x550")];
    for (rows, cols, label) in sizes {
        let matrix = generate_mock_capture(rows, cols);
        let converter = AccurateConverter::new("viridis", 100);
        group.bench_with_input(BenchmarkId::from_parameter(label), &matrix, |b, matrix| {
            b.iter(|| converter.convert(black_box(matrix)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_gaussian(c: &mut Criterion) {
    let matrix = generate_mock_capture(550, 3200);
    let filter = Gaussian::new(1.5);

    c.bench_function("gaussian_sigma_1.5_3200x550", |b| {
        b.iter(|| filter.filter(black_box(&matrix)).unwrap());
    });
}

criterion_group!(
    benches,
    benchmark_fast_converter,
    benchmark_accurate_converter,
    benchmark_gaussian
);
criterion_main!(benches);
