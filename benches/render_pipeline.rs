use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fractal_explorer::core::actions::cancellation::NeverCancel;
use fractal_explorer::core::actions::equalize::{EqualizerSettings, equalize};
use fractal_explorer::core::actions::evaluate_frame::evaluate_frame::evaluate_escape_buffer;
use fractal_explorer::core::data::raster::RasterSize;
use fractal_explorer::core::fractals::params::FractalParameters;
use fractal_explorer::core::view::iterations::derive_max_iter;
use fractal_explorer::core::view::transform::ViewTransform;

fn home_params(raster: RasterSize) -> (ViewTransform, FractalParameters) {
    let view = ViewTransform::home(raster);
    let params = FractalParameters {
        max_iter: derive_max_iter(view.scale(), 0),
        ..Default::default()
    };
    (view, params)
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_escape_buffer");
    group.sample_size(20);

    for &(width, height) in &[(200, 125), (800, 500)] {
        let raster = RasterSize::new(width, height);
        let (view, params) = home_params(raster);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &raster,
            |b, &raster| {
                b.iter(|| {
                    evaluate_escape_buffer(black_box(raster), view, params, &NeverCancel).unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_equalize(c: &mut Criterion) {
    let raster = RasterSize::new(800, 500);
    let (view, params) = home_params(raster);
    let raw = evaluate_escape_buffer(raster, view, params, &NeverCancel).unwrap();

    let mut group = c.benchmark_group("equalize");
    group.sample_size(20);

    let histogram = EqualizerSettings::default();
    let linear = EqualizerSettings {
        enabled: false,
        ..EqualizerSettings::default()
    };
    group.bench_function("histogram", |b| {
        b.iter(|| equalize(black_box(&raw), &histogram).unwrap())
    });
    group.bench_function("linear", |b| {
        b.iter(|| equalize(black_box(&raw), &linear).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_equalize);
criterion_main!(benches);
