//! Benchmark for rasterization, blitting and whole-buffer operations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_raster::output::PpmCodec;
use trueno_raster::prelude::*;

fn buffer_clear_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_clear");

    for (width, height) in [(256, 256), (1024, 1024), (1920, 1080)] {
        let mut fb = PixelBuffer::new(width, height).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &(width, height),
            |b, _| {
                b.iter(|| {
                    fb.clear(black_box(Rgb::RED));
                });
            },
        );
    }

    group.finish();
}

fn line_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_line");
    let mut fb = PixelBuffer::new(1024, 1024).unwrap();

    group.bench_function("shallow_1000px", |b| {
        b.iter(|| {
            draw_line(
                &mut fb,
                black_box(Point2::new(10.0, 20.0)),
                black_box(Point2::new(1010.0, 400.0)),
                Rgb::WHITE,
            )
        });
    });

    group.bench_function("steep_1000px", |b| {
        b.iter(|| {
            draw_line(
                &mut fb,
                black_box(Point2::new(20.0, 10.0)),
                black_box(Point2::new(400.0, 1010.0)),
                Rgb::WHITE,
            )
        });
    });

    group.finish();
}

fn shape_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("shapes");
    let mut fb = PixelBuffer::new(1024, 1024).unwrap();
    let center = Point2::new(512.0, 512.0);
    let tri = Triangle::new(
        Point2::new(100.0, 100.0),
        Point2::new(900.0, 200.0),
        Point2::new(500.0, 900.0),
    );

    for radius in [16.0f32, 128.0, 400.0] {
        group.bench_with_input(
            BenchmarkId::new("filled_circle", radius as u32),
            &radius,
            |b, &r| {
                b.iter(|| draw_circle(&mut fb, center, black_box(r), Rgb::GREEN, true));
            },
        );
    }

    group.bench_function("filled_triangle", |b| {
        b.iter(|| draw_triangle(&mut fb, black_box(tri), Rgb::BLUE, true));
    });

    group.bench_function("filled_triangle_alpha", |b| {
        b.iter(|| draw_triangle_alpha(&mut fb, black_box(tri), Rgb::BLUE, 0.5, true));
    });

    group.finish();
}

fn blit_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("blit");

    let mut src = PixelBuffer::new(128, 128).unwrap();
    src.clear(Rgb::new(200, 100, 50));
    let mut dest = PixelBuffer::new(1024, 1024).unwrap();
    let src_rect = Rect::from_coords(0.0, 0.0, 128.0, 128.0);
    let dest_rect = Rect::from_coords(128.0, 128.0, 448.0, 448.0);

    group.bench_function("nearest_128_to_320", |b| {
        b.iter(|| blit(&mut dest, black_box(dest_rect), &src, src_rect));
    });

    group.bench_function("alpha_128_to_320", |b| {
        b.iter(|| blit_alpha(&mut dest, black_box(dest_rect), &src, src_rect, 0.1));
    });

    group.finish();
}

fn blend_over_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("blend_over");

    let mut fb = PixelBuffer::new(1024, 1024).unwrap();
    fb.clear(Rgb::WHITE);
    let mut overlay = PixelBuffer::new(1024, 1024).unwrap();
    overlay.clear(Rgb::RED);

    group.bench_function("simd_1024x1024", |b| {
        b.iter(|| fb.blend_over(black_box(&overlay), 0.5));
    });

    group.finish();
}

fn ppm_encode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppm_encode");

    let mut fb = PixelBuffer::new(1024, 1024).unwrap();
    draw_circle(&mut fb, Point2::new(512.0, 512.0), 300.0, Rgb::RED, true);

    group.bench_function("to_bytes_1024x1024", |b| {
        b.iter(|| PpmCodec::to_bytes(black_box(&fb)));
    });

    group.finish();
}

criterion_group!(
    benches,
    buffer_clear_benchmark,
    line_benchmark,
    shape_benchmark,
    blit_benchmark,
    blend_over_benchmark,
    ppm_encode_benchmark
);
criterion_main!(benches);
