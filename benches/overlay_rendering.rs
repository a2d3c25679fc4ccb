//! Overlay Rendering Benchmarks
//!
//! Covers the CPU-bound steps of an upload that do not depend on the OCR
//! engine: rasterization, fragment filtering and HTML rendering.
//!
//! Run with: `cargo bench --bench overlay_rendering`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgb, RgbImage};
use std::time::Duration;

use ocr_overlay_server::html::render_page;
use ocr_overlay_server::ocr::{FragmentFilter, TextFragment};
use ocr_overlay_server::raster::fixtures::blank_pdf;
use ocr_overlay_server::raster::{PageImage, RasterEvent, Rasterizer};

/// Engine-like output: a mix of structural rows, blanks and words
fn synthetic_fragments(count: usize) -> Vec<TextFragment> {
    (0..count)
        .map(|i| {
            let x = (i % 40) as i32 * 40;
            let y = (i / 40) as i32 * 30;
            match i % 5 {
                0 => TextFragment::new("", x, y, 200, 30, -1),
                1 => TextFragment::new(" ", x, y, 4, 20, 10),
                _ => TextFragment::new(format!("word{}", i), x, y, 36, 20, (i % 100) as i32),
            }
        })
        .collect()
}

fn letter_page() -> PageImage {
    PageImage::from_pdf_page(0, 200, RgbImage::from_pixel(1700, 2200, Rgb([255, 255, 255])))
}

/// Benchmark PDF rasterization at the default DPI
fn bench_rasterize(c: &mut Criterion) {
    let pdf_data = blank_pdf();

    let mut group = c.benchmark_group("rasterize");
    group.throughput(Throughput::Bytes(pdf_data.len() as u64));
    group.measurement_time(Duration::from_secs(10));

    for dpi in [72u32, 200] {
        let rasterizer = Rasterizer::new(dpi);
        group.bench_with_input(BenchmarkId::new("letter_page", dpi), &pdf_data, |b, data| {
            b.iter(|| {
                let mut pixels = 0u64;
                rasterizer
                    .stream(black_box(data.as_slice()), "bench.pdf", |event| {
                        if let RasterEvent::Page(page) = event {
                            pixels += u64::from(page.width()) * u64::from(page.height());
                        }
                        true
                    })
                    .expect("Failed to rasterize");
                black_box(pixels)
            })
        });
    }

    group.finish();
}

/// Benchmark fragment filtering
fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for count in [100usize, 1_000, 10_000] {
        let fragments = synthetic_fragments(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("default_threshold", count), &fragments, |b, input| {
            let filter = FragmentFilter::default();
            b.iter(|| black_box(filter.apply(black_box(input.clone()))))
        });
    }

    group.finish();
}

/// Benchmark page rendering (PNG + base64 + overlay markup)
fn bench_render_page(c: &mut Criterion) {
    let page = letter_page();

    let mut group = c.benchmark_group("render_page");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(15));

    for count in [0usize, 500] {
        let fragments = FragmentFilter::default().apply(synthetic_fragments(count));
        group.bench_with_input(BenchmarkId::new("letter_200dpi", count), &fragments, |b, input| {
            b.iter(|| {
                let html = render_page(black_box(&page), black_box(input)).expect("Failed to render");
                black_box(html)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rasterize, bench_filter, bench_render_page);
criterion_main!(benches);
