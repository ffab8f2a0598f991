// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the scanlayer-document crate. Covers the pure
// layout stages (geometry, box mapping, text fitting, page planning) for a
// dense page of synthetic observations, plus PDF rendering of that plan.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use scanlayer_core::{BoxOrigin, DocumentMetadata, LayerConfig, Rect, TextObservation};
use scanlayer_document::{Pipeline, PdfWriter, ReplayRecognizer, SourceImage};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A 40-line by 4-column grid of observations, roughly a dense invoice page.
fn dense_page() -> Vec<TextObservation> {
    let mut observations = Vec::with_capacity(160);
    for row in 0..40 {
        for col in 0..4 {
            let text = format!("Item {row:02} column {col} amount 1{row}{col}.00");
            let bounds = Rect::new(
                0.05 + f64::from(col) * 0.23,
                0.02 + f64::from(row) * 0.024,
                0.2,
                0.018,
            );
            observations.push(TextObservation::new(text, bounds));
        }
    }
    observations
}

fn pipeline() -> Pipeline {
    let recognizer = ReplayRecognizer::from_observations(Vec::new());
    match Pipeline::new(LayerConfig::default(), Box::new(recognizer)) {
        Ok(pipeline) => pipeline,
        Err(err) => panic!("default config must be valid: {err}"),
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Layout of 160 regions on a 2480x3508 (A4 at 300 dpi) scan.
fn bench_layout(c: &mut Criterion) {
    let pipeline = pipeline();
    let observations = dense_page();

    c.bench_function("layout (160 regions, 2480x3508)", |b| {
        b.iter(|| {
            let plan = pipeline.layout(
                black_box(2480),
                black_box(3508),
                BoxOrigin::BottomLeft,
                black_box(&observations),
            );
            black_box(plan);
        });
    });
}

/// Render the dense plan over a small background image.
fn bench_render(c: &mut Criterion) {
    let pipeline = pipeline();
    let plan = pipeline.layout(620, 877, BoxOrigin::BottomLeft, &dense_page());
    let image = match SourceImage::from_dynamic(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        620,
        877,
        Rgb([255, 255, 255]),
    ))) {
        Ok(image) => image,
        Err(err) => panic!("fixture image must be valid: {err}"),
    };
    let writer = PdfWriter::new(DocumentMetadata {
        title: "Bench".into(),
        creator: "scanlayer".into(),
        subject: "Text extracted from image".into(),
    });

    c.bench_function("render (160 regions, 620x877)", |b| {
        b.iter(|| {
            let bytes = writer.render(black_box(&plan), &image);
            black_box(bytes.map(|bytes| bytes.len()).unwrap_or(0));
        });
    });
}

criterion_group!(benches, bench_layout, bench_render);
criterion_main!(benches);
