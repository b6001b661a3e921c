extern crate strokepen;
extern crate strokepen_tests;
#[macro_use]
extern crate criterion;

use criterion::Criterion;
use strokepen::math::Transform;
use strokepen::{LineCap, LineJoin, StrokeOptions, StrokeTessellator};
use strokepen_tests::*;

const N: usize = 10;

fn stroke_zigzag(bench: &mut Criterion) {
    let polyline = zigzag(1000, 2.0, 10.0);
    let options = StrokeOptions::line_width(3.0).with_line_join(LineJoin::Miter);
    let mut tessellator = StrokeTessellator::with_options(&options, &Transform::identity()).unwrap();

    bench.bench_function("stroke zigzag miter", |b| {
        b.iter(|| {
            for _ in 0..N {
                let mut sink = CheckedSink::new();
                tessellator
                    .tessellate_polyline(&polyline, false, &mut sink)
                    .unwrap();
                criterion::black_box(sink.vertices);
            }
        })
    });
}

fn stroke_star_round(bench: &mut Criterion) {
    let polyline = star(100, 200.0, 50.0);
    let options = StrokeOptions::line_width(6.0)
        .with_line_join(LineJoin::Round)
        .with_line_cap(LineCap::Round);
    let mut tessellator = StrokeTessellator::with_options(&options, &Transform::scale(2.0, 2.0)).unwrap();

    bench.bench_function("stroke star round", |b| {
        b.iter(|| {
            for _ in 0..N {
                let mut sink = CheckedSink::new();
                tessellator
                    .tessellate_polyline(&polyline, true, &mut sink)
                    .unwrap();
                criterion::black_box(sink.vertices);
            }
        })
    });
}

fn stroke_circle(bench: &mut Criterion) {
    let polyline = circle(4096, 300.0);
    let options = StrokeOptions::line_width(1.0);
    let mut tessellator = StrokeTessellator::with_options(&options, &Transform::identity()).unwrap();

    bench.bench_function("stroke flattened circle", |b| {
        b.iter(|| {
            let mut sink = CheckedSink::new();
            tessellator
                .tessellate_polyline(&polyline, true, &mut sink)
                .unwrap();
            criterion::black_box(sink.vertices);
        })
    });
}

fn configure(bench: &mut Criterion) {
    let mut tessellator = StrokeTessellator::new();
    let transform = Transform::scale(4.0, 3.0);

    bench.bench_function("configure", |b| {
        b.iter(|| {
            for width in 1..50 {
                tessellator
                    .configure(&StrokeOptions::line_width(width as f32), &transform)
                    .unwrap();
            }
        })
    });
}

criterion_group!(stroke, stroke_zigzag, stroke_star_round, stroke_circle);
criterion_group!(config, configure);
criterion_main!(stroke, config);
