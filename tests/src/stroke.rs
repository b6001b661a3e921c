use crate::*;

use strokepen::geom::euclid::Angle;
use strokepen::math::Transform;
use strokepen::{
    LineCap, LineJoin, PolygonBuffers, StrokeEvent, StrokeOptions, StrokeTessellator,
};

fn all_options() -> Vec<StrokeOptions> {
    let mut options = Vec::new();
    for &cap in &[LineCap::Butt, LineCap::Square, LineCap::Round] {
        for &join in &[LineJoin::Miter, LineJoin::Round, LineJoin::Bevel] {
            for &width in &[0.0, 0.5, 1.0, 7.5] {
                options.push(
                    StrokeOptions::line_width(width)
                        .with_line_cap(cap)
                        .with_line_join(join),
                );
            }
        }
    }

    options
}

fn transforms() -> Vec<Transform> {
    vec![
        Transform::identity(),
        Transform::scale(3.0, 3.0),
        Transform::scale(0.5, 2.0),
        Transform::rotation(Angle::degrees(30.0)),
        Transform::scale(-1.0, 1.0),
        Transform::new(1.0, 0.0, 0.75, 1.0, 10.0, 10.0),
    ]
}

#[test]
fn every_configuration_produces_well_formed_output() {
    let fixtures = [zigzag(20, 3.0, 5.0), star(7, 20.0, 8.0), circle(64, 30.0)];

    for transform in &transforms() {
        for options in &all_options() {
            let mut tessellator = StrokeTessellator::with_options(options, transform).unwrap();
            for polyline in &fixtures {
                for &closed in &[false, true] {
                    let mut sink = CheckedSink::new();
                    tessellator
                        .tessellate_polyline(polyline, closed, &mut sink)
                        .unwrap();

                    assert_eq!(sink.polygons, 1);
                    assert_eq!(sink.ends, 1);
                    assert!(sink.vertices >= 4);
                }
            }
        }
    }
}

#[test]
fn output_is_deterministic() {
    let options = StrokeOptions::line_width(2.5)
        .with_line_join(LineJoin::Round)
        .with_line_cap(LineCap::Round);
    let polyline = star(5, 40.0, 15.0);

    let mut a = PolygonBuffers::new();
    let mut b = PolygonBuffers::new();
    let mut first = StrokeTessellator::with_options(&options, &Transform::identity()).unwrap();
    let mut second = StrokeTessellator::new();
    second.configure(&options, &Transform::identity()).unwrap();

    first.tessellate_polyline(&polyline, true, &mut a).unwrap();
    // Reusing a tessellator gives the same result.
    first.tessellate_polyline(&polyline, true, &mut b).unwrap();
    assert_eq!(a, b);

    b.clear();
    second.tessellate_polyline(&polyline, true, &mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn curves_only_get_joins_where_requested() {
    let options = StrokeOptions::line_width(2.0).with_line_join(LineJoin::Miter);
    let mut tessellator = StrokeTessellator::with_options(&options, &Transform::identity()).unwrap();
    let polyline = circle(256, 30.0);

    // A finely flattened circle without any requested join.
    let mut events = vec![StrokeEvent::MoveTo {
        at: polyline[0].0,
        color: polyline[0].1,
    }];
    for &(to, color) in &polyline[1..] {
        events.push(StrokeEvent::LineTo { to, color });
    }
    events.push(StrokeEvent::Close);

    let mut smooth = PolygonBuffers::new();
    tessellator.tessellate(events, &mut smooth).unwrap();

    // Both sides of each segment and the inner corners, no pen vertices.
    let vertices = smooth.vertex_count();
    assert!(vertices >= 5 * 255);
    assert!(vertices < 5 * 256 + 16);
}

#[test]
fn large_coordinates_saturate() {
    let options = StrokeOptions::line_width(2000.0).with_line_cap(LineCap::Square);
    let mut tessellator = StrokeTessellator::with_options(&options, &Transform::identity()).unwrap();

    let far = fixed::from_i32(32_000);
    let polyline = [(point(-far, 0), WHITE), (point(far, 0), WHITE)];

    let mut output = PolygonBuffers::new();
    tessellator
        .tessellate_polyline(&polyline, false, &mut output)
        .unwrap();

    let outline = &output.outlines[0];
    assert!(outline.positions().any(|p| p.x == i32::MAX));
    assert!(outline.positions().any(|p| p.x == i32::MIN));
}
