use super::*;
use crate::compile::options::CompileDefaults;
use crate::layout::solver::compute_layout;
use approx::assert_relative_eq;

fn polar(json: &str) -> (Size, Vec<PolarPlacement>, Vec<BoundingBox>) {
    let l = compute_layout(&ViewDef::from_json_str(json).unwrap(), &CompileDefaults::default());
    let p = l.slots.iter().map(|s| s.polar.unwrap()).collect();
    let b = l.slots.iter().map(|s| s.bounding_box).collect();
    (l.size, p, b)
}

#[test]
fn tracks_split_the_radius_from_outside_in() {
    let (size, p, b) = polar(
        r#"{"layout": "circular", "tracks": [
            {"id": "a", "width": 400, "height": 50},
            {"id": "b", "width": 400, "height": 50}
        ]}"#,
    );
    assert_eq!(size, Size::square(400.0));
    assert_relative_eq!(p[0].outer_radius, 200.0);
    assert_relative_eq!(p[0].inner_radius, 130.0);
    assert_relative_eq!(p[1].outer_radius, 130.0);
    assert_relative_eq!(p[1].inner_radius, 60.0);
    assert_relative_eq!(p[1].start_angle, 0.0);
    assert_relative_eq!(p[1].end_angle, 360.0);
    assert!(b.iter().all(|bb| *bb == BoundingBox::new(0.0, 0.0, 400.0, 400.0)));
}

#[test]
fn explicit_bounds_are_kept() {
    let (_, p, _) = polar(
        r#"{"layout": "circular", "centerRadius": 0.5, "tracks": [
            {"id": "a", "width": 200, "height": 10, "outerRadius": 90, "startAngle": 45}
        ]}"#,
    );
    assert_relative_eq!(p[0].outer_radius, 90.0);
    assert_relative_eq!(p[0].inner_radius, 50.0);
    assert_relative_eq!(p[0].start_angle, 45.0);
    assert_relative_eq!(p[0].end_angle, 360.0);
}

#[test]
fn parallel_children_split_the_arc_by_width() {
    let (size, p, _) = polar(
        r#"{"layout": "circular", "arrangement": "parallel", "views": [
            {"tracks": [{"id": "a", "width": 100, "height": 10}]},
            {"tracks": [{"id": "b", "width": 300, "height": 10}]}
        ]}"#,
    );
    assert_eq!(size, Size::square(420.0));
    assert_relative_eq!(p[0].start_angle, 0.0);
    assert_relative_eq!(p[0].end_angle, 89.5);
    assert_relative_eq!(p[1].start_angle, 91.5);
    assert_relative_eq!(p[1].end_angle, 360.0);
}

#[test]
fn wrapped_columns_split_the_arc_evenly() {
    let (_, p, _) = polar(
        r#"{"layout": "circular", "wrap": 2, "tracks": [
            {"id": "a", "width": 300, "height": 10},
            {"id": "b", "width": 300, "height": 10}
        ]}"#,
    );
    assert_relative_eq!(p[0].end_angle, 179.0);
    assert_relative_eq!(p[1].start_angle, 181.0);
    assert_relative_eq!(p[1].end_angle, 360.0);
    assert_relative_eq!(p[0].outer_radius, p[1].outer_radius);
}

#[test]
fn circular_view_beside_linear_view() {
    let l = compute_layout(
        &ViewDef::from_json_str(
            r#"{"arrangement": "parallel", "views": [
                {"tracks": [{"id": "lin", "width": 100, "height": 10}]},
                {"layout": "circular", "tracks": [{"id": "circ", "width": 200, "height": 10}]}
            ]}"#,
        )
        .unwrap(),
        &CompileDefaults::default(),
    );
    assert_eq!(l.size, Size::new(320.0, 200.0));
    assert!(l.slots[0].polar.is_none());
    assert_eq!(l.slots[1].bounding_box, BoundingBox::new(120.0, 0.0, 200.0, 200.0));
}
