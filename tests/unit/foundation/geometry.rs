use super::*;
use approx::assert_relative_eq;

#[test]
fn rect_conversion_keeps_origin_and_extent() {
    let bb = BoundingBox::new(10.0, 20.0, 30.0, 40.0);
    let r = bb.to_rect();
    assert_eq!(r, Rect::new(10.0, 20.0, 40.0, 60.0));
    assert_eq!(BoundingBox::from_rect(r), bb);
}

#[test]
fn relative_box_scales_each_axis_independently() {
    let total = Size::new(600.0, 300.0);
    let rel = RelativeBox::from_bounding(BoundingBox::new(300.0, 150.0, 300.0, 75.0), total, 12.0);
    assert_relative_eq!(rel.x, 6.0);
    assert_relative_eq!(rel.y, 6.0);
    assert_relative_eq!(rel.w, 6.0);
    assert_relative_eq!(rel.h, 3.0);

    let back = rel.to_bounding(total, 12.0);
    assert_relative_eq!(back.width, 300.0);
    assert_relative_eq!(back.height, 75.0);
}

#[test]
fn zero_total_extent_maps_to_zero() {
    let rel = RelativeBox::from_bounding(BoundingBox::new(5.0, 5.0, 0.0, 0.0), Size::default(), 12.0);
    assert_eq!(rel, RelativeBox::default());
}

#[test]
fn negative_extent_propagates() {
    let bb = BoundingBox::new(0.0, 0.0, -10.0, 5.0);
    assert_eq!(bb.right(), -10.0);
    assert_eq!(bb.to_rect().width(), -10.0);
}
