use super::*;
use approx::assert_relative_eq;
use proptest::prelude::*;

fn layout(json: &str) -> CompositionLayout {
    compute_layout(&ViewDef::from_json_str(json).unwrap(), &CompileDefaults::default())
}

fn boxes(l: &CompositionLayout) -> Vec<BoundingBox> {
    l.slots.iter().map(|s| s.bounding_box).collect()
}

#[test]
fn serial_views_add_heights_and_spacing() {
    let l = layout(
        r#"{"arrangement": "serial", "views": [
            {"tracks": [{"id": "a", "width": 100, "height": 10}]},
            {"tracks": [{"id": "b", "width": 300, "height": 10}]}
        ]}"#,
    );
    assert_eq!(l.size, Size::new(300.0, 40.0));
    assert_eq!(
        boxes(&l),
        [
            BoundingBox::new(0.0, 0.0, 100.0, 10.0),
            BoundingBox::new(0.0, 30.0, 300.0, 10.0)
        ]
    );
}

#[test]
fn parallel_views_add_widths_and_take_max_height() {
    let l = layout(
        r#"{"arrangement": "parallel", "spacing": 5, "views": [
            {"tracks": [{"id": "a", "width": 100, "height": 10}]},
            {"tracks": [{"id": "b", "width": 50, "height": 70}]}
        ]}"#,
    );
    assert_eq!(l.size, Size::new(155.0, 70.0));
    assert_eq!(l.slots[1].bounding_box.x, 105.0);
}

#[test]
fn tracks_in_a_view_stack_without_gaps() {
    let l = layout(
        r#"{"id": "v", "tracks": [
            {"id": "a", "width": 200, "height": 10},
            {"id": "spacer", "width": 200, "height": 0},
            {"id": "b", "width": 150, "height": 20}
        ]}"#,
    );
    assert_eq!(l.size, Size::new(200.0, 30.0));
    assert_eq!(l.slots[2].bounding_box, BoundingBox::new(0.0, 10.0, 150.0, 20.0));
    assert!(l.slots.iter().all(|s| s.view_id == "v"));
}

#[test]
fn overlay_on_previous_shares_one_slot() {
    let l = layout(
        r#"{"tracks": [
            {"id": "a", "width": 100, "height": 50},
            {"id": "b", "overlayOnPreviousTrack": true, "width": 100, "height": 50},
            {"id": "c", "overlayOnPreviousTrack": true, "width": 100, "height": 50}
        ]}"#,
    );
    assert_eq!(l.slots.len(), 1);
    let ids: Vec<_> = l.slots[0].tracks().filter_map(|t| t.id.as_deref()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(l.size, Size::new(100.0, 50.0));
}

#[test]
fn span_covers_both_columns_and_the_gap() {
    let l = layout(
        r#"{"wrap": 2, "spacing": 20, "tracks": [
            {"id": "wide", "span": 2, "width": 100, "height": 40},
            {"id": "l", "width": 100, "height": 30},
            {"id": "r", "width": 100, "height": 30}
        ]}"#,
    );
    let b = boxes(&l);
    assert_eq!(b[0], BoundingBox::new(0.0, 0.0, 220.0, 40.0));
    assert_eq!(b[1], BoundingBox::new(0.0, 60.0, 100.0, 30.0));
    assert_eq!(b[2], BoundingBox::new(120.0, 60.0, 100.0, 30.0));
    assert_eq!(l.size, Size::new(220.0, 90.0));
}

#[test]
fn vertical_orientation_swaps_axes() {
    let l = layout(
        r#"{"orientation": "vertical", "tracks": [
            {"id": "a", "width": 300, "height": 40},
            {"id": "b", "width": 300, "height": 60}
        ]}"#,
    );
    assert_eq!(l.slots[1].bounding_box, BoundingBox::new(40.0, 0.0, 60.0, 300.0));
    assert_eq!(l.size, Size::new(100.0, 300.0));
}

#[test]
fn offsets_shift_the_subtree() {
    let l = layout(
        r#"{"views": [
            {"xOffset": 30, "yOffset": 5, "tracks": [{"id": "a", "width": 100, "height": 10}]}
        ]}"#,
    );
    assert_eq!(l.slots[0].bounding_box, BoundingBox::new(30.0, 5.0, 100.0, 10.0));
    assert_eq!(l.size, Size::new(130.0, 15.0));
}

#[test]
fn missing_sizes_use_defaults_and_relative_boxes_fill_the_grid() {
    let l = layout(r#"{"tracks": [{"id": "a"}, {"id": "b"}]}"#);
    assert_eq!(l.size, Size::new(600.0, 260.0));
    let r = l.slots[1].relative_box;
    assert_relative_eq!(r.x, 0.0);
    assert_relative_eq!(r.y, 6.0);
    assert_relative_eq!(r.w, 12.0);
    assert_relative_eq!(r.h, 6.0);
}

#[test]
fn negative_sizes_propagate() {
    let l = layout(r#"{"tracks": [{"id": "a", "width": 100, "height": -10}, {"id": "b", "width": 100, "height": 10}]}"#);
    assert_eq!(l.slots[1].bounding_box.y, -10.0);
}

fn arranged(arrangement: &str, sizes: &[(f64, f64)], spacing: f64) -> ViewDef {
    let views: Vec<String> = sizes
        .iter()
        .enumerate()
        .map(|(i, (w, h))| format!(r#"{{"tracks": [{{"id": "t{i}", "width": {w}, "height": {h}}}]}}"#))
        .collect();
    ViewDef::from_json_str(&format!(
        r#"{{"arrangement": "{arrangement}", "spacing": {spacing}, "views": [{}]}}"#,
        views.join(",")
    ))
    .unwrap()
}

#[test]
fn two_serial_views_of_height_ten_compose_to_forty() {
    let l = compute_layout(
        &arranged("serial", &[(100.0, 10.0), (100.0, 10.0)], 20.0),
        &CompileDefaults::default(),
    );
    assert_eq!(l.size.height, 40.0);
    assert_eq!(l.size.width, 100.0);
}

proptest! {
    #[test]
    fn serial_height_is_sum_plus_spacing(n in 1usize..8, h in 0.0f64..500.0, s in 0.0f64..100.0) {
        let root = arranged("serial", &vec![(100.0, h); n], s);
        let l = compute_layout(&root, &CompileDefaults::default());
        let expect = n as f64 * h + (n as f64 - 1.0) * s;
        prop_assert!((l.size.height - expect).abs() < 1e-6);
        prop_assert_eq!(l.slots.len(), n);
    }

    #[test]
    fn parallel_width_is_sum_plus_spacing(n in 1usize..8, w in 0.0f64..500.0, s in 0.0f64..100.0) {
        let root = arranged("parallel", &vec![(w, 30.0); n], s);
        let l = compute_layout(&root, &CompileDefaults::default());
        let expect = n as f64 * w + (n as f64 - 1.0) * s;
        prop_assert!((l.size.width - expect).abs() < 1e-6);
        prop_assert!((l.size.height - 30.0).abs() < 1e-6);
    }

    #[test]
    fn relative_boxes_scale_back_to_absolute(heights in proptest::collection::vec(1.0f64..400.0, 1..6), w in 1.0f64..900.0) {
        let sizes: Vec<(f64, f64)> = heights.iter().map(|h| (w, *h)).collect();
        let root = arranged("serial", &sizes, 20.0);
        let defaults = CompileDefaults::default();
        let l = compute_layout(&root, &defaults);
        let mut sum_h = 0.0;
        for slot in &l.slots {
            let back = slot.relative_box.to_bounding(l.size, defaults.grid_unit);
            prop_assert!((back.width - slot.bounding_box.width).abs() < 1e-6);
            prop_assert!((back.height - slot.bounding_box.height).abs() < 1e-6);
            prop_assert!((back.y - slot.bounding_box.y).abs() < 1e-6);
            sum_h += slot.relative_box.h;
        }
        let spacing_units = 20.0 * (heights.len() as f64 - 1.0) * defaults.grid_unit / l.size.height;
        prop_assert!((sum_h + spacing_units - defaults.grid_unit).abs() < 1e-6);
    }

    #[test]
    fn parallel_relative_widths_scale_back_to_absolute(widths in proptest::collection::vec(1.0f64..400.0, 1..6), h in 1.0f64..300.0) {
        let sizes: Vec<(f64, f64)> = widths.iter().map(|w| (*w, h)).collect();
        let root = arranged("parallel", &sizes, 20.0);
        let defaults = CompileDefaults::default();
        let l = compute_layout(&root, &defaults);
        let mut sum_w = 0.0;
        for (slot, w) in l.slots.iter().zip(&widths) {
            let back = slot.relative_box.to_bounding(l.size, defaults.grid_unit);
            prop_assert!((back.width - w).abs() < 1e-6);
            prop_assert!((back.x - slot.bounding_box.x).abs() < 1e-6);
            prop_assert!((back.height - slot.bounding_box.height).abs() < 1e-6);
            sum_w += slot.relative_box.w;
        }
        let spacing_units = 20.0 * (widths.len() as f64 - 1.0) * defaults.grid_unit / l.size.width;
        prop_assert!((sum_w + spacing_units - defaults.grid_unit).abs() < 1e-6);
    }
}
