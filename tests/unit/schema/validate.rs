use super::*;

fn report(json: &str) -> ValidityReport {
    let spec = ViewDef::from_json_str(json).unwrap();
    validate_spec(&spec, &CompileDefaults::default())
}

fn paths(r: &ValidityReport) -> Vec<&str> {
    r.iter().map(|i| i.path.as_str()).collect()
}

#[test]
fn clean_spec_has_no_messages() {
    let r = report(
        r#"{"tracks": [{
            "id": "t",
            "data": {"type": "vector", "url": "https://server.io/api/v1/tileset_info/?d=abc"},
            "mark": "bar",
            "x": {"field": "start", "type": "genomic"},
            "color": {"field": "sample", "type": "nominal"}
        }]}"#,
    );
    assert!(r.is_valid(), "{r}");
    assert_eq!(r.to_string(), "");
}

#[test]
fn genomic_field_on_color_is_reported_with_channel_path() {
    let r = report(
        r#"{"views": [{"tracks": [
            {"id": "a"},
            {"id": "b", "color": {"field": "pos", "type": "genomic"}}
        ]}]}"#,
    );
    assert_eq!(paths(&r), ["$.views[0].tracks[1].color"]);
    assert!(r.issues[0].message.contains("'color'"));
}

#[test]
fn zero_span_zero_wrap_and_inverted_zoom() {
    let r = report(
        r#"{"wrap": 0, "zoomLimits": [100, 10], "tracks": [{"id": "a", "span": 0}]}"#,
    );
    assert_eq!(paths(&r), ["$.wrap", "$.zoomLimits", "$.tracks[0].span"]);
}

#[test]
fn duplicate_ids_point_at_first_declaration() {
    let r = report(r#"{"views": [{"id": "v", "tracks": [{"id": "v"}]}]}"#);
    assert_eq!(r.len(), 1);
    assert_eq!(r.issues[0].path, "$.views[0].tracks[0].id");
    assert!(r.issues[0].message.contains("$.views[0]"));
}

#[test]
fn chromosome_checks_follow_the_nearest_assembly() {
    let r = report(
        r#"{"views": [
            {"xDomain": {"chromosome": "chrZ"}, "tracks": [{"id": "a"}]},
            {"assembly": [["ctg1", 500]], "xDomain": {"chromosome": "ctg1", "interval": [1, 2]},
             "tracks": [{"id": "b"}]},
            {"assembly": "zz9", "xDomain": {"chromosome": "chr1"}, "tracks": [{"id": "c"}]}
        ]}"#,
    );
    assert_eq!(paths(&r), ["$.views[0].xDomain", "$.views[2].assembly"]);
}

#[test]
fn first_track_overlaying_previous_is_reported() {
    let r = report(r#"{"tracks": [{"id": "a", "overlayOnPreviousTrack": true}, {"id": "b"}]}"#);
    assert_eq!(paths(&r), ["$.tracks[0].overlayOnPreviousTrack"]);
}

#[test]
fn three_linking_ids_on_one_track() {
    let r = report(
        r#"{"tracks": [{
            "id": "a",
            "x": {"field": "s", "type": "genomic", "linkingId": "one"},
            "overlay": [
                {"xe": {"field": "e", "type": "genomic", "linkingId": "two"}},
                {"x1": {"field": "e", "type": "genomic", "linkingId": "three"}}
            ]
        }]}"#,
    );
    assert_eq!(paths(&r), ["$.tracks[0]"]);
    assert!(r.issues[0].message.contains("one, two, three"));
}

#[test]
fn tile_data_without_tileset_url() {
    let r = report(
        r#"{"tracks": [
            {"id": "a", "data": {"type": "multivec", "url": "https://example.org/data.mv5"}},
            {"id": "b", "data": {"type": "csv", "url": "https://example.org/data.csv"}}
        ]}"#,
    );
    assert_eq!(paths(&r), ["$.tracks[0].data"]);
}

#[test]
fn report_display_joins_lines() {
    let r = report(r#"{"wrap": 0, "tracks": [{"id": "a", "span": 0}]}"#);
    assert_eq!(
        r.to_string(),
        "$.wrap: wrap must be at least 1\n$.tracks[0].span: span must be at least 1"
    );
}
