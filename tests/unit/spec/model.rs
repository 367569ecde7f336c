use super::*;
use crate::spec::channel::{FieldDef, FieldType};

#[test]
fn parses_camel_case_track_fields() {
    let v = ViewDef::from_json_str(
        r#"{
            "id": "root",
            "static": true,
            "zoomLimits": [1, null],
            "xDomain": {"chromosome": "chr1", "interval": [10, 20]},
            "tracks": [{
                "id": "t",
                "mark": "withinLink",
                "overlayOnPreviousTrack": true,
                "flipY": false,
                "strokeWidth": {"value": 2},
                "x": {"field": "s", "type": "genomic", "linkingId": "L", "axis": "top"},
                "_invalidTrack": true
            }]
        }"#,
    )
    .unwrap();
    assert_eq!(v.is_static, Some(true));
    assert_eq!(v.zoom_limits, Some(ZoomLimits(Some(1.0), None)));
    assert_eq!(
        v.x_domain,
        Some(DomainDef::Chromosome {
            chromosome: "chr1".to_owned(),
            interval: Some([10.0, 20.0]),
        })
    );
    let t = &v.tracks.as_ref().unwrap()[0];
    assert_eq!(t.mark, Some(Mark::WithinLink));
    assert!(t.is_overlay_on_previous());
    assert!(t.invalid_track);
    assert_eq!(t.channel(ChannelKey::StrokeWidth), Some(&ChannelDef::value(2)));
    assert_eq!(t.channel(ChannelKey::X).and_then(|c| c.linking_id()), Some("L"));
}

#[test]
fn arrangement_accepts_direction_aliases() {
    let v = ViewDef::from_json_str(r#"{"arrangement": "horizontal", "views": []}"#).unwrap();
    assert_eq!(v.arrangement, Some(Arrangement::Parallel));
    let v = ViewDef::from_json_str(r#"{"arrangement": "vertical", "views": []}"#).unwrap();
    assert_eq!(v.arrangement, Some(Arrangement::Serial));
    assert_eq!(Arrangement::default(), Arrangement::Serial);
}

#[test]
fn interval_only_domain_and_custom_assembly() {
    let v = ViewDef::from_json_str(
        r#"{"xDomain": {"interval": [0, 5]}, "assembly": [["a", 10], ["b", 20]], "tracks": []}"#,
    )
    .unwrap();
    assert_eq!(v.x_domain, Some(DomainDef::Interval { interval: [0.0, 5.0] }));
    assert_eq!(
        v.assembly,
        Some(AssemblyDef::Custom(vec![("a".to_owned(), 10), ("b".to_owned(), 20)]))
    );
}

#[test]
fn serialization_omits_unset_fields() {
    let t = TrackDef {
        id: Some("a".to_owned()),
        ..TrackDef::default()
    };
    assert_eq!(serde_json::to_string(&t).unwrap(), r#"{"id":"a"}"#);
}

#[test]
fn children_classifies_both_and_neither() {
    let mut v = ViewDef::default();
    assert!(matches!(v.children(), ViewChildren::Neither));
    v.views = Some(vec![]);
    assert!(matches!(v.children(), ViewChildren::Views(_)));
    v.tracks = Some(vec![]);
    assert!(matches!(v.children(), ViewChildren::Both));
}

#[test]
fn merged_with_prefers_override_and_merges_style() {
    let base = TrackDef {
        mark: Some(Mark::Rect),
        height: Some(40.0),
        style: Some(StyleDef {
            outline: Some("black".to_owned()),
            background: Some("white".to_owned()),
            ..StyleDef::default()
        }),
        x: Some(ChannelDef::Field(FieldDef::new("start", FieldType::Genomic))),
        ..TrackDef::default()
    };
    let over = TrackDef {
        mark: Some(Mark::Text),
        style: Some(StyleDef {
            outline: Some("red".to_owned()),
            ..StyleDef::default()
        }),
        ..TrackDef::default()
    };
    let m = base.merged_with(&over);
    assert_eq!(m.mark, Some(Mark::Text));
    assert_eq!(m.height, Some(40.0));
    assert_eq!(m.x, base.x);
    let style = m.style.unwrap();
    assert_eq!(style.outline.as_deref(), Some("red"));
    assert_eq!(style.background.as_deref(), Some("white"));
}

#[test]
fn channel_accessors_cover_every_key() {
    let mut t = TrackDef::default();
    for (i, key) in ChannelKey::ALL.into_iter().enumerate() {
        t.set_channel(key, Some(ChannelDef::value(i)));
    }
    let seen: Vec<_> = t.channels().map(|(k, _)| k).collect();
    assert_eq!(seen, ChannelKey::ALL.to_vec());
    for (i, key) in ChannelKey::ALL.into_iter().enumerate() {
        assert_eq!(t.channel(key), Some(&ChannelDef::value(i)));
    }
}

#[test]
fn leaf_means_no_layers_and_no_nested_tracks() {
    let mut t = TrackDef::default();
    assert!(t.is_leaf());
    t.overlay = Some(vec![]);
    assert!(t.is_leaf());
    t.overlay = Some(vec![TrackDef::default()]);
    assert!(!t.is_leaf());
}

#[test]
fn bad_json_is_a_serde_error() {
    let err = ViewDef::from_json_str("{").unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));
}
