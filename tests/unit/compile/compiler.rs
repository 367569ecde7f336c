use super::*;

use crate::compile::options::CompileDefaults;

fn spec(json: &str) -> ViewDef {
    ViewDef::from_json_str(json).unwrap()
}

const TWO_VIEWS: &str = r#"{
    "arrangement": "vertical",
    "views": [
        {"id": "top", "linkingId": "z", "tracks": [{"id": "a", "x": {"field": "s", "type": "genomic"}}]},
        {"id": "bottom", "linkingId": "z", "tracks": [
            {"id": "b", "x": {"field": "s", "type": "genomic"}},
            {"id": "bad", "template": "does-not-exist"}
        ]}
    ]
}"#;

#[test]
fn compile_runs_every_stage() {
    let out = compile(&spec(TWO_VIEWS), &CompileOptions::default()).unwrap();
    let uids: Vec<_> = out.config.views.iter().map(|v| v.uid.as_str()).collect();
    assert_eq!(uids, ["a", "b"]);
    assert_eq!(out.layout.slots.len(), 2);
    assert_eq!(out.linking.zoom_groups.len(), 1);
    assert_eq!(out.config.zoom_locks.locks_by_view_uid.len(), 2);
    assert_eq!(out.index.track_ids(), ["a", "b"]);
    assert_eq!(out.dropped.len(), 1);
    assert_eq!(out.dropped[0].id.as_deref(), Some("bad"));
    assert!(out.validity.is_valid());
}

#[test]
fn validity_messages_are_reported_but_not_fatal() {
    let s = spec(r#"{"tracks": [{"id": "a", "color": {"field": "p", "type": "genomic"}}]}"#);
    let out = compile(&s, &CompileOptions::default()).unwrap();
    assert_eq!(out.validity.len(), 1);
    assert_eq!(out.config.views.len(), 1);
}

#[test]
fn strict_mode_promotes_validity_messages() {
    let s = spec(r#"{"tracks": [{"id": "a", "span": 0}]}"#);
    let opts = CompileOptions {
        strict: true,
        ..CompileOptions::default()
    };
    let err = compile(&s, &opts).unwrap_err();
    assert!(matches!(err, GenoError::Validity(_)));
    assert!(err.to_string().starts_with("validity error: $.tracks[0].span"));
}

#[test]
fn structural_errors_fail_the_compile() {
    let s = spec(r#"{"views": [{"id": "ok", "tracks": [{"id": "a"}]}, {"id": "empty"}]}"#);
    let err = compile(&s, &CompileOptions::default()).unwrap_err();
    assert!(matches!(err, GenoError::Structure { ref path, .. } if path == "$.views[1]"));
}

#[test]
fn user_defaults_flow_into_layout() {
    let opts = CompileOptions {
        defaults: CompileDefaults {
            track_width: 250.0,
            track_height: 40.0,
            ..CompileDefaults::default()
        },
        ..CompileOptions::default()
    };
    let out = compile(&spec(r#"{"tracks": [{"id": "a"}]}"#), &opts).unwrap();
    let bb = out.layout.slots[0].bounding_box;
    assert_eq!((bb.width, bb.height), (250.0, 40.0));
}
