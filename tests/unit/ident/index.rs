use super::*;
use crate::compile::options::CompileDefaults;
use crate::layout::solver::compute_layout;

#[test]
fn followers_map_to_the_owner_slot() {
    let root = ViewDef::from_json_str(
        r#"{"id": "v", "tracks": [
            {"id": "a", "height": 10},
            {"id": "b", "overlayOnPreviousTrack": true},
            {"id": "c", "overlayOnPreviousTrack": true},
            {"id": "d", "overlay": [{"id": "d0"}, {}]}
        ]}"#,
    )
    .unwrap();
    let layout = compute_layout(&root, &CompileDefaults::default());
    let index = IdIndex::build(&root, &layout);

    assert_eq!(layout.slots.len(), 2);
    for id in ["a", "b", "c"] {
        assert_eq!(index.slot_of(id), Some(SlotIdx(0)));
    }
    assert_eq!(index.slot_of("d"), Some(SlotIdx(1)));
    assert_eq!(index.slot_of("d0"), Some(SlotIdx(1)));
    assert_eq!(index.slot_of("v"), None);
    assert_eq!(index.track_ids(), ["a", "b", "c", "d0"]);
    assert_eq!(index.view_ids(), ["v", "d"]);
    assert_eq!(index.path_of("d0"), Some("$.tracks[3].overlay[0]"));
    assert!(index.contains("v"));
    assert!(!index.contains("zzz"));
}

#[test]
fn index_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<IdIndex>();
}
