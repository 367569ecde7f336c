use super::*;

fn tree() -> ViewDef {
    ViewDef::from_json_str(
        r#"{
            "id": "root",
            "views": [
                {"id": "left", "tracks": [
                    {"id": "t1"},
                    {"id": "group", "overlay": [{"id": "l1"}, {"id": "l2"}]},
                    {"id": "t1"}
                ]},
                {"id": "right", "tracks": [{"id": "t2"}, {"id": "left"}]}
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn view_ids_include_grouping_tracks() {
    assert_eq!(collect_view_ids(&tree()), ["root", "left", "group", "right"]);
}

#[test]
fn track_ids_are_leaves_in_order_without_duplicates() {
    assert_eq!(collect_track_ids(&tree()), ["t1", "l1", "l2", "t2", "left"]);
}

#[test]
fn track_ids_below_a_node() {
    let root = tree();
    let group = find_node_by_id(&root, "group").unwrap();
    assert_eq!(collect_track_ids_from(group), ["l1", "l2"]);
}

#[test]
fn find_returns_first_match_or_none() {
    let root = tree();
    assert!(matches!(find_node_by_id(&root, "left"), Some(NodeRef::View(_))));
    assert!(matches!(find_node_by_id(&root, "t2"), Some(NodeRef::Track(_))));
    assert!(find_node_by_id(&root, "missing").is_none());
}
