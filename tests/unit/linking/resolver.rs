use super::*;
use crate::spec::channel::{FieldDef, FieldType};
use crate::spec::model::TrackDef;

fn linked(field: &str, link: &str) -> Option<ChannelDef> {
    let mut f = FieldDef::new(field, FieldType::Genomic);
    f.linking_id = Some(link.to_owned());
    Some(ChannelDef::Field(f))
}

fn track(id: &str, mark: Mark, x: &str, x1: Option<&str>) -> TrackDef {
    TrackDef {
        id: Some(id.to_owned()),
        mark: Some(mark),
        x: linked("s", x),
        x1: x1.and_then(|l| linked("s2", l)),
        ..TrackDef::default()
    }
}

fn view(id: &str, tracks: Vec<TrackDef>) -> BuiltView {
    BuiltView {
        view_id: id.to_owned(),
        tracks,
    }
}

#[test]
fn co_occurring_ids_merge_transitively() {
    let views = [
        view("A", vec![track("a", Mark::Rect, "X", None)]),
        view("B", vec![track("b", Mark::BetweenLink, "X", Some("Y"))]),
        view("C", vec![track("c", Mark::Rect, "Y", None)]),
    ];
    let out = resolve_links(&views);
    assert_eq!(out.relations.len(), 4);
    assert!(out.relations.iter().all(|r| r.zoom_link_id == "X"));
    assert_eq!(out.zoom_groups.len(), 1);
    assert_eq!(out.zoom_groups[0].link_ids, ["X", "Y"]);
    assert_eq!(out.zoom_groups[0].view_ids, ["A", "B", "C"]);
    assert_eq!(out.zoom_group_of("C").map(|g| g.id.as_str()), Some("X"));
    assert!(out.issues.is_empty());
}

#[test]
fn unrelated_ids_stay_apart() {
    let views = [
        view("A", vec![track("a", Mark::Rect, "X", None)]),
        view("B", vec![track("b", Mark::Rect, "Y", None)]),
    ];
    let out = resolve_links(&views);
    assert_eq!(out.zoom_groups.len(), 2);
    assert_eq!(out.relations[1].zoom_link_id, "Y");
    assert!(out.zoom_group_of("Z").is_none());
}

#[test]
fn brushes_target_exact_partner_and_do_not_merge() {
    let views = [
        view(
            "overview",
            vec![
                track("ov", Mark::Rect, "O", None),
                track("br", Mark::Brush, "D", None),
            ],
        ),
        view("detail", vec![track("dt", Mark::Rect, "D", None)]),
        view("other", vec![track("ot", Mark::Rect, "D", None)]),
    ];
    let out = resolve_links(&views);
    let brush = out.relations.iter().find(|r| r.is_brush).unwrap();
    assert_eq!(brush.link_id, "D");
    assert_eq!(out.zoom_group_of("overview").map(|g| g.id.as_str()), Some("O"));
    let targets: Vec<_> = out.brushes_of("overview").map(|b| b.target_view_id.as_str()).collect();
    assert_eq!(targets, ["detail", "other"]);
    assert_eq!(out.zoom_group_of("detail").unwrap().view_ids, ["detail", "other"]);
}

#[test]
fn three_ids_on_one_track_merge_all_and_report() {
    let mut t = track("t", Mark::BetweenLink, "P", Some("Q"));
    t.y = linked("y", "R");
    let views = [view("V", vec![t]), view("W", vec![track("w", Mark::Rect, "R", None)])];
    let out = resolve_links(&views);
    assert_eq!(out.issues.len(), 1);
    assert_eq!(out.issues[0].link_ids, ["P", "Q", "R"]);
    assert!(out.relations.iter().all(|r| r.zoom_link_id == "P"));
    assert_eq!(out.zoom_groups[0].view_ids, ["V", "W"]);
}

#[test]
fn non_genomic_and_unlinked_channels_are_ignored() {
    let t = TrackDef {
        id: Some("t".to_owned()),
        x: Some(ChannelDef::Field(FieldDef::new("s", FieldType::Genomic))),
        color: Some(ChannelDef::value("red")),
        ..TrackDef::default()
    };
    let out = resolve_links(&[view("V", vec![t])]);
    assert_eq!(out, LinkingResult::default());
}
