use std::collections::HashMap;

use serde::Serialize;
use smallvec::SmallVec;

use crate::compile::builder::BuiltView;
use crate::foundation::ids::LinkIdx;
use crate::foundation::intern::LinkInterner;
use crate::linking::union_find::LinkSets;
use crate::spec::channel::{ChannelDef, ChannelKey};
use crate::spec::model::Mark;

/// One genomic channel carrying a linking id.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRelation {
    /// Renderer view holding the track.
    pub view_id: String,
    /// Track (layer) id.
    pub track_id: String,
    /// Channel the id sits on.
    pub channel: ChannelKey,
    /// Id as written, used for brush targeting.
    pub link_id: String,
    /// The layer is a brush mark.
    pub is_brush: bool,
    /// Canonical id of the merged zoom group.
    pub zoom_link_id: String,
}

/// A brush in one view showing another view's visible range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrushProjection {
    /// View that draws the brush.
    pub host_view_id: String,
    /// View whose range the brush shows.
    pub target_view_id: String,
    /// Shared linking id.
    pub link_id: String,
    /// Brush channel.
    pub channel: ChannelKey,
}

/// Views that zoom and pan together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomGroup {
    /// Canonical id: the earliest-seen member id.
    pub id: String,
    /// Member linking ids, first-seen order.
    pub link_ids: Vec<String>,
    /// Member views, first-seen order.
    pub view_ids: Vec<String>,
}

/// A track exposing three or more distinct linking ids at once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkIssue {
    /// Renderer view.
    pub view_id: String,
    /// Offending track.
    pub track_id: String,
    /// All distinct ids it exposes.
    pub link_ids: Vec<String>,
}

/// Output of [`resolve_links`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkingResult {
    /// Relations in view, track, channel order.
    pub relations: Vec<LinkRelation>,
    /// Zoom groups, ordered by canonical id first appearance.
    pub zoom_groups: Vec<ZoomGroup>,
    /// Brush targets.
    pub brushes: Vec<BrushProjection>,
    /// Tracks with three or more ids; all of them were merged.
    pub issues: Vec<LinkIssue>,
}

impl LinkingResult {
    /// Zoom group containing `view_id`.
    pub fn zoom_group_of(&self, view_id: &str) -> Option<&ZoomGroup> {
        self.zoom_groups
            .iter()
            .find(|g| g.view_ids.iter().any(|v| v == view_id))
    }

    /// Brushes drawn by `host_view_id`.
    pub fn brushes_of<'a>(&'a self, host_view_id: &'a str) -> impl Iterator<Item = &'a BrushProjection> + 'a {
        self.brushes.iter().filter(move |b| b.host_view_id == host_view_id)
    }
}

struct Pending {
    view_id: String,
    track_id: String,
    channel: ChannelKey,
    link_id: String,
    is_brush: bool,
    idx: LinkIdx,
}

/// Find shared linking ids across views and merge them into zoom groups.
///
/// Distinct ids on one non-brush track are merged; brush tracks never merge
/// their ids since a brush follows exactly one partner.
#[tracing::instrument(skip(views))]
pub fn resolve_links(views: &[BuiltView]) -> LinkingResult {
    let mut interner = LinkInterner::default();
    let mut sets = LinkSets::default();
    let mut pending = Vec::<Pending>::new();
    let mut issues = Vec::new();

    for view in views {
        for track in &view.tracks {
            let is_brush = track.mark == Some(Mark::Brush);
            let track_id = track.id.clone().unwrap_or_default();
            let mut distinct = SmallVec::<[LinkIdx; 2]>::new();
            for key in ChannelKey::GENOMIC {
                let Some(link) = track.channel(key).and_then(ChannelDef::linking_id) else {
                    continue;
                };
                let idx = interner.intern(link);
                sets.ensure(idx);
                pending.push(Pending {
                    view_id: view.view_id.clone(),
                    track_id: track_id.clone(),
                    channel: key,
                    link_id: link.to_owned(),
                    is_brush,
                    idx,
                });
                if !is_brush && !distinct.contains(&idx) {
                    distinct.push(idx);
                }
            }
            if let [first, rest @ ..] = distinct.as_slice() {
                for other in rest {
                    sets.union(*first, *other);
                }
            }
            if distinct.len() >= 3 {
                let link_ids: Vec<String> = distinct.iter().map(|&i| interner.get(i).to_owned()).collect();
                tracing::warn!(view = %view.view_id, track = %track_id, ?link_ids, "track uses three or more linking ids; merging all of them");
                issues.push(LinkIssue {
                    view_id: view.view_id.clone(),
                    track_id,
                    link_ids,
                });
            }
        }
    }

    let relations: Vec<LinkRelation> = pending
        .into_iter()
        .map(|p| LinkRelation {
            zoom_link_id: interner.get(sets.find(p.idx)).to_owned(),
            view_id: p.view_id,
            track_id: p.track_id,
            channel: p.channel,
            link_id: p.link_id,
            is_brush: p.is_brush,
        })
        .collect();

    let zoom_groups = zoom_groups(&relations);
    let brushes = brush_projections(&relations);
    tracing::debug!(
        link_ids = interner.len(),
        relations = relations.len(),
        groups = zoom_groups.len(),
        brushes = brushes.len(),
        "resolved links"
    );
    LinkingResult {
        relations,
        zoom_groups,
        brushes,
        issues,
    }
}

fn zoom_groups(relations: &[LinkRelation]) -> Vec<ZoomGroup> {
    let mut groups = Vec::<ZoomGroup>::new();
    let mut pos_by_id = HashMap::<&str, usize>::new();
    for r in relations.iter().filter(|r| !r.is_brush) {
        let pos = *pos_by_id.entry(r.zoom_link_id.as_str()).or_insert_with(|| {
            groups.push(ZoomGroup {
                id: r.zoom_link_id.clone(),
                link_ids: Vec::new(),
                view_ids: Vec::new(),
            });
            groups.len() - 1
        });
        let g = &mut groups[pos];
        if !g.link_ids.contains(&r.link_id) {
            g.link_ids.push(r.link_id.clone());
        }
        if !g.view_ids.contains(&r.view_id) {
            g.view_ids.push(r.view_id.clone());
        }
    }
    groups
}

fn brush_projections(relations: &[LinkRelation]) -> Vec<BrushProjection> {
    let mut out = Vec::<BrushProjection>::new();
    for brush in relations.iter().filter(|r| r.is_brush) {
        let targets = relations
            .iter()
            .filter(|r| !r.is_brush && r.link_id == brush.link_id && r.view_id != brush.view_id);
        for t in targets {
            let p = BrushProjection {
                host_view_id: brush.view_id.clone(),
                target_view_id: t.view_id.clone(),
                link_id: brush.link_id.clone(),
                channel: brush.channel,
            };
            if !out.contains(&p) {
                out.push(p);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/linking/resolver.rs"]
mod tests;
