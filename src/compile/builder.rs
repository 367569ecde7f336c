use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::compile::options::CompileOptions;
use crate::compile::plan::{FragmentKind, LockTable, RendererConfig, RendererView, TrackFragment, TrackSlots};
use crate::layout::{CompositionLayout, LayoutSlot};
use crate::linking::resolver::LinkingResult;
use crate::spec::assembly::ChromSizes;
use crate::spec::channel::{AxisPosition, ChannelDef};
use crate::spec::model::{DomainDef, Mark, TrackDef};

/// Thickness of an axis fragment in pixels.
const AXIS_SIZE: f64 = 30.0;

/// The drawn layers of one renderer view, as seen by the linking resolver.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltView {
    /// Renderer view uid (the slot id).
    pub view_id: String,
    /// Layers with overlays resolved.
    pub tracks: Vec<TrackDef>,
}

/// One [`BuiltView`] per slot.
pub fn built_views(layout: &CompositionLayout) -> Vec<BuiltView> {
    layout
        .slots
        .iter()
        .map(|slot| BuiltView {
            view_id: slot.id.clone(),
            tracks: slot.layers(),
        })
        .collect()
}

/// Emit the renderer configuration: one view per slot and the lock tables.
#[tracing::instrument(skip_all)]
pub fn build_config(
    layout: &CompositionLayout,
    linking: &LinkingResult,
    options: &CompileOptions,
) -> RendererConfig {
    let default_sizes = ChromSizes::builtin(&options.defaults.assembly);
    let views: Vec<RendererView> = layout
        .slots
        .iter()
        .map(|slot| build_view(slot, linking, options, default_sizes.as_ref()))
        .collect();
    let locks = lock_table(&views, linking);
    tracing::debug!(views = views.len(), locks = locks.locks_dict.len(), "built renderer config");
    RendererConfig {
        editable: false,
        views,
        zoom_locks: locks.clone(),
        location_locks: locks,
    }
}

fn build_view(
    slot: &LayoutSlot,
    linking: &LinkingResult,
    options: &CompileOptions,
    default_sizes: Option<&ChromSizes>,
) -> RendererView {
    let bb = slot.bounding_box;
    let (w, h) = (bb.width, bb.height);
    let layers = slot.layers();
    let mut tracks = TrackSlots::default();

    if let Some(side) = axis_side(&layers) {
        let (aw, ah) = match side {
            AxisPosition::Left | AxisPosition::Right => (AXIS_SIZE, h),
            _ => (w, AXIS_SIZE),
        };
        tracks.push(side, TrackFragment::new(format!("{}-axis", slot.id), FragmentKind::AxisTrack, aw, ah));
    }

    let (brushes, drawn): (Vec<TrackDef>, Vec<TrackDef>) =
        layers.into_iter().partition(|l| l.mark == Some(Mark::Brush));

    let content = match drawn.as_slice() {
        [] => TrackFragment::new(slot.id.clone(), FragmentKind::Empty, w, h),
        [single] => data_fragment(single, slot.id.clone(), w, h),
        [first, ..] if options.native_overlay => {
            let mut group = first.clone();
            group.data = drawn.iter().find_map(|l| l.data.clone());
            group.overlay = Some(drawn.clone());
            data_fragment(&group, slot.id.clone(), w, h)
        }
        many => {
            let mut combined = TrackFragment::new(slot.id.clone(), FragmentKind::Combined, w, h);
            combined.contents = many
                .iter()
                .enumerate()
                .map(|(i, l)| data_fragment(l, format!("{}-{i}", slot.id), w, h))
                .collect();
            combined
        }
    };
    tracks.push_center(content);

    for (i, brush) in brushes.iter().enumerate() {
        let uid = format!("{}-brush-{i}", slot.id);
        let link = brush.x.as_ref().and_then(ChannelDef::linking_id);
        let target = linking
            .brushes_of(&slot.id)
            .find(|p| Some(p.link_id.as_str()) == link);
        let fragment = match target {
            Some(p) => {
                let mut f = TrackFragment::new(uid, FragmentKind::ViewportProjection, w, h);
                f.from_view_uid = Some(p.target_view_id.clone());
                f.spec = Some(Box::new(brush.clone()));
                f
            }
            None => {
                tracing::warn!(view = %slot.id, "brush has no partner view");
                TrackFragment::new(uid, FragmentKind::Empty, w, h)
            }
        };
        tracks.push_center(fragment);
    }

    let sizes = slot
        .owner
        .assembly
        .as_ref()
        .and_then(ChromSizes::for_assembly);
    RendererView {
        uid: slot.id.clone(),
        layout: slot.relative_box,
        bounding_box: bb,
        polar: slot.polar,
        initial_x_domain: initial_x_domain(&slot.owner, sizes.as_ref().or(default_sizes)),
        zoom_limits: slot.owner.zoom_limits.unwrap_or(options.defaults.zoom_limits),
        tracks,
    }
}

/// A data track, or a placeholder when the layer has no data source.
fn data_fragment(layer: &TrackDef, uid: String, w: f64, h: f64) -> TrackFragment {
    let Some(data) = layer.data.as_ref() else {
        return TrackFragment::new(uid, FragmentKind::Empty, w, h);
    };
    let mut f = TrackFragment::new(uid, FragmentKind::GoslingTrack, w, h);
    if data.is_tile_based() {
        match data.tile_source() {
            Some(src) => {
                f.server = Some(src.server);
                f.tileset_uid = Some(src.tileset_uid);
            }
            None => tracing::warn!(track = %f.uid, url = ?data.url, "cannot split tileset url"),
        }
    }
    f.spec = Some(Box::new(layer.clone()));
    f
}

fn axis_side(layers: &[TrackDef]) -> Option<AxisPosition> {
    layers
        .iter()
        .filter_map(|l| l.x.as_ref().and_then(ChannelDef::genomic))
        .find_map(|f| f.axis)
        .filter(|a| *a != AxisPosition::None)
}

fn initial_x_domain(owner: &TrackDef, sizes: Option<&ChromSizes>) -> [f64; 2] {
    match (owner.x_domain.as_ref(), sizes) {
        (Some(d), Some(s)) => s.absolute_domain(d).unwrap_or_else(|| s.whole_genome()),
        (Some(DomainDef::Interval { interval }), None) => *interval,
        (_, Some(s)) => s.whole_genome(),
        (_, None) => [0.0, 0.0],
    }
}

/// Locks for every zoom group spanning two or more views.
fn lock_table(views: &[RendererView], linking: &LinkingResult) -> LockTable {
    let domain_by_uid: HashMap<&str, [f64; 2]> =
        views.iter().map(|v| (v.uid.as_str(), v.initial_x_domain)).collect();
    let mut table = LockTable::default();
    for group in linking.zoom_groups.iter().filter(|g| g.view_ids.len() >= 2) {
        let mut members = BTreeMap::new();
        for uid in &group.view_ids {
            let Some(&[start, end]) = domain_by_uid.get(uid.as_str()) else {
                continue;
            };
            let center = (start + end) / 2.0;
            members.insert(uid.clone(), [center, center, end - start]);
            table.locks_by_view_uid.insert(uid.clone(), group.id.clone());
        }
        table.locks_dict.insert(group.id.clone(), members);
    }
    table
}

#[cfg(test)]
#[path = "../../tests/unit/compile/builder.rs"]
mod tests;
