//! Absolute and relative placement of track slots.

pub mod circular;
pub mod solver;

use serde::Serialize;

use crate::foundation::geometry::{BoundingBox, PolarPlacement, RelativeBox, Size};
use crate::foundation::ids::SlotIdx;
use crate::normalize::overlay::resolve_overlay;
use crate::spec::model::TrackDef;

/// One layout slot: a track plus the tracks drawn on top of it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSlot {
    /// Id of the owning track.
    pub id: String,
    /// Id of the view holding the track.
    pub view_id: String,
    /// Track that claimed the space.
    pub owner: TrackDef,
    /// Overlay-on-previous tracks sharing the owner's box, in order.
    pub followers: Vec<TrackDef>,
    /// Absolute placement.
    pub bounding_box: BoundingBox,
    /// Placement on the relative grid.
    pub relative_box: RelativeBox,
    /// Ring placement under a circular layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polar: Option<PolarPlacement>,
}

impl LayoutSlot {
    /// Owner then followers.
    pub fn tracks(&self) -> impl Iterator<Item = &TrackDef> + '_ {
        std::iter::once(&self.owner).chain(&self.followers)
    }

    /// Every drawn layer in the slot, overlays resolved, in drawing order.
    pub fn layers(&self) -> Vec<TrackDef> {
        self.tracks().flat_map(resolve_overlay).collect()
    }
}

/// Result of [`solver::compute_layout`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CompositionLayout {
    /// Extent of the whole composition.
    pub size: Size,
    /// Slots in depth-first declaration order.
    pub slots: Vec<LayoutSlot>,
}

impl CompositionLayout {
    /// Slot by index.
    pub fn slot(&self, idx: SlotIdx) -> Option<&LayoutSlot> {
        self.slots.get(idx.0 as usize)
    }

    /// Slot owned by the track `id`.
    pub fn slot_by_id(&self, id: &str) -> Option<&LayoutSlot> {
        self.slots.iter().find(|s| s.id == id)
    }
}

/// Group a view's track list into `(owner, followers)` slots.
///
/// A leading overlay-on-previous track has nothing to join and owns its own slot.
pub(crate) fn group_slots(tracks: &[TrackDef]) -> Vec<(&TrackDef, Vec<&TrackDef>)> {
    let mut out = Vec::<(&TrackDef, Vec<&TrackDef>)>::new();
    for t in tracks {
        if t.is_overlay_on_previous()
            && let Some((_, followers)) = out.last_mut()
        {
            followers.push(t);
            continue;
        }
        out.push((t, Vec::new()));
    }
    out
}

/// Cell of a wrapped track grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GridCell {
    pub(crate) col: u32,
    pub(crate) row: u32,
    pub(crate) span: u32,
}

/// Assign grid cells left to right, starting a new row when a span does not fit.
///
/// Spans are clamped to `1..=columns`.
pub(crate) fn grid_cells(spans: impl IntoIterator<Item = u32>, columns: u32) -> Vec<GridCell> {
    let columns = columns.max(1);
    let mut col = 0u32;
    let mut row = 0u32;
    let mut out = Vec::new();
    for span in spans {
        let span = span.clamp(1, columns);
        if col > 0 && col + span > columns {
            row += 1;
            col = 0;
        }
        out.push(GridCell { col, row, span });
        col += span;
    }
    out
}

/// Width and height of the track that represents a slot's geometry.
pub(crate) fn representative_size(owner: &TrackDef, fallback: Size) -> Size {
    let rep = resolve_overlay(owner);
    let first = rep.first().unwrap_or(owner);
    Size::new(
        first.width.unwrap_or(fallback.width),
        first.height.unwrap_or(fallback.height),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
