use std::collections::HashMap;

use serde::Serialize;

use crate::foundation::ids::SlotIdx;
use crate::ident::resolver::{collect_track_ids, collect_view_ids};
use crate::layout::CompositionLayout;
use crate::spec::model::ViewDef;
use crate::traverse::{Walk, walk};

/// Read-only id lookup built once per compile.
///
/// Maps every id in the normalized tree to its node path, and every track id
/// to the layout slot that draws it.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdIndex {
    view_ids: Vec<String>,
    track_ids: Vec<String>,
    #[serde(skip)]
    path_by_id: HashMap<String, String>,
    #[serde(skip)]
    slot_by_id: HashMap<String, SlotIdx>,
}

impl IdIndex {
    /// Index `root` and the slots laid out from it.
    pub fn build(root: &ViewDef, layout: &CompositionLayout) -> Self {
        let mut path_by_id = HashMap::new();
        walk(root, |node, path| {
            if let Some(id) = node.id() {
                path_by_id.entry(id.to_owned()).or_insert_with(|| path.to_string());
            }
            Walk::Continue
        });

        let mut slot_by_id = HashMap::new();
        for (i, slot) in layout.slots.iter().enumerate() {
            let idx = SlotIdx(u32::try_from(i).unwrap_or(u32::MAX));
            let layer_ids = slot
                .tracks()
                .flat_map(|t| std::iter::once(t).chain(t.overlay.iter().flatten()))
                .filter_map(|t| t.id.as_deref());
            for id in layer_ids {
                slot_by_id.entry(id.to_owned()).or_insert(idx);
            }
        }

        Self {
            view_ids: collect_view_ids(root),
            track_ids: collect_track_ids(root),
            path_by_id,
            slot_by_id,
        }
    }

    /// View-like ids in declaration order.
    pub fn view_ids(&self) -> &[String] {
        &self.view_ids
    }

    /// Leaf track ids in declaration order.
    pub fn track_ids(&self) -> &[String] {
        &self.track_ids
    }

    /// Slot drawing the track `id`.
    pub fn slot_of(&self, id: &str) -> Option<SlotIdx> {
        self.slot_by_id.get(id).copied()
    }

    /// Node path of `id`, e.g. `$.views[0].tracks[2]`.
    pub fn path_of(&self, id: &str) -> Option<&str> {
        self.path_by_id.get(id).map(String::as_str)
    }

    /// `true` when any node carries `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.path_by_id.contains_key(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ident/index.rs"]
mod tests;
