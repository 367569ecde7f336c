use std::collections::HashSet;

use crate::spec::model::ViewDef;
use crate::traverse::{NodeRef, Walk, walk, walk_from};

/// Ordered, de-duplicated ids of views and of tracks that group other tracks.
///
/// Root first, then depth-first in declaration order.
pub fn collect_view_ids(root: &ViewDef) -> Vec<String> {
    collect(NodeRef::View(root), |n| !n.is_leaf_track())
}

/// Ordered, de-duplicated ids of leaf tracks.
pub fn collect_track_ids(root: &ViewDef) -> Vec<String> {
    collect_track_ids_from(NodeRef::View(root))
}

/// Leaf track ids at or below `start`.
pub fn collect_track_ids_from(start: NodeRef<'_>) -> Vec<String> {
    collect(start, |n| n.is_leaf_track())
}

fn collect(start: NodeRef<'_>, keep: impl Fn(NodeRef<'_>) -> bool) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk_from(start, |node, _| {
        if keep(node)
            && let Some(id) = node.id()
            && seen.insert(id)
        {
            out.push(id.to_owned());
        }
        Walk::Continue
    });
    out
}

/// First node, depth-first, whose id is `id`.
///
/// Duplicate ids resolve to the earliest node; `None` means no such id.
pub fn find_node_by_id<'a>(root: &'a ViewDef, id: &str) -> Option<NodeRef<'a>> {
    let mut found = None;
    walk(root, |node, _| {
        if node.id() == Some(id) {
            found = Some(node);
            Walk::Stop
        } else {
            Walk::Continue
        }
    });
    found
}

#[cfg(test)]
#[path = "../../tests/unit/ident/resolver.rs"]
mod tests;
