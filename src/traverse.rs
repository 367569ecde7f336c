//! Depth-first walk over the view/track tree.

use crate::spec::model::{TrackDef, ViewDef};

/// A borrowed node of the tree.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
    /// A view.
    View(&'a ViewDef),
    /// A track, overlay layer, or stacked-group entry.
    Track(&'a TrackDef),
}

impl<'a> NodeRef<'a> {
    /// Declared or generated id.
    pub fn id(self) -> Option<&'a str> {
        match self {
            Self::View(v) => v.id.as_deref(),
            Self::Track(t) => t.id.as_deref(),
        }
    }

    /// `true` for a track that neither overlays layers nor nests tracks.
    pub fn is_leaf_track(self) -> bool {
        matches!(self, Self::Track(t) if t.is_leaf())
    }
}

/// One step of a [`NodePath`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathElem {
    /// Object field.
    Field(&'static str),
    /// Array index.
    Index(usize),
}

/// JSON-path-like location of a node, rendered as `$.views[0].tracks[1]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodePath(Vec<PathElem>);

impl NodePath {
    /// The root path `$`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path extended with `.field[index]`.
    pub fn child(&self, field: &'static str, index: usize) -> Self {
        let mut out = self.clone();
        out.push_child(field, index);
        out
    }

    /// Path extended with `.field`.
    pub fn field(&self, field: &'static str) -> Self {
        let mut out = self.clone();
        out.0.push(PathElem::Field(field));
        out
    }

    pub(crate) fn push_child(&mut self, field: &'static str, index: usize) {
        self.0.push(PathElem::Field(field));
        self.0.push(PathElem::Index(index));
    }

    pub(crate) fn pop_child(&mut self) {
        self.0.pop();
        self.0.pop();
    }

    /// Steps from the root.
    pub fn elems(&self) -> &[PathElem] {
        &self.0
    }
}

impl std::fmt::Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("$")?;
        for e in &self.0 {
            match e {
                PathElem::Field(name) => write!(f, ".{name}")?,
                PathElem::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

/// Visitor verdict for [`walk`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Walk {
    /// Descend into children.
    Continue,
    /// Do not descend below this node.
    SkipChildren,
    /// Abort the whole walk.
    Stop,
}

/// Visit every node depth-first in declaration order.
///
/// A view is visited before its child views or tracks; a track before its
/// overlay layers, which come before its nested `tracks`.
pub fn walk<'a, F>(root: &'a ViewDef, visit: F)
where
    F: FnMut(NodeRef<'a>, &NodePath) -> Walk,
{
    walk_from(NodeRef::View(root), visit);
}

/// Like [`walk`], starting at any node; paths are relative to `start`.
pub fn walk_from<'a, F>(start: NodeRef<'a>, mut visit: F)
where
    F: FnMut(NodeRef<'a>, &NodePath) -> Walk,
{
    let mut path = NodePath::root();
    match start {
        NodeRef::View(v) => walk_view(v, &mut path, &mut visit),
        NodeRef::Track(t) => walk_track(t, &mut path, &mut visit),
    };
}

fn walk_view<'a, F>(view: &'a ViewDef, path: &mut NodePath, visit: &mut F) -> bool
where
    F: FnMut(NodeRef<'a>, &NodePath) -> Walk,
{
    match visit(NodeRef::View(view), path) {
        Walk::Stop => return false,
        Walk::SkipChildren => return true,
        Walk::Continue => {}
    }
    for (i, child) in view.views.iter().flatten().enumerate() {
        path.push_child("views", i);
        let go_on = walk_view(child, path, visit);
        path.pop_child();
        if !go_on {
            return false;
        }
    }
    walk_tracks(view.tracks.as_deref().unwrap_or_default(), "tracks", path, visit)
}

fn walk_tracks<'a, F>(
    tracks: &'a [TrackDef],
    field: &'static str,
    path: &mut NodePath,
    visit: &mut F,
) -> bool
where
    F: FnMut(NodeRef<'a>, &NodePath) -> Walk,
{
    for (i, t) in tracks.iter().enumerate() {
        path.push_child(field, i);
        let go_on = walk_track(t, path, visit);
        path.pop_child();
        if !go_on {
            return false;
        }
    }
    true
}

fn walk_track<'a, F>(track: &'a TrackDef, path: &mut NodePath, visit: &mut F) -> bool
where
    F: FnMut(NodeRef<'a>, &NodePath) -> Walk,
{
    match visit(NodeRef::Track(track), path) {
        Walk::Stop => return false,
        Walk::SkipChildren => return true,
        Walk::Continue => {}
    }
    walk_tracks(track.overlay.as_deref().unwrap_or_default(), "overlay", path, visit)
        && walk_tracks(track.tracks.as_deref().unwrap_or_default(), "tracks", path, visit)
}

#[cfg(test)]
#[path = "../tests/unit/traverse.rs"]
mod tests;
