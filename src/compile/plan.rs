use std::collections::BTreeMap;

use serde::Serialize;

use crate::foundation::geometry::{BoundingBox, PolarPlacement, RelativeBox};
use crate::spec::channel::AxisPosition;
use crate::spec::model::{TrackDef, ZoomLimits};

/// Host configuration for the tile-based renderer.
///
/// One [`RendererView`] per layout slot plus the lock tables that keep
/// linked views in step.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RendererConfig {
    /// Whether the renderer allows interactive editing of the layout.
    pub editable: bool,
    /// Views in slot order.
    pub views: Vec<RendererView>,
    /// Zoom lock table.
    pub zoom_locks: LockTable,
    /// Location lock table.
    pub location_locks: LockTable,
}

impl RendererConfig {
    /// View by uid.
    pub fn view(&self, uid: &str) -> Option<&RendererView> {
        self.views.iter().find(|v| v.uid == uid)
    }
}

/// One renderer view, i.e. one layout slot.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RendererView {
    /// Id of the slot's owning track.
    pub uid: String,
    /// Placement on the relative grid.
    pub layout: RelativeBox,
    /// Absolute placement.
    pub bounding_box: BoundingBox,
    /// Ring placement under a circular layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polar: Option<PolarPlacement>,
    /// Initial absolute genomic range.
    pub initial_x_domain: [f64; 2],
    /// Zoom limits.
    pub zoom_limits: ZoomLimits,
    /// Track fragments by side.
    pub tracks: TrackSlots,
}

/// Directional track lists of a renderer view.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TrackSlots {
    /// Above the center.
    pub top: Vec<TrackFragment>,
    /// Left of the center.
    pub left: Vec<TrackFragment>,
    /// Main area.
    pub center: Vec<TrackFragment>,
    /// Right of the center.
    pub right: Vec<TrackFragment>,
    /// Below the center.
    pub bottom: Vec<TrackFragment>,
}

impl TrackSlots {
    /// Append to the center list.
    pub fn push_center(&mut self, fragment: TrackFragment) {
        self.center.push(fragment);
    }

    /// Append to the list named by `side`; `None` lands in the center.
    pub fn push(&mut self, side: AxisPosition, fragment: TrackFragment) {
        match side {
            AxisPosition::Top => self.top.push(fragment),
            AxisPosition::Left => self.left.push(fragment),
            AxisPosition::Right => self.right.push(fragment),
            AxisPosition::Bottom => self.bottom.push(fragment),
            AxisPosition::None => self.center.push(fragment),
        }
    }

    /// Every fragment, sides first, center last.
    pub fn iter(&self) -> impl Iterator<Item = &TrackFragment> + '_ {
        self.top
            .iter()
            .chain(&self.left)
            .chain(&self.right)
            .chain(&self.bottom)
            .chain(&self.center)
    }
}

/// Renderer track type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentKind {
    /// A data track.
    GoslingTrack,
    /// Container for layers the renderer cannot overlay itself.
    Combined,
    /// Genomic axis.
    AxisTrack,
    /// Placeholder keeping the slot stable.
    Empty,
    /// Brush showing another view's range.
    ViewportProjection,
}

/// One track of the renderer configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackFragment {
    /// Unique id within the configuration.
    pub uid: String,
    /// Track type.
    #[serde(rename = "type")]
    pub kind: FragmentKind,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Tile server base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    /// Tileset uid on `server`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tileset_uid: Option<String>,
    /// View whose range a projection shows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_view_uid: Option<String>,
    /// Resolved track spec the renderer draws.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<Box<TrackDef>>,
    /// Children of a combined fragment.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<TrackFragment>,
}

impl TrackFragment {
    pub(crate) fn new(uid: impl Into<String>, kind: FragmentKind, width: f64, height: f64) -> Self {
        Self {
            uid: uid.into(),
            kind,
            width,
            height,
            server: None,
            tileset_uid: None,
            from_view_uid: None,
            spec: None,
            contents: Vec::new(),
        }
    }

    /// Fragments below this one, depth-first, this one included.
    pub fn flatten(&self) -> Vec<&TrackFragment> {
        let mut out = vec![self];
        for c in &self.contents {
            out.extend(c.flatten());
        }
        out
    }
}

/// Lock table: view uid to lock uid, and lock uid to per-view
/// `[center, center, span]` triples.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockTable {
    /// Lock uid of each locked view.
    pub locks_by_view_uid: BTreeMap<String, String>,
    /// Members of each lock.
    pub locks_dict: BTreeMap<String, BTreeMap<String, [f64; 3]>>,
}
