use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{GenoError, GenoResult};
use crate::spec::channel::{ChannelDef, ChannelKey};
use crate::spec::data::DataDef;

/// Mark type of a track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mark {
    /// Circles.
    Point,
    /// Polyline.
    Line,
    /// Filled area.
    Area,
    /// Bars.
    Bar,
    /// Rectangles.
    Rect,
    /// Text labels.
    Text,
    /// Horizontal/vertical rules.
    Rule,
    /// Left-pointing triangles.
    TriangleLeft,
    /// Right-pointing triangles.
    TriangleRight,
    /// Down-pointing triangles.
    TriangleBottom,
    /// Interactive range selection projected from a linked view.
    Brush,
    /// Arcs connecting two ranges inside one track.
    WithinLink,
    /// Bands connecting ranges across two tracks.
    BetweenLink,
}

/// Linear or circular track geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutKind {
    /// Rectangular tracks.
    #[default]
    Linear,
    /// Ring-shaped tracks.
    Circular,
}

/// Direction of the genomic axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// Genomic axis runs left to right.
    #[default]
    Horizontal,
    /// Genomic axis runs top to bottom.
    Vertical,
}

/// How child views compose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Arrangement {
    /// One after another across the genomic axis: stacked top to bottom.
    #[default]
    #[serde(alias = "vertical")]
    Serial,
    /// Side by side along the genomic axis: left to right.
    #[serde(alias = "horizontal")]
    Parallel,
}

/// Grouping rule for a track entry that holds nested `tracks`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    /// Children become independent sibling tracks.
    #[default]
    Stack,
    /// Children are superposed in one slot.
    Overlay,
}

/// `[min, max]` zoom limits; `null` means unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits(pub Option<f64>, pub Option<f64>);

impl Default for ZoomLimits {
    fn default() -> Self {
        Self(Some(1.0), None)
    }
}

/// Initial genomic range of a view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainDef {
    /// Range inside one chromosome; the whole chromosome when `interval` is absent.
    Chromosome {
        /// Chromosome name, e.g. `chr1`.
        chromosome: String,
        /// Chromosome-relative `[start, end]`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        interval: Option<[f64; 2]>,
    },
    /// Absolute genome coordinates.
    Interval {
        /// Absolute `[start, end]`.
        interval: [f64; 2],
    },
}

/// Reference genome: a built-in name or inline chromosome sizes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssemblyDef {
    /// Built-in assembly such as `hg38`.
    Named(String),
    /// Custom `[name, size]` pairs in genome order.
    Custom(Vec<(String, u64)>),
}

impl AssemblyDef {
    /// Built-in assembly by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

/// Visual style shared down the tree; child fields win over inherited ones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleDef {
    /// Background color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Background opacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<f64>,
    /// Outline color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,
    /// Outline width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_width: Option<f64>,
    /// Dash pattern `[dash, gap]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashed: Option<[f64; 2]>,
    /// Link curve style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_connection_type: Option<String>,
    /// Draw legends inside the track.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_legend: Option<bool>,
    /// Legend title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_title: Option<String>,
    /// Label font size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_font_size: Option<f64>,
    /// Label stroke color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_stroke: Option<String>,
}

impl StyleDef {
    /// Fill unset fields of `self` from `parent`.
    pub fn merged_over(&self, parent: &StyleDef) -> StyleDef {
        StyleDef {
            background: self.background.clone().or_else(|| parent.background.clone()),
            background_opacity: self.background_opacity.or(parent.background_opacity),
            outline: self.outline.clone().or_else(|| parent.outline.clone()),
            outline_width: self.outline_width.or(parent.outline_width),
            dashed: self.dashed.or(parent.dashed),
            link_connection_type: self
                .link_connection_type
                .clone()
                .or_else(|| parent.link_connection_type.clone()),
            inline_legend: self.inline_legend.or(parent.inline_legend),
            legend_title: self
                .legend_title
                .clone()
                .or_else(|| parent.legend_title.clone()),
            text_font_size: self.text_font_size.or(parent.text_font_size),
            text_stroke: self.text_stroke.clone().or_else(|| parent.text_stroke.clone()),
        }
    }
}

/// Merge two optional styles, `child` winning field by field.
pub(crate) fn merge_styles(child: Option<&StyleDef>, parent: Option<&StyleDef>) -> Option<StyleDef> {
    match (child, parent) {
        (Some(c), Some(p)) => Some(c.merged_over(p)),
        (Some(c), None) => Some(c.clone()),
        (None, Some(p)) => Some(p.clone()),
        (None, None) => None,
    }
}

/// A track entry: a single layer, an overlaid group, a stacked group, or a
/// template reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackDef {
    /// Stable identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Title drawn above the track.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Opaque data-source descriptor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataDef>,
    /// Opaque data transforms forwarded to the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_transform: Option<Vec<serde_json::Value>>,
    /// Opaque tooltip settings forwarded to the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<serde_json::Value>,
    /// Mark type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<Mark>,

    /// `x` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<ChannelDef>,
    /// `xe` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xe: Option<ChannelDef>,
    /// `x1` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x1: Option<ChannelDef>,
    /// `x1e` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x1e: Option<ChannelDef>,
    /// `y` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<ChannelDef>,
    /// `ye` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ye: Option<ChannelDef>,
    /// `y1` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y1: Option<ChannelDef>,
    /// `y1e` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y1e: Option<ChannelDef>,
    /// `row` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<ChannelDef>,
    /// `color` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ChannelDef>,
    /// `size` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ChannelDef>,
    /// `text` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<ChannelDef>,
    /// `stroke` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<ChannelDef>,
    /// `strokeWidth` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<ChannelDef>,
    /// `opacity` channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<ChannelDef>,

    /// Width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Grid cells occupied in a wrapped view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<u32>,

    /// Layers superposed in this track's slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Vec<TrackDef>>,
    /// Draw on top of the preceding track instead of taking new space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay_on_previous_track: Option<bool>,
    /// Grouping rule for `tracks`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// Nested track entries sharing this entry's properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<TrackDef>>,
    /// Named template to expand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Template channel bindings, keyed by template channel name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<BTreeMap<String, ChannelDef>>,
    /// Flip the vertical axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_y: Option<bool>,

    /// Disable zoom and pan.
    #[serde(rename = "static", skip_serializing_if = "Option::is_none")]
    pub is_static: Option<bool>,
    /// Zoom limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_limits: Option<ZoomLimits>,
    /// Initial genomic range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_domain: Option<DomainDef>,
    /// Reference genome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly: Option<AssemblyDef>,
    /// Linear or circular.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutKind>,
    /// Genomic axis direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    /// Linking id inherited by the genomic x channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linking_id: Option<String>,
    /// Inner radius as a fraction of the outer radius (circular only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_radius: Option<f64>,
    /// Visual style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleDef>,

    /// Explicit outer radius (circular only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f64>,
    /// Explicit inner radius (circular only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
    /// Explicit start angle in degrees (circular only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_angle: Option<f64>,
    /// Explicit end angle in degrees (circular only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_angle: Option<f64>,

    /// Set when template expansion failed; such tracks are dropped before layout.
    #[serde(rename = "_invalidTrack", skip_serializing_if = "std::ops::Not::not")]
    pub invalid_track: bool,
}

impl TrackDef {
    /// Borrow one channel.
    pub fn channel(&self, key: ChannelKey) -> Option<&ChannelDef> {
        self.channel_slot(key).as_ref()
    }

    /// Mutably borrow one channel.
    pub fn channel_mut(&mut self, key: ChannelKey) -> Option<&mut ChannelDef> {
        self.channel_slot_mut(key).as_mut()
    }

    /// Replace one channel.
    pub fn set_channel(&mut self, key: ChannelKey, value: Option<ChannelDef>) {
        *self.channel_slot_mut(key) = value;
    }

    /// Bound channels in [`ChannelKey::ALL`] order.
    pub fn channels(&self) -> impl Iterator<Item = (ChannelKey, &ChannelDef)> + '_ {
        ChannelKey::ALL
            .into_iter()
            .filter_map(|k| self.channel(k).map(|c| (k, c)))
    }

    fn channel_slot(&self, key: ChannelKey) -> &Option<ChannelDef> {
        match key {
            ChannelKey::X => &self.x,
            ChannelKey::Xe => &self.xe,
            ChannelKey::X1 => &self.x1,
            ChannelKey::X1e => &self.x1e,
            ChannelKey::Y => &self.y,
            ChannelKey::Ye => &self.ye,
            ChannelKey::Y1 => &self.y1,
            ChannelKey::Y1e => &self.y1e,
            ChannelKey::Row => &self.row,
            ChannelKey::Color => &self.color,
            ChannelKey::Size => &self.size,
            ChannelKey::Text => &self.text,
            ChannelKey::Stroke => &self.stroke,
            ChannelKey::StrokeWidth => &self.stroke_width,
            ChannelKey::Opacity => &self.opacity,
        }
    }

    fn channel_slot_mut(&mut self, key: ChannelKey) -> &mut Option<ChannelDef> {
        match key {
            ChannelKey::X => &mut self.x,
            ChannelKey::Xe => &mut self.xe,
            ChannelKey::X1 => &mut self.x1,
            ChannelKey::X1e => &mut self.x1e,
            ChannelKey::Y => &mut self.y,
            ChannelKey::Ye => &mut self.ye,
            ChannelKey::Y1 => &mut self.y1,
            ChannelKey::Y1e => &mut self.y1e,
            ChannelKey::Row => &mut self.row,
            ChannelKey::Color => &mut self.color,
            ChannelKey::Size => &mut self.size,
            ChannelKey::Text => &mut self.text,
            ChannelKey::Stroke => &mut self.stroke,
            ChannelKey::StrokeWidth => &mut self.stroke_width,
            ChannelKey::Opacity => &mut self.opacity,
        }
    }

    /// `true` when the track superposes two or more layers in its slot.
    pub fn is_overlaid(&self) -> bool {
        self.overlay.as_ref().is_some_and(|o| !o.is_empty())
    }

    /// `true` when the track is drawn on top of its predecessor.
    pub fn is_overlay_on_previous(&self) -> bool {
        self.overlay_on_previous_track == Some(true)
    }

    /// `true` for a track with neither overlay layers nor nested tracks.
    pub fn is_leaf(&self) -> bool {
        !self.is_overlaid() && self.tracks.is_none()
    }

    /// Deep-merge `over` on top of `self`; set fields of `over` win.
    ///
    /// Channels are replaced whole, styles merge field by field.
    pub fn merged_with(&self, over: &TrackDef) -> TrackDef {
        let mut out = self.clone();
        macro_rules! take {
            ($($f:ident),+ $(,)?) => {
                $(
                    if over.$f.is_some() {
                        out.$f = over.$f.clone();
                    }
                )+
            };
        }
        take!(
            id,
            title,
            data,
            data_transform,
            tooltip,
            mark,
            x,
            xe,
            x1,
            x1e,
            y,
            ye,
            y1,
            y1e,
            row,
            color,
            size,
            text,
            stroke,
            stroke_width,
            opacity,
            width,
            height,
            span,
            overlay,
            overlay_on_previous_track,
            alignment,
            tracks,
            template,
            encoding,
            flip_y,
            is_static,
            zoom_limits,
            x_domain,
            assembly,
            layout,
            orientation,
            linking_id,
            center_radius,
            outer_radius,
            inner_radius,
            start_angle,
            end_angle,
        );
        out.style = merge_styles(over.style.as_ref(), self.style.as_ref());
        out.invalid_track = self.invalid_track || over.invalid_track;
        out
    }
}

/// A view: either a container of child views or a container of tracks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewDef {
    /// Stable identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Subtitle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Child views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<Vec<ViewDef>>,
    /// Child tracks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<TrackDef>>,

    /// How child views compose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<Arrangement>,
    /// Gap between composed children (and wrapped cells) in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    /// Cells per row before tracks wrap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<u32>,
    /// Horizontal shift of the whole view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_offset: Option<f64>,
    /// Vertical shift of the whole view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_offset: Option<f64>,
    /// Default width for descendant tracks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Default height for descendant tracks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Reference genome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly: Option<AssemblyDef>,
    /// Linear or circular.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutKind>,
    /// Genomic axis direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    /// Disable zoom and pan.
    #[serde(rename = "static", skip_serializing_if = "Option::is_none")]
    pub is_static: Option<bool>,
    /// Zoom limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_limits: Option<ZoomLimits>,
    /// Initial genomic range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_domain: Option<DomainDef>,
    /// Linking id shared by descendant tracks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linking_id: Option<String>,
    /// Inner radius fraction (circular only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_radius: Option<f64>,
    /// Visual style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleDef>,
}

/// Borrowed children of a view.
#[derive(Clone, Copy, Debug)]
pub enum ViewChildren<'a> {
    /// Child views.
    Views(&'a [ViewDef]),
    /// Child tracks.
    Tracks(&'a [TrackDef]),
    /// Both lists present.
    Both,
    /// Neither list present.
    Neither,
}

impl ViewDef {
    /// Parse a spec from JSON text.
    pub fn from_json_str(s: &str) -> GenoResult<Self> {
        serde_json::from_str(s).map_err(|e| GenoError::serde(format!("parse spec JSON: {e}")))
    }

    /// Read and parse a spec file.
    pub fn from_path(path: impl AsRef<Path>) -> GenoResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            GenoError::Other(anyhow::Error::new(e).context(format!("read spec '{}'", path.display())))
        })?;
        Self::from_json_str(&s)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> GenoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Classify the children.
    pub fn children(&self) -> ViewChildren<'_> {
        match (&self.views, &self.tracks) {
            (Some(v), None) => ViewChildren::Views(v),
            (None, Some(t)) => ViewChildren::Tracks(t),
            (Some(_), Some(_)) => ViewChildren::Both,
            (None, None) => ViewChildren::Neither,
        }
    }

    /// `true` when the view resolves to a circular layout.
    pub fn is_circular(&self) -> bool {
        self.layout == Some(LayoutKind::Circular)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spec/model.rs"]
mod tests;
