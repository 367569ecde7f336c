use serde::Serialize;

use crate::compile::options::CompileDefaults;
use crate::foundation::error::{GenoError, GenoResult};
use crate::foundation::ids::IdAllocator;
use crate::normalize::overlay::resolve_overlay;
use crate::normalize::template::TemplateRegistry;
use crate::spec::channel::{AxisPosition, ChannelDef, ChannelKey};
use crate::spec::model::{
    Alignment, AssemblyDef, DomainDef, LayoutKind, Mark, Orientation, StyleDef, TrackDef,
    ViewChildren, ViewDef, ZoomLimits, merge_styles,
};
use crate::traverse::{NodePath, NodeRef, Walk, walk};

/// A track removed while flattening a view's track list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedTrack {
    /// Location of the entry in the input spec.
    pub path: String,
    /// Id of the entry, if it had one.
    pub id: Option<String>,
    /// Why it was dropped.
    pub reason: String,
}

/// Output of [`normalize_spec`].
#[derive(Clone, Debug, Serialize)]
pub struct NormalizedSpec {
    /// Fully defaulted tree; every view and track has an id.
    pub root: ViewDef,
    /// Tracks excluded from the tree, in input order.
    pub dropped: Vec<DroppedTrack>,
}

/// Properties flowing from a view to its descendants.
#[derive(Clone, Debug)]
struct Inherited {
    assembly: AssemblyDef,
    layout: LayoutKind,
    orientation: Orientation,
    is_static: bool,
    zoom_limits: ZoomLimits,
    x_domain: Option<DomainDef>,
    linking_id: Option<String>,
    style: Option<StyleDef>,
    center_radius: Option<f64>,
    width: f64,
    height: f64,
}

impl Inherited {
    fn root(defaults: &CompileDefaults) -> Self {
        Self {
            assembly: AssemblyDef::named(defaults.assembly.clone()),
            layout: LayoutKind::default(),
            orientation: Orientation::default(),
            is_static: false,
            zoom_limits: defaults.zoom_limits,
            x_domain: None,
            linking_id: None,
            style: None,
            center_radius: None,
            width: defaults.track_width,
            height: defaults.track_height,
        }
    }

    fn for_view(&self, v: &ViewDef) -> Self {
        Self {
            assembly: v.assembly.clone().unwrap_or_else(|| self.assembly.clone()),
            layout: v.layout.unwrap_or(self.layout),
            orientation: v.orientation.unwrap_or(self.orientation),
            is_static: v.is_static.unwrap_or(self.is_static),
            zoom_limits: v.zoom_limits.unwrap_or(self.zoom_limits),
            x_domain: v.x_domain.clone().or_else(|| self.x_domain.clone()),
            linking_id: v.linking_id.clone().or_else(|| self.linking_id.clone()),
            style: merge_styles(v.style.as_ref(), self.style.as_ref()),
            center_radius: v.center_radius.or(self.center_radius),
            width: v.width.unwrap_or(self.width),
            height: v.height.unwrap_or(self.height),
        }
    }

    fn write_view(&self, v: &mut ViewDef) {
        v.assembly = Some(self.assembly.clone());
        v.layout = Some(self.layout);
        v.orientation = Some(self.orientation);
        v.is_static = Some(self.is_static);
        v.zoom_limits = Some(self.zoom_limits);
        v.x_domain = self.x_domain.clone();
        v.linking_id = self.linking_id.clone();
        v.style = self.style.clone();
        v.center_radius = self.center_radius;
        v.width = Some(self.width);
        v.height = Some(self.height);
    }

    fn apply_track(&self, t: &mut TrackDef) {
        t.assembly.get_or_insert_with(|| self.assembly.clone());
        t.layout.get_or_insert(self.layout);
        t.orientation.get_or_insert(self.orientation);
        t.is_static.get_or_insert(self.is_static);
        t.zoom_limits.get_or_insert(self.zoom_limits);
        if t.x_domain.is_none() {
            t.x_domain = self.x_domain.clone();
        }
        if t.linking_id.is_none() {
            t.linking_id = self.linking_id.clone();
        }
        if t.center_radius.is_none() {
            t.center_radius = self.center_radius;
        }
        t.width.get_or_insert(self.width);
        t.height.get_or_insert(self.height);
        t.style = merge_styles(t.style.as_ref(), self.style.as_ref());
    }
}

/// A flattened track entry, still carrying its source location.
struct FlatTrack {
    path: String,
    track: TrackDef,
    invalid: Option<String>,
}

struct Normalizer<'a> {
    templates: &'a TemplateRegistry,
    ids: IdAllocator,
    /// Linking ids are a separate namespace from node ids.
    link_ids: IdAllocator,
    dropped: Vec<DroppedTrack>,
}

/// Resolve inheritance, defaults, templates and shorthand groups into a new tree.
///
/// The input is never mutated. Running the pass on its own output returns an
/// identical tree.
#[tracing::instrument(skip(root, templates, defaults))]
pub fn normalize_spec(
    root: &ViewDef,
    templates: &TemplateRegistry,
    defaults: &CompileDefaults,
) -> GenoResult<NormalizedSpec> {
    let mut taken = Vec::new();
    let mut declared_links = Vec::new();
    walk(root, |node, _| {
        if let Some(id) = node.id() {
            taken.push(id.to_owned());
        }
        declared_links.extend(declared_linking_ids(node));
        Walk::Continue
    });

    let mut cx = Normalizer {
        templates,
        ids: IdAllocator::with_taken(taken),
        link_ids: IdAllocator::with_taken(declared_links),
        dropped: Vec::new(),
    };
    let mut path = NodePath::root();
    let root = cx.view(root, &Inherited::root(defaults), &mut path)?;
    tracing::debug!(dropped = cx.dropped.len(), "normalized spec");
    Ok(NormalizedSpec {
        root,
        dropped: cx.dropped,
    })
}

impl Normalizer<'_> {
    fn view(&mut self, view: &ViewDef, parent: &Inherited, path: &mut NodePath) -> GenoResult<ViewDef> {
        let inherited = parent.for_view(view);
        let mut out = view.clone();
        inherited.write_view(&mut out);
        let view_id = match &view.id {
            Some(id) => id.clone(),
            None => self.ids.fresh("view"),
        };
        out.id = Some(view_id.clone());

        match view.children() {
            ViewChildren::Both => {
                return Err(GenoError::structure(
                    path.to_string(),
                    "a view must not declare both `views` and `tracks`",
                ));
            }
            ViewChildren::Neither => {
                return Err(GenoError::structure(
                    path.to_string(),
                    "a view must declare either `views` or `tracks`",
                ));
            }
            ViewChildren::Views(children) => {
                let mut views = Vec::with_capacity(children.len());
                for (i, child) in children.iter().enumerate() {
                    path.push_child("views", i);
                    let res = self.view(child, &inherited, path);
                    path.pop_child();
                    views.push(res?);
                }
                out.views = Some(views);
            }
            ViewChildren::Tracks(entries) => {
                out.tracks = Some(self.tracks(entries, &inherited, &view_id, path));
            }
        }
        Ok(out)
    }

    fn tracks(
        &mut self,
        entries: &[TrackDef],
        inherited: &Inherited,
        view_id: &str,
        path: &mut NodePath,
    ) -> Vec<TrackDef> {
        let mut flat = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            path.push_child("tracks", i);
            self.flatten(entry, path, &mut flat);
            path.pop_child();
        }

        let mut kept = Vec::<TrackDef>::with_capacity(flat.len());
        for f in flat {
            match f.invalid {
                Some(reason) => self.drop_track(f.path, f.track.id, reason),
                None => kept.push(f.track),
            }
        }

        let mut view_link: Option<String> = None;
        for i in 0..kept.len() {
            inherited.apply_track(&mut kept[i]);
            if kept[i].is_overlay_on_previous() {
                if i == 0 {
                    tracing::warn!(view = view_id, "first track cannot overlay a previous track");
                } else {
                    let (prev, cur) = kept.split_at_mut(i);
                    let prev = &prev[i - 1];
                    let cur = &mut cur[0];
                    cur.width = prev.width;
                    cur.height = prev.height;
                    cur.layout = prev.layout;
                    cur.assembly = prev.assembly.clone();
                }
            }
            if kept[i].id.is_none() {
                kept[i].id = Some(self.ids.fresh("track"));
            }
            let fallback = match kept[i].linking_id.clone() {
                Some(id) => Some(id),
                None if needs_view_link(&kept[i]) => Some(
                    view_link
                        .get_or_insert_with(|| self.link_ids.claim(format!("link-{view_id}")))
                        .clone(),
                ),
                None => None,
            };
            default_linking_ids(&mut kept[i], fallback.as_deref());
        }

        assign_default_axis(&mut kept);
        for t in &mut kept {
            if t.orientation == Some(Orientation::Vertical) {
                rotate_axes(t);
            }
        }
        default_flip_y(&mut kept);
        kept
    }

    fn flatten(&mut self, entry: &TrackDef, path: &NodePath, out: &mut Vec<FlatTrack>) {
        if entry.invalid_track {
            out.push(FlatTrack {
                path: path.to_string(),
                track: entry.clone(),
                invalid: Some("track is marked invalid".to_owned()),
            });
            return;
        }
        let mut track = match self.templates.expand(entry) {
            Ok(t) => t,
            Err(e) => {
                let mut t = entry.clone();
                t.invalid_track = true;
                out.push(FlatTrack {
                    path: path.to_string(),
                    track: t,
                    invalid: Some(e.to_string()),
                });
                return;
            }
        };
        let alignment = track.alignment.take().unwrap_or_default();
        let Some(children) = track.tracks.take() else {
            out.push(FlatTrack {
                path: path.to_string(),
                track,
                invalid: None,
            });
            return;
        };

        match alignment {
            Alignment::Overlay => {
                let mut layers = track.overlay.take().unwrap_or_default();
                for (j, child) in children.iter().enumerate() {
                    let child_path = path.child("tracks", j);
                    match self.templates.expand(child) {
                        Ok(c) => layers.extend(resolve_overlay(&c)),
                        Err(e) => self.drop_track(child_path.to_string(), child.id.clone(), e.to_string()),
                    }
                }
                track.overlay = (!layers.is_empty()).then_some(layers);
                out.push(FlatTrack {
                    path: path.to_string(),
                    track,
                    invalid: None,
                });
            }
            Alignment::Stack => {
                for (j, child) in children.iter().enumerate() {
                    let mut merged = track.merged_with(child);
                    merged.id = child.id.clone();
                    self.flatten(&merged, &path.child("tracks", j), out);
                }
            }
        }
    }

    fn drop_track(&mut self, path: String, id: Option<String>, reason: String) {
        tracing::warn!(%path, %reason, "dropping invalid track");
        self.dropped.push(DroppedTrack { path, id, reason });
    }
}

/// Linking ids written anywhere on `node`, including template bindings.
fn declared_linking_ids(node: NodeRef<'_>) -> Vec<String> {
    match node {
        NodeRef::View(v) => v.linking_id.iter().cloned().collect(),
        NodeRef::Track(t) => {
            let channels = t.channels().map(|(_, c)| c);
            let bindings = t.encoding.iter().flat_map(|e| e.values());
            t.linking_id
                .iter()
                .cloned()
                .chain(
                    channels
                        .chain(bindings)
                        .filter_map(ChannelDef::linking_id)
                        .map(str::to_owned),
                )
                .collect()
        }
    }
}

/// `true` when a genomic x channel of the track would take the view's
/// generated linking id.
fn needs_view_link(track: &TrackDef) -> bool {
    let unlinked = |t: &TrackDef| {
        t.x.as_ref()
            .and_then(ChannelDef::genomic)
            .map(|f| f.linking_id.is_none())
    };
    match unlinked(track) {
        Some(missing) => missing,
        None => track.overlay.iter().flatten().any(|l| unlinked(l) == Some(true)),
    }
}

/// Give every genomic x channel a linking id.
///
/// Layers without their own id share the base x channel's id, so a slot
/// zooms as one unit.
fn default_linking_ids(track: &mut TrackDef, fallback: Option<&str>) {
    let base_link = track
        .x
        .as_mut()
        .and_then(ChannelDef::genomic_mut)
        .and_then(|f| {
            if f.linking_id.is_none() {
                f.linking_id = fallback.map(str::to_owned);
            }
            f.linking_id.clone()
        });
    let Some(layer_link) = base_link.or_else(|| fallback.map(str::to_owned)) else {
        return;
    };
    for layer in track.overlay.iter_mut().flatten() {
        if let Some(f) = layer.x.as_mut().and_then(ChannelDef::genomic_mut) {
            f.linking_id.get_or_insert_with(|| layer_link.clone());
        }
    }
}

fn assign_default_axis(tracks: &mut [TrackDef]) {
    let Some(first) = tracks.iter_mut().find(|t| !t.is_overlay_on_previous()) else {
        return;
    };
    let side = match first.orientation {
        Some(Orientation::Vertical) => AxisPosition::Left,
        _ => AxisPosition::Top,
    };
    if let Some(f) = first.x.as_mut().and_then(ChannelDef::genomic_mut) {
        f.axis.get_or_insert(side);
        return;
    }
    let layer_x = first
        .overlay
        .iter_mut()
        .flatten()
        .find_map(|l| l.x.as_mut().and_then(ChannelDef::genomic_mut));
    if let Some(f) = layer_x {
        f.axis.get_or_insert(side);
    }
}

fn rotate_axes(track: &mut TrackDef) {
    fn rotate(t: &mut TrackDef) {
        for key in ChannelKey::GENOMIC {
            if let Some(f) = t.channel_mut(key).and_then(ChannelDef::genomic_mut)
                && let Some(axis) = f.axis
            {
                f.axis = Some(axis.rotated_for_vertical());
            }
        }
    }
    rotate(track);
    for layer in track.overlay.iter_mut().flatten() {
        rotate(layer);
    }
}

/// A `withinLink` track drawn last in its view flips by default.
fn default_flip_y(tracks: &mut [TrackDef]) {
    let Some(last) = tracks.iter_mut().rev().find(|t| !t.is_overlay_on_previous()) else {
        return;
    };
    let mark = last
        .mark
        .or_else(|| last.overlay.as_ref().and_then(|o| o.first()).and_then(|l| l.mark));
    if mark == Some(Mark::WithinLink) {
        last.flip_y.get_or_insert(true);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/pass.rs"]
mod tests;
