use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::compile::options::CompileDefaults;
use crate::spec::assembly::ChromSizes;
use crate::spec::model::{AssemblyDef, DomainDef, TrackDef, ViewDef, ZoomLimits};
use crate::traverse::NodePath;

/// One path-addressed validity message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidityIssue {
    /// Location, e.g. `$.views[0].tracks[1].color`.
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

impl ValidityIssue {
    fn at(path: &NodePath, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every validity message found in a spec, in document order.
///
/// Validity failures never block a compile on their own; callers decide
/// whether a non-empty report is fatal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidityReport {
    /// Collected messages.
    pub issues: Vec<ValidityIssue>,
}

impl ValidityReport {
    /// `true` when no message was recorded.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// `true` when no message was recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Messages in document order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidityIssue> + '_ {
        self.issues.iter()
    }
}

impl fmt::Display for ValidityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Check a raw (un-normalized) spec for combinations the data model disallows.
#[tracing::instrument(skip(root, defaults))]
pub fn validate_spec(root: &ViewDef, defaults: &CompileDefaults) -> ValidityReport {
    let mut v = Validator {
        issues: Vec::new(),
        seen_ids: HashMap::new(),
    };
    let fallback = AssemblyDef::named(defaults.assembly.clone());
    v.view(root, &NodePath::root(), &fallback);
    tracing::debug!(issues = v.issues.len(), "validated spec");
    ValidityReport { issues: v.issues }
}

struct Validator {
    issues: Vec<ValidityIssue>,
    seen_ids: HashMap<String, String>,
}

impl Validator {
    fn push(&mut self, path: &NodePath, message: impl Into<String>) {
        self.issues.push(ValidityIssue::at(path, message));
    }

    fn id(&mut self, id: Option<&str>, path: &NodePath) {
        let Some(id) = id else {
            return;
        };
        match self.seen_ids.get(id) {
            Some(first) => {
                let msg = format!("duplicate id '{id}' (first declared at {first})");
                self.push(&path.field("id"), msg);
            }
            None => {
                self.seen_ids.insert(id.to_owned(), path.to_string());
            }
        }
    }

    fn view(&mut self, view: &ViewDef, path: &NodePath, inherited: &AssemblyDef) {
        self.id(view.id.as_deref(), path);
        let assembly = view.assembly.as_ref().unwrap_or(inherited);
        self.assembly(view.assembly.as_ref(), path);
        if view.wrap == Some(0) {
            self.push(&path.field("wrap"), "wrap must be at least 1");
        }
        self.zoom_limits(view.zoom_limits, path);
        self.x_domain(view.x_domain.as_ref(), assembly, path);

        for (i, child) in view.views.iter().flatten().enumerate() {
            self.view(child, &path.child("views", i), assembly);
        }
        for (i, track) in view.tracks.iter().flatten().enumerate() {
            let track_path = path.child("tracks", i);
            if i == 0 && track.is_overlay_on_previous() {
                self.push(
                    &track_path.field("overlayOnPreviousTrack"),
                    "the first track of a view has no previous track to overlay",
                );
            }
            self.track(track, &track_path, assembly);
        }
    }

    fn track(&mut self, track: &TrackDef, path: &NodePath, inherited: &AssemblyDef) {
        self.id(track.id.as_deref(), path);
        let assembly = track.assembly.as_ref().unwrap_or(inherited);
        self.assembly(track.assembly.as_ref(), path);
        if track.span == Some(0) {
            self.push(&path.field("span"), "span must be at least 1");
        }
        self.zoom_limits(track.zoom_limits, path);
        self.x_domain(track.x_domain.as_ref(), assembly, path);

        for (key, def) in track.channels() {
            if !key.is_position() && def.genomic().is_some() {
                self.push(
                    &path.field(key.as_str()),
                    format!("a genomic field cannot be bound to the '{key}' channel"),
                );
            }
        }

        if let Some(data) = &track.data
            && data.is_tile_based()
            && data.tile_source().is_none()
        {
            self.push(
                &path.field("data"),
                format!("'{}' data needs a url of the form <server>/tileset_info/?d=<uid>", data.kind),
            );
        }

        let mut link_ids: Vec<&str> = Vec::new();
        for layer in std::iter::once(track).chain(track.overlay.iter().flatten()) {
            for (_, def) in layer.channels() {
                if let Some(id) = def.linking_id()
                    && !link_ids.contains(&id)
                {
                    link_ids.push(id);
                }
            }
        }
        if link_ids.len() >= 3 {
            self.push(
                path,
                format!("{} linking ids on one track are all merged: {}", link_ids.len(), link_ids.join(", ")),
            );
        }

        for (i, layer) in track.overlay.iter().flatten().enumerate() {
            self.track(layer, &path.child("overlay", i), assembly);
        }
        for (i, child) in track.tracks.iter().flatten().enumerate() {
            self.track(child, &path.child("tracks", i), assembly);
        }
    }

    fn assembly(&mut self, declared: Option<&AssemblyDef>, path: &NodePath) {
        if let Some(AssemblyDef::Named(name)) = declared
            && ChromSizes::builtin(name).is_none()
        {
            self.push(&path.field("assembly"), format!("unknown assembly '{name}'"));
        }
    }

    fn zoom_limits(&mut self, limits: Option<ZoomLimits>, path: &NodePath) {
        if let Some(ZoomLimits(Some(min), Some(max))) = limits
            && min > max
        {
            self.push(
                &path.field("zoomLimits"),
                format!("zoom limits are inverted ({min} > {max})"),
            );
        }
    }

    fn x_domain(&mut self, domain: Option<&DomainDef>, assembly: &AssemblyDef, path: &NodePath) {
        let Some(DomainDef::Chromosome { chromosome, .. }) = domain else {
            return;
        };
        // Unknown assemblies are reported on their own.
        let Some(sizes) = ChromSizes::for_assembly(assembly) else {
            return;
        };
        if sizes.chromosome(chromosome).is_none() {
            self.push(
                &path.field("xDomain"),
                format!("unknown chromosome '{chromosome}'; the whole genome is shown instead"),
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
