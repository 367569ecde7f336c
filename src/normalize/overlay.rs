use crate::spec::model::TrackDef;

/// Layers actually drawn for one track slot.
///
/// Each overlay entry is merged over the base track (entry wins); the base's
/// own `overlay` list is not carried into the layers. A track without overlay
/// entries yields itself. Never empty.
pub fn resolve_overlay(track: &TrackDef) -> Vec<TrackDef> {
    let layers = match track.overlay.as_deref() {
        Some(layers) if !layers.is_empty() => layers,
        _ => return vec![track.clone()],
    };
    let mut base = track.clone();
    base.overlay = None;
    layers.iter().map(|layer| base.merged_with(layer)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/overlay.rs"]
mod tests;
