use serde::{Deserialize, Serialize};

use crate::normalize::template::TemplateDef;
use crate::spec::model::ZoomLimits;

/// Fallback values applied when neither a node nor any ancestor sets them.
///
/// Threaded explicitly through every stage; nothing reads global constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileDefaults {
    /// Reference genome used when none is declared.
    pub assembly: String,
    /// Track width in pixels.
    pub track_width: f64,
    /// Track height in pixels.
    pub track_height: f64,
    /// Gap between composed views, in pixels.
    pub view_spacing: f64,
    /// Side of the relative-layout grid.
    pub grid_unit: f64,
    /// Inner radius of a circular layout as a fraction of its outer radius.
    pub center_radius: f64,
    /// Angular gap between parallel siblings of a circular layout, in degrees.
    pub circular_gap_deg: f64,
    /// Zoom limits used when none are declared.
    pub zoom_limits: ZoomLimits,
}

impl Default for CompileDefaults {
    fn default() -> Self {
        Self {
            assembly: "hg38".to_owned(),
            track_width: 600.0,
            track_height: 130.0,
            view_spacing: 20.0,
            grid_unit: 12.0,
            center_radius: 0.3,
            circular_gap_deg: 2.0,
            zoom_limits: ZoomLimits::default(),
        }
    }
}

/// Options for [`crate::compile()`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileOptions {
    /// Fallback values.
    pub defaults: CompileDefaults,
    /// Extra templates; a name shared with a built-in replaces the built-in.
    pub templates: Vec<TemplateDef>,
    /// The renderer draws overlaid layers itself, so one fragment per slot suffices.
    pub native_overlay: bool,
    /// Fail the compile when the validity report is not empty.
    pub strict: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            defaults: CompileDefaults::default(),
            templates: Vec::new(),
            native_overlay: true,
            strict: false,
        }
    }
}
