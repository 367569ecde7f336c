use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::foundation::geometry::{BoundingBox, Point, Rect};
use crate::ident::resolver::{collect_view_ids, find_node_by_id};
use crate::spec::model::ViewDef;
use crate::traverse::{NodeRef, Walk, walk_from};

/// Pixel shape of a drawn track, as reported by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderedShape {
    /// Axis-aligned rectangle.
    #[serde(rename_all = "camelCase")]
    Rect {
        /// Placement.
        bounding_box: BoundingBox,
    },
    /// Annulus sector; angles in degrees.
    #[serde(rename_all = "camelCase")]
    Sector {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Inner radius.
        inner_radius: f64,
        /// Outer radius.
        outer_radius: f64,
        /// Start angle.
        start_angle: f64,
        /// End angle.
        end_angle: f64,
    },
}

impl RenderedShape {
    /// Smallest axis-aligned rectangle containing the shape.
    pub fn bounds(&self) -> Rect {
        match *self {
            Self::Rect { bounding_box } => bounding_box.to_rect(),
            Self::Sector {
                cx, cy, outer_radius, ..
            } => Rect::from_center_size(Point::new(cx, cy), (outer_radius * 2.0, outer_radius * 2.0)),
        }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (
                Self::Sector {
                    cx,
                    cy,
                    inner_radius,
                    outer_radius,
                    start_angle,
                    end_angle,
                },
                Self::Sector {
                    cx: ocx,
                    cy: ocy,
                    inner_radius: oi,
                    outer_radius: oo,
                    start_angle: os,
                    end_angle: oe,
                },
            ) if cx == ocx && cy == ocy => Self::Sector {
                cx,
                cy,
                inner_radius: inner_radius.min(oi),
                outer_radius: outer_radius.max(oo),
                start_angle: start_angle.min(os),
                end_angle: end_angle.max(oe),
            },
            (a, b) => Self::Rect {
                bounding_box: BoundingBox::from_rect(a.bounds().union(b.bounds())),
            },
        }
    }
}

/// Aggregated shape of one view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewShape {
    /// View (or grouping track) id.
    pub view_id: String,
    /// Union of the shapes of every track below it.
    pub shape: RenderedShape,
}

/// Combine per-track shapes into one shape per view id.
///
/// Rectangles union into their bounding rectangle; sectors sharing a center
/// merge into one sector. Views with no reported track shape are skipped.
pub fn aggregate_view_shapes(root: &ViewDef, track_shapes: &HashMap<String, RenderedShape>) -> Vec<ViewShape> {
    let mut out = Vec::new();
    for view_id in collect_view_ids(root) {
        let Some(node) = find_node_by_id(root, &view_id) else {
            continue;
        };
        let mut merged: Option<RenderedShape> = None;
        walk_from(node, |n, _| {
            if let NodeRef::Track(t) = n
                && let Some(shape) = t.id.as_deref().and_then(|id| track_shapes.get(id))
            {
                merged = Some(match merged {
                    Some(m) => m.merge(*shape),
                    None => *shape,
                });
            }
            Walk::Continue
        });
        if let Some(shape) = merged {
            out.push(ViewShape { view_id, shape });
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compile/shapes.rs"]
mod tests;
