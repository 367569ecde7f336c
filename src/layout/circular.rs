//! Ring layout: arcs replace the horizontal axis, radii the vertical one.

use crate::foundation::geometry::{BoundingBox, Point, PolarPlacement, Size};
use crate::layout::solver::{Solver, linear_extent};
use crate::layout::{grid_cells, group_slots, representative_size};
use crate::spec::model::{Arrangement, TrackDef, ViewChildren, ViewDef};

/// Angular and radial bounds handed down to a subtree.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Ring {
    outer: f64,
    inner: f64,
    start: f64,
    end: f64,
}

impl Ring {
    fn sweep(&self) -> f64 {
        self.end - self.start
    }

    fn thickness(&self) -> f64 {
        self.outer - self.inner
    }
}

/// Lay out a circular subtree inside a square whose side is the subtree's
/// linear width; returns that square's size.
pub(crate) fn place_circular(solver: &mut Solver<'_>, view: &ViewDef, origin: Point) -> Size {
    let side = linear_extent(view, solver.defaults).width;
    let outer = side / 2.0;
    let fraction = view.center_radius.unwrap_or(solver.defaults.center_radius);
    let ring = Ring {
        outer,
        inner: outer * fraction,
        start: 0.0,
        end: 360.0,
    };
    let bb = BoundingBox::new(origin.x, origin.y, side, side);
    ring_view(solver, view, ring, bb);
    Size::square(side)
}

fn ring_view(solver: &mut Solver<'_>, view: &ViewDef, ring: Ring, bb: BoundingBox) {
    match view.children() {
        ViewChildren::Views(children) => ring_views(solver, view, children, ring, bb),
        ViewChildren::Tracks(tracks) => ring_tracks(solver, view, tracks, ring, bb),
        ViewChildren::Both | ViewChildren::Neither => {}
    }
}

fn ring_views(solver: &mut Solver<'_>, view: &ViewDef, children: &[ViewDef], ring: Ring, bb: BoundingBox) {
    if children.is_empty() {
        return;
    }
    let n = children.len() as f64;
    let extents: Vec<Size> = children
        .iter()
        .map(|c| linear_extent(c, solver.defaults))
        .collect();
    match view.arrangement.unwrap_or_default() {
        Arrangement::Parallel => {
            let gap = solver.defaults.circular_gap_deg;
            let avail = ring.sweep() - gap * (n - 1.0);
            let total: f64 = extents.iter().map(|s| s.width).sum();
            let mut cursor = ring.start;
            for (child, s) in children.iter().zip(&extents) {
                let share = if total == 0.0 { avail / n } else { avail * s.width / total };
                let sub = Ring {
                    start: cursor,
                    end: cursor + share,
                    ..ring
                };
                ring_view(solver, child, sub, bb);
                cursor += share + gap;
            }
        }
        Arrangement::Serial => {
            let spacing = solver.spacing(view);
            let total = extents.iter().map(|s| s.height).sum::<f64>() + spacing * (n - 1.0);
            let scale = if total == 0.0 { 0.0 } else { ring.thickness() / total };
            let mut r = ring.outer;
            for (child, s) in children.iter().zip(&extents) {
                let sub = Ring {
                    outer: r,
                    inner: r - s.height * scale,
                    ..ring
                };
                ring_view(solver, child, sub, bb);
                r = sub.inner - spacing * scale;
            }
        }
    }
}

/// Columns split the arc, rows split the radius from the outside in.
fn ring_tracks(solver: &mut Solver<'_>, view: &ViewDef, tracks: &[TrackDef], ring: Ring, bb: BoundingBox) {
    let groups = group_slots(tracks);
    if groups.is_empty() {
        return;
    }
    let fallback = solver.fallback_size();
    let columns = view.wrap.unwrap_or(1).max(1);
    let wrapped = view.wrap.is_some();
    let arc_gap = if columns > 1 { solver.defaults.circular_gap_deg } else { 0.0 };
    let row_gap = if wrapped { solver.spacing(view) } else { 0.0 };
    let col_sweep = (ring.sweep() - arc_gap * f64::from(columns - 1)) / f64::from(columns);

    let sizes: Vec<Size> = groups.iter().map(|(o, _)| representative_size(o, fallback)).collect();
    let cells = grid_cells(groups.iter().map(|(o, _)| o.span.unwrap_or(1)), columns);

    let rows = cells.last().map_or(0, |c| c.row as usize + 1);
    let mut row_extent = vec![0.0f64; rows];
    for (c, s) in cells.iter().zip(&sizes) {
        let r = &mut row_extent[c.row as usize];
        *r = r.max(s.height);
    }
    let total = row_extent.iter().sum::<f64>() + row_gap * rows.saturating_sub(1) as f64;
    let scale = if total == 0.0 { 0.0 } else { ring.thickness() / total };
    let mut row_outer = Vec::with_capacity(rows);
    let mut r = ring.outer;
    for extent in &row_extent {
        row_outer.push(r);
        r -= (extent + row_gap) * scale;
    }

    let view_id = view.id.clone().unwrap_or_default();
    for ((owner, followers), (c, s)) in groups.into_iter().zip(cells.iter().zip(&sizes)) {
        let outer = row_outer[c.row as usize];
        let start = ring.start + f64::from(c.col) * (col_sweep + arc_gap);
        let sweep = f64::from(c.span) * col_sweep + f64::from(c.span - 1) * arc_gap;
        let polar = PolarPlacement {
            outer_radius: owner.outer_radius.unwrap_or(outer),
            inner_radius: owner.inner_radius.unwrap_or(outer - s.height * scale),
            start_angle: owner.start_angle.unwrap_or(start),
            end_angle: owner.end_angle.unwrap_or(start + sweep),
        };
        solver.push_slot(&view_id, owner, &followers, bb, Some(polar));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/circular.rs"]
mod tests;
