use crate::compile::options::CompileDefaults;
use crate::foundation::geometry::{BoundingBox, Point, PolarPlacement, RelativeBox, Size};
use crate::layout::{CompositionLayout, LayoutSlot, circular, grid_cells, group_slots, representative_size};
use crate::spec::model::{Arrangement, Orientation, TrackDef, ViewChildren, ViewDef};

/// Place every slot of a normalized tree.
///
/// Serial views stack top to bottom and parallel views run left to right, with
/// `spacing` between neighbours. The first circular view met on the way down
/// lays out its whole subtree as rings inside a square.
#[tracing::instrument(skip(root, defaults))]
pub fn compute_layout(root: &ViewDef, defaults: &CompileDefaults) -> CompositionLayout {
    let mut solver = Solver::new(defaults);
    let size = solver.view(root, Point::ZERO, true);
    let mut slots = solver.slots;
    for slot in &mut slots {
        slot.relative_box = RelativeBox::from_bounding(slot.bounding_box, size, defaults.grid_unit);
    }
    tracing::debug!(slots = slots.len(), width = size.width, height = size.height, "layout done");
    CompositionLayout { size, slots }
}

/// Extent a view would occupy under linear layout, without emitting slots.
pub(crate) fn linear_extent(view: &ViewDef, defaults: &CompileDefaults) -> Size {
    Solver::new(defaults).view(view, Point::ZERO, false)
}

pub(crate) struct Solver<'a> {
    pub(crate) defaults: &'a CompileDefaults,
    pub(crate) slots: Vec<LayoutSlot>,
}

impl<'a> Solver<'a> {
    pub(crate) fn new(defaults: &'a CompileDefaults) -> Self {
        Self {
            defaults,
            slots: Vec::new(),
        }
    }

    pub(crate) fn fallback_size(&self) -> Size {
        Size::new(self.defaults.track_width, self.defaults.track_height)
    }

    pub(crate) fn spacing(&self, view: &ViewDef) -> f64 {
        view.spacing.unwrap_or(self.defaults.view_spacing)
    }

    fn view(&mut self, view: &ViewDef, origin: Point, circular_ok: bool) -> Size {
        let dx = view.x_offset.unwrap_or(0.0);
        let dy = view.y_offset.unwrap_or(0.0);
        let at = Point::new(origin.x + dx, origin.y + dy);

        let content = if circular_ok && view.is_circular() {
            circular::place_circular(self, view, at)
        } else {
            match view.children() {
                ViewChildren::Views(children) => self.views(view, children, at, circular_ok),
                ViewChildren::Tracks(tracks) => self.tracks(view, tracks, at),
                ViewChildren::Both | ViewChildren::Neither => Size::default(),
            }
        };
        Size::new(content.width + dx, content.height + dy)
    }

    fn views(&mut self, view: &ViewDef, children: &[ViewDef], origin: Point, circular_ok: bool) -> Size {
        let spacing = self.spacing(view);
        let arrangement = view.arrangement.unwrap_or_default();
        let mut along = 0.0f64;
        let mut across = 0.0f64;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                along += spacing;
            }
            let at = match arrangement {
                Arrangement::Serial => Point::new(origin.x, origin.y + along),
                Arrangement::Parallel => Point::new(origin.x + along, origin.y),
            };
            let s = self.view(child, at, circular_ok);
            let (main, cross) = match arrangement {
                Arrangement::Serial => (s.height, s.width),
                Arrangement::Parallel => (s.width, s.height),
            };
            along += main;
            across = across.max(cross);
        }
        match arrangement {
            Arrangement::Serial => Size::new(across, along),
            Arrangement::Parallel => Size::new(along, across),
        }
    }

    /// Lay tracks out on a grid of `wrap` columns (one column when unset).
    ///
    /// Work happens in `(u, v)` space: `u` runs along the genomic axis, `v`
    /// across it. Horizontal views map `u` to x, vertical views to y.
    fn tracks(&mut self, view: &ViewDef, tracks: &[TrackDef], origin: Point) -> Size {
        let groups = group_slots(tracks);
        if groups.is_empty() {
            return Size::default();
        }
        let fallback = self.fallback_size();
        let columns = view.wrap.unwrap_or(1).max(1);
        let gap = if view.wrap.is_some() { self.spacing(view) } else { 0.0 };
        let sizes: Vec<Size> = groups.iter().map(|(o, _)| representative_size(o, fallback)).collect();
        let cells = grid_cells(groups.iter().map(|(o, _)| o.span.unwrap_or(1)), columns);

        let cell = cells
            .iter()
            .zip(&sizes)
            .filter(|(c, _)| c.span == 1)
            .map(|(_, s)| s.width)
            .reduce(f64::max)
            .unwrap_or_else(|| sizes.iter().map(|s| s.width).fold(0.0, f64::max));

        let rows = cells.last().map_or(0, |c| c.row as usize + 1);
        let mut row_extent = vec![0.0f64; rows];
        for (c, s) in cells.iter().zip(&sizes) {
            let r = &mut row_extent[c.row as usize];
            *r = r.max(s.height);
        }
        let mut row_start = Vec::with_capacity(rows);
        let mut v = 0.0f64;
        for (r, extent) in row_extent.iter().enumerate() {
            if r > 0 {
                v += gap;
            }
            row_start.push(v);
            v += extent;
        }
        let total_v = v;

        let vertical = view.orientation == Some(Orientation::Vertical);
        let view_id = view.id.clone().unwrap_or_default();
        let mut total_u = 0.0f64;
        for ((owner, followers), (c, s)) in groups.into_iter().zip(cells.iter().zip(&sizes)) {
            let u = f64::from(c.col) * (cell + gap);
            let main = if c.span == 1 {
                s.width
            } else {
                f64::from(c.span) * cell + f64::from(c.span - 1) * gap
            };
            total_u = total_u.max(u + main);
            let v = row_start[c.row as usize];
            let bb = if vertical {
                BoundingBox::new(origin.x + v, origin.y + u, s.height, main)
            } else {
                BoundingBox::new(origin.x + u, origin.y + v, main, s.height)
            };
            self.push_slot(&view_id, owner, &followers, bb, None);
        }

        if vertical {
            Size::new(total_v, total_u)
        } else {
            Size::new(total_u, total_v)
        }
    }

    pub(crate) fn push_slot(
        &mut self,
        view_id: &str,
        owner: &TrackDef,
        followers: &[&TrackDef],
        bounding_box: BoundingBox,
        polar: Option<PolarPlacement>,
    ) {
        self.slots.push(LayoutSlot {
            id: owner.id.clone().unwrap_or_default(),
            view_id: view_id.to_owned(),
            owner: owner.clone(),
            followers: followers.iter().map(|t| (*t).clone()).collect(),
            bounding_box,
            relative_box: RelativeBox::default(),
            polar,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
