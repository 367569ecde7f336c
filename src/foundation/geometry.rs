pub use kurbo::{Point, Rect};

/// Width/height pair in absolute pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a size from width and height.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Square whose side is `side`.
    pub fn square(side: f64) -> Self {
        Self::new(side, side)
    }
}

/// Absolute pixel placement of one layout slot, relative to the composition origin.
///
/// Negative extents are carried through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl BoundingBox {
    /// Create a bounding box from origin and extent.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Same box shifted by `(dx, dy)`.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Convert to a `kurbo` rectangle (`x0 = x`, `x1 = x + width`).
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }

    /// Convert from a `kurbo` rectangle.
    pub fn from_rect(r: Rect) -> Self {
        Self::new(r.x0, r.y0, r.x1 - r.x0, r.y1 - r.y0)
    }
}

/// A bounding box normalized onto a fixed-unit grid (`unit x unit`).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RelativeBox {
    /// Left edge in grid units.
    pub x: f64,
    /// Top edge in grid units.
    pub y: f64,
    /// Width in grid units.
    pub w: f64,
    /// Height in grid units.
    pub h: f64,
}

impl RelativeBox {
    /// Scale `bb` by `unit / total` independently per axis.
    ///
    /// An axis with zero total extent maps to zero rather than NaN.
    pub fn from_bounding(bb: BoundingBox, total: Size, unit: f64) -> Self {
        let sx = scale(unit, total.width);
        let sy = scale(unit, total.height);
        Self {
            x: bb.x * sx,
            y: bb.y * sy,
            w: bb.width * sx,
            h: bb.height * sy,
        }
    }

    /// Inverse of [`RelativeBox::from_bounding`].
    pub fn to_bounding(self, total: Size, unit: f64) -> BoundingBox {
        let sx = if unit == 0.0 { 0.0 } else { total.width / unit };
        let sy = if unit == 0.0 { 0.0 } else { total.height / unit };
        BoundingBox::new(self.x * sx, self.y * sy, self.w * sx, self.h * sy)
    }
}

fn scale(unit: f64, total: f64) -> f64 {
    if total == 0.0 { 0.0 } else { unit / total }
}

/// Radius and angle bounds of a track drawn under a circular layout.
///
/// Angles are in degrees, clockwise from twelve o'clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolarPlacement {
    /// Outer radius in pixels.
    pub outer_radius: f64,
    /// Inner radius in pixels.
    pub inner_radius: f64,
    /// Start angle in degrees.
    pub start_angle: f64,
    /// End angle in degrees.
    pub end_angle: f64,
}

impl PolarPlacement {
    /// Radial thickness (`outer - inner`).
    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    /// Angular sweep in degrees.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
