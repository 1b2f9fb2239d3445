use crate::DVec3;

/// Axis-aligned bounding box accumulated from LDraw geometry.
///
/// A fresh box is in the empty state (`min = +inf`, `max = -inf` on every
/// axis). Merging points grows it; [`BoundingBox::normalize`] turns a box that
/// never received a point into the zero box so consumers never see infinities.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

/// Planar footprint of a part standing upright (Y is vertical in LDraw).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Footprint {
    /// Extent along X
    pub width: f64,
    /// Extent along Z
    pub depth: f64,
    /// Extent along Y
    pub height: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingBox {
    /// Create a box from two opposite corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Create an empty box (contains nothing).
    pub fn empty() -> Self {
        Self::EMPTY
    }

    /// Create a box from the `[[min], [max]]` corner pair used by the database.
    pub fn from_corners(corners: [[f64; 3]; 2]) -> Self {
        Self {
            min: DVec3::from_array(corners[0]),
            max: DVec3::from_array(corners[1]),
        }
    }

    /// Corner pair in `[[min], [max]]` form.
    pub fn to_corners(&self) -> [[f64; 3]; 2] {
        [self.min.to_array(), self.max.to_array()]
    }

    /// True while the box is still in the sentinel state.
    pub fn is_empty(&self) -> bool {
        self.min == Self::EMPTY.min && self.max == Self::EMPTY.max
    }

    /// Grow the box to include every point (per-axis min/max reduction).
    pub fn merge_points(&mut self, points: &[DVec3]) {
        for &p in points {
            self.min = self.min.min(p);
            self.max = self.max.max(p);
        }
    }

    /// Grow the box to include another box. Merging an empty box is a no-op.
    pub fn merge_box(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.merge_points(&[other.min, other.max]);
    }

    /// Replace the empty sentinel with the zero box.
    pub fn normalize(self) -> Self {
        if self.is_empty() {
            Self::ZERO
        } else {
            self
        }
    }

    /// Extent per axis (max - min).
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Width, depth and height of the box with Y as the vertical axis.
    pub fn footprint(&self) -> Footprint {
        let size = self.size();
        Footprint {
            width: size.x,
            depth: size.z,
            height: size.y,
        }
    }

    /// The 8 corners of the box.
    pub fn corners(&self) -> [DVec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            DVec3::new(lo.x, lo.y, lo.z),
            DVec3::new(hi.x, lo.y, lo.z),
            DVec3::new(lo.x, hi.y, lo.z),
            DVec3::new(hi.x, hi.y, lo.z),
            DVec3::new(lo.x, lo.y, hi.z),
            DVec3::new(hi.x, lo.y, hi.z),
            DVec3::new(lo.x, hi.y, hi.z),
            DVec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Static constants
    pub const EMPTY: BoundingBox = BoundingBox {
        min: DVec3::INFINITY,
        max: DVec3::NEG_INFINITY,
    };

    pub const ZERO: BoundingBox = BoundingBox {
        min: DVec3::ZERO,
        max: DVec3::ZERO,
    };
}
