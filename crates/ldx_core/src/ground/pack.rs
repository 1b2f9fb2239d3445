//! Rectangle packing.
//!
//! The layout only needs "place these rectangles somewhere without overlap
//! and tell me the extent", so packing sits behind the [`Packer`] trait.
//! [`ShelfPacker`] is the default: rectangles arrive largest first and are
//! laid out left to right in rows (shelves).

use super::{LayoutError, LayoutResult};

/// Positions assigned by a packer, one per requested rectangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackedLayout {
    /// Top-left corner of each rectangle, in request order
    pub positions: Vec<(i64, i64)>,
    /// Overall extent along the first axis
    pub width: i64,
    /// Overall extent along the second axis
    pub height: i64,
}

/// A 2-D rectangle packing service.
pub trait Packer {
    /// Place every `(width, height)` rectangle.
    fn pack(&self, sizes: &[(i64, i64)]) -> LayoutResult<PackedLayout>;
}

/// Row-by-row packer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShelfPacker {
    /// Row width limit. `None` picks a roughly square plate: the larger of
    /// the widest rectangle and the square root of the total area.
    pub max_width: Option<i64>,
}

impl ShelfPacker {
    pub fn new(max_width: Option<i64>) -> Self {
        Self { max_width }
    }

    fn row_limit(&self, sizes: &[(i64, i64)]) -> i64 {
        if let Some(limit) = self.max_width {
            return limit;
        }

        let widest = sizes.iter().map(|&(w, _)| w).max().unwrap_or(0);
        let area: f64 = sizes.iter().map(|&(w, h)| (w * h) as f64).sum();
        widest.max(area.sqrt().ceil() as i64)
    }
}

impl Packer for ShelfPacker {
    fn pack(&self, sizes: &[(i64, i64)]) -> LayoutResult<PackedLayout> {
        let limit = self.row_limit(sizes);
        let mut layout = PackedLayout {
            positions: Vec::with_capacity(sizes.len()),
            ..Default::default()
        };

        let (mut x, mut y, mut shelf_height) = (0, 0, 0);

        for (index, &(w, h)) in sizes.iter().enumerate() {
            if w > limit {
                return Err(LayoutError::Unplaced {
                    index,
                    width: w,
                    depth: h,
                    limit,
                });
            }

            // Start a new shelf when the row is full
            if x > 0 && x + w > limit {
                y += shelf_height;
                x = 0;
                shelf_height = 0;
            }

            layout.positions.push((x, y));
            x += w;
            shelf_height = shelf_height.max(h);
            layout.width = layout.width.max(x);
        }

        layout.height = y + shelf_height;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlaps(a: ((i64, i64), (i64, i64)), b: ((i64, i64), (i64, i64))) -> bool {
        let ((ax, ay), (aw, ah)) = a;
        let ((bx, by), (bw, bh)) = b;
        ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
    }

    #[test]
    fn test_empty() {
        let layout = ShelfPacker::default().pack(&[]).unwrap();
        assert_eq!(layout, PackedLayout::default());
    }

    #[test]
    fn test_rows_wrap_at_limit() {
        let packer = ShelfPacker::new(Some(100));
        let layout = packer.pack(&[(60, 30), (30, 30), (30, 30), (90, 60)]).unwrap();

        assert_eq!(layout.positions, vec![(0, 0), (60, 0), (0, 30), (0, 60)]);
        assert_eq!(layout.width, 90);
        assert_eq!(layout.height, 120);
    }

    #[test]
    fn test_no_overlap_default_limit() {
        let sizes: Vec<(i64, i64)> = (0..25).map(|i| (30 + (i % 4) * 30, 30 + (i % 3) * 30)).collect();
        let layout = ShelfPacker::default().pack(&sizes).unwrap();

        assert_eq!(layout.positions.len(), sizes.len());
        for i in 0..sizes.len() {
            let (x, y) = layout.positions[i];
            assert!(x + sizes[i].0 <= layout.width);
            assert!(y + sizes[i].1 <= layout.height);
            for j in (i + 1)..sizes.len() {
                assert!(!overlaps((layout.positions[i], sizes[i]), (layout.positions[j], sizes[j])));
            }
        }
    }

    #[test]
    fn test_too_wide_for_explicit_limit() {
        let packer = ShelfPacker::new(Some(50));
        assert!(matches!(
            packer.pack(&[(30, 30), (60, 30)]),
            Err(LayoutError::Unplaced { index: 1, limit: 50, .. })
        ));
    }
}
