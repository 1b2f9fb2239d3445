// Affine transform utilities for DMat4
//
// LDraw places every sub-file with a 3x3 linear block plus a translation.
// glam::DMat4 already provides transform_point3() and matrix multiplication;
// this module adds the LDraw field layout and box transformation.

use glam::{DMat4, DVec3, DVec4};

use crate::BoundingBox;

/// Number of numeric fields describing a placement on a type-1 line
/// (`x y z a b c d e f g h i`).
pub const LDRAW_TRANSFORM_FIELDS: usize = 12;

/// Build a transform from the 12 placement fields of an LDraw type-1 line.
///
/// The fields are `x y z a b c d e f g h i`, mapping a point as
///
/// ```text
/// u' = a*u + b*v + c*w + x
/// v' = d*u + e*v + f*w + y
/// w' = g*u + h*v + i*w + z
/// ```
pub fn from_ldraw_fields(fields: [f64; LDRAW_TRANSFORM_FIELDS]) -> DMat4 {
    let [x, y, z, a, b, c, d, e, f, g, h, i] = fields;
    // glam is column-major: columns are the images of the basis vectors.
    DMat4::from_cols(
        DVec4::new(a, d, g, 0.0),
        DVec4::new(b, e, h, 0.0),
        DVec4::new(c, f, i, 0.0),
        DVec4::new(x, y, z, 1.0),
    )
}

/// Compose two transforms: `outer` is applied after `inner`.
pub fn compose(outer: &DMat4, inner: &DMat4) -> DMat4 {
    *outer * *inner
}

/// Apply the affine transform to a point (linear part plus translation).
pub fn transform_point(m: &DMat4, p: DVec3) -> DVec3 {
    m.transform_point3(p)
}

/// Extension trait for DMat4 to provide box transformation.
pub trait AffineExt {
    /// Transform a list of points.
    fn transform_points(&self, points: &[DVec3]) -> Vec<DVec3>;

    /// Transform a bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    /// An empty box stays empty.
    fn transform_box(&self, bbox: &BoundingBox) -> BoundingBox;
}

impl AffineExt for DMat4 {
    fn transform_points(&self, points: &[DVec3]) -> Vec<DVec3> {
        points.iter().map(|&p| self.transform_point3(p)).collect()
    }

    fn transform_box(&self, bbox: &BoundingBox) -> BoundingBox {
        if bbox.is_empty() {
            return BoundingBox::empty();
        }

        let mut result = BoundingBox::empty();
        result.merge_points(&self.transform_points(&bbox.corners()));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LDRAW_IDENTITY: [f64; 12] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_transform_point_identity() {
        let point = DVec3::new(1.0, -2.0, 3.5);
        assert_eq!(transform_point(&DMat4::IDENTITY, point), point);
    }

    #[test]
    fn test_ldraw_identity_fields() {
        assert_eq!(from_ldraw_fields(LDRAW_IDENTITY), DMat4::IDENTITY);
    }

    #[test]
    fn test_ldraw_fields_layout() {
        // 90 degrees about Y followed by a translation of (10, -24, 30)
        let m = from_ldraw_fields([10.0, -24.0, 30.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0, 0.0]);
        let p = transform_point(&m, DVec3::new(1.0, 2.0, 3.0));

        // u' = 3 + 10, v' = 2 - 24, w' = -1 + 30
        assert_eq!(p, DVec3::new(13.0, -22.0, 29.0));
    }

    #[test]
    fn test_compose_order() {
        let outer = DMat4::from_translation(DVec3::new(100.0, 0.0, 0.0));
        let inner = DMat4::from_scale(DVec3::splat(2.0));
        let m = compose(&outer, &inner);

        // Scale happens first, then the translation
        assert_eq!(transform_point(&m, DVec3::new(1.0, 1.0, 1.0)), DVec3::new(102.0, 2.0, 2.0));
    }

    #[test]
    fn test_compose_associative() {
        let a = from_ldraw_fields([1.0, 2.0, 3.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0, 0.0]);
        let b = from_ldraw_fields([-8.0, 4.0, 0.5, 2.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 3.0]);
        let c = DMat4::from_rotation_x(0.3) * DMat4::from_translation(DVec3::new(5.0, 6.0, 7.0));

        let left = compose(&compose(&a, &b), &c);
        let right = compose(&a, &compose(&b, &c));
        assert!(left.abs_diff_eq(right, 1e-9));
    }

    #[test]
    fn test_transform_box_translation() {
        let mut bbox = BoundingBox::empty();
        bbox.merge_points(&[DVec3::ZERO, DVec3::ONE]);

        let m = DMat4::from_translation(DVec3::new(5.0, 5.0, 5.0));
        let moved = m.transform_box(&bbox);

        assert_eq!(moved.min, DVec3::splat(5.0));
        assert_eq!(moved.max, DVec3::splat(6.0));
    }

    #[test]
    fn test_transform_box_rotation_uses_all_corners() {
        let mut bbox = BoundingBox::empty();
        bbox.merge_points(&[DVec3::new(0.0, 0.0, 0.0), DVec3::new(40.0, 24.0, 20.0)]);

        // Quarter turn about Y swaps the X and Z extents
        let m = from_ldraw_fields([0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0, 0.0]);
        let rotated = m.transform_box(&bbox);

        assert!(rotated.size().abs_diff_eq(DVec3::new(20.0, 24.0, 40.0), 1e-9));
    }

    #[test]
    fn test_transform_empty_box_stays_empty() {
        let m = DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0));
        assert!(m.transform_box(&BoundingBox::empty()).is_empty());
    }
}
