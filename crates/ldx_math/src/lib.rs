// Re-export glam for convenience
pub use glam::*;

// LDX math types
mod affine;
mod bbox;

pub use affine::{compose, from_ldraw_fields, transform_point, AffineExt, LDRAW_TRANSFORM_FIELDS};
pub use bbox::{BoundingBox, Footprint};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_creation() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_dvec3_min_max() {
        let a = DVec3::new(1.0, 5.0, 3.0);
        let b = DVec3::new(4.0, 2.0, 6.0);
        assert_eq!(a.min(b), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(a.max(b), DVec3::new(4.0, 5.0, 6.0));
    }
}
