//! Axis-aligned bounding box

use crate::core::types::DVec3;

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Zero-size AABB sitting on a single point
    pub fn from_point(point: DVec3) -> Self {
        Self { min: point, max: point }
    }

    /// Create AABB from center and half-extents
    pub fn from_center_half_extent(center: DVec3, half_extent: DVec3) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Smallest AABB containing every point, or `None` for an empty iterator
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let mut aabb = Self::from_point(points.next()?);
        for p in points {
            aabb.expand(p);
        }
        Some(aabb)
    }

    /// Get center point
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Get size (max - min)
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Expand AABB to include point
    pub fn expand(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Return merged AABB containing both
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_size() {
        let aabb = Aabb::from_center_half_extent(DVec3::splat(0.5), DVec3::splat(0.5));
        assert_eq!(aabb.center(), DVec3::splat(0.5));
        assert_eq!(aabb.size(), DVec3::ONE);
    }

    #[test]
    fn test_from_points() {
        let aabb = Aabb::from_points([
            DVec3::new(1.0, -2.0, 0.0),
            DVec3::new(-1.0, 3.0, 0.5),
            DVec3::new(0.0, 0.0, -4.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, DVec3::new(-1.0, -2.0, -4.0));
        assert_eq!(aabb.max, DVec3::new(1.0, 3.0, 0.5));
    }

    #[test]
    fn test_from_points_empty() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_merged() {
        let a = Aabb::from_center_half_extent(DVec3::ZERO, DVec3::ONE);
        let b = Aabb::from_points([DVec3::splat(0.5), DVec3::splat(3.0)]).unwrap();
        let m = a.merged(&b);
        assert_eq!(m.min, DVec3::splat(-1.0));
        assert_eq!(m.max, DVec3::splat(3.0));
    }
}
