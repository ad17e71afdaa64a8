/// Axis-aligned box bound (center + half extents).

use glam::DVec3;
use crate::camera::{Plane, PlaneSide};
use super::BoundingVolume;

/// Axis-aligned bounding box in world space.
///
/// Stored as center and half extents so the plane test is a single
/// projected-radius comparison instead of a p-vertex/n-vertex pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub center: DVec3,
    pub extent: DVec3,
    check_plane: usize,
}

impl BoundingBox {
    /// Create a box from center and half extents.
    pub fn new(center: DVec3, extent: DVec3) -> Self {
        Self { center, extent, check_plane: 0 }
    }

    /// Create a box from min/max corners.
    pub fn from_min_max(min: DVec3, max: DVec3) -> Self {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    /// Minimum corner.
    pub fn min(&self) -> DVec3 {
        self.center - self.extent
    }

    /// Maximum corner.
    pub fn max(&self) -> DVec3 {
        self.center + self.extent
    }
}

impl BoundingVolume for BoundingBox {
    fn which_side(&self, plane: &Plane) -> PlaneSide {
        // Half-length of the box projected onto the plane normal
        let radius = self.extent.dot(plane.normal.abs());
        let distance = plane.pseudo_distance(self.center);
        if distance <= -radius {
            PlaneSide::Negative
        } else if distance >= radius {
            PlaneSide::Positive
        } else {
            PlaneSide::Neither
        }
    }

    fn check_plane(&self) -> usize {
        self.check_plane
    }

    fn set_check_plane(&mut self, plane: usize) {
        self.check_plane = plane;
    }
}
