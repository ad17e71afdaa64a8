/// Sphere bound (center + radius).

use glam::DVec3;
use crate::camera::{Plane, PlaneSide};
use super::BoundingVolume;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: DVec3,
    pub radius: f64,
    check_plane: usize,
}

impl BoundingSphere {
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius, check_plane: 0 }
    }
}

impl BoundingVolume for BoundingSphere {
    fn which_side(&self, plane: &Plane) -> PlaneSide {
        let distance = plane.pseudo_distance(self.center);
        if distance <= -self.radius {
            PlaneSide::Negative
        } else if distance >= self.radius {
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
