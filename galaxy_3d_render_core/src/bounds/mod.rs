//! Bounding volumes tested by `Camera::contains`.
//!
//! Scene nodes own their bounds; the camera only classifies them against
//! its world planes and memoizes, on the bound, the last plane that culled it.

mod bounding_box;
mod bounding_sphere;

pub use bounding_box::BoundingBox;
pub use bounding_sphere::BoundingSphere;

use crate::camera::{Plane, PlaneSide};

/// A volume that can be classified against a plane.
///
/// The check plane is the index of the world plane that last culled this
/// bound (or a sibling sharing the bound); `Camera::contains` tests it
/// first. It starts at 0.
pub trait BoundingVolume {
    /// Classify the whole volume against `plane`.
    ///
    /// `Positive` when entirely on the normal side, `Negative` when
    /// entirely behind, `Neither` when straddling.
    fn which_side(&self, plane: &Plane) -> PlaneSide;

    /// Memoized plane index to test first.
    fn check_plane(&self) -> usize;

    /// Memoize the plane index that culled this volume.
    fn set_check_plane(&mut self, plane: usize);
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
