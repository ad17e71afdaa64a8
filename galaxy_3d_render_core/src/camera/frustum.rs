/// Frustum math: world planes, plane-state bitmask, and the pure
/// coefficient derivation used by `Camera` to rebuild its side planes.
///
/// A plane is stored as (normal, constant) with
/// `pseudo_distance(p) = normal · p - constant`. Frustum planes point
/// inward: a point is inside the frustum when its pseudo-distance to
/// every plane is >= 0.

use bitflags::bitflags;
use glam::DVec3;

/// Frustum plane indices (fixed order)
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_FAR: usize = 4;
pub const PLANE_NEAR: usize = 5;

/// Number of base frustum planes
pub const FRUSTUM_PLANES: usize = 6;

/// Maximum number of world planes (frustum + user clip planes).
/// Bounded by the width of the plane-state bitmask.
pub const MAX_WORLD_PLANES: usize = 32;

/// Result of a 3-way frustum/bound classification.
///
/// - `Outside` → skip the entire subtree
/// - `Inside` → draw the subtree without further tests
/// - `Intersects` → test children individually
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumIntersect {
    /// Bound is entirely outside the frustum
    Outside,
    /// Bound is entirely inside the frustum
    Inside,
    /// Bound straddles at least one plane
    Intersects,
}

/// Which half-space of a plane something lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// On the side the normal points to (inside, for frustum planes)
    Positive,
    /// Behind the plane
    Negative,
    /// Straddling the plane
    Neither,
}

/// An infinite plane: `normal · p = constant`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    /// Plane normal (unit length for frustum planes)
    pub normal: DVec3,
    /// Distance term
    pub constant: f64,
}

impl Plane {
    /// Plane facing +Y through the origin
    pub const XZ: Plane = Plane { normal: DVec3::Y, constant: 0.0 };

    /// Create a plane from a normal and constant.
    pub fn new(normal: DVec3, constant: f64) -> Self {
        Self { normal, constant }
    }

    /// Create the plane with the given normal passing through `point`.
    pub fn from_normal_and_point(normal: DVec3, point: DVec3) -> Self {
        Self { normal, constant: normal.dot(point) }
    }

    /// Signed distance (scaled by the normal length) from `point` to the plane.
    pub fn pseudo_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.constant
    }

    /// Classify a point against the plane.
    pub fn which_side(&self, point: DVec3) -> PlaneSide {
        let distance = self.pseudo_distance(point);
        if distance < 0.0 {
            PlaneSide::Negative
        } else if distance > 0.0 {
            PlaneSide::Positive
        } else {
            PlaneSide::Neither
        }
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::XZ
    }
}

bitflags! {
    /// Plane-state bitmask threaded through a culling traversal.
    ///
    /// Bit `i` set means "the bound being tested is already known to lie
    /// inside world plane `i`, skip it". Bits above the six named planes
    /// belong to user clip planes. The caller owns this value and saves /
    /// restores it around each child in a hierarchy.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PlaneState: u32 {
        const LEFT = 1 << PLANE_LEFT;
        const RIGHT = 1 << PLANE_RIGHT;
        const BOTTOM = 1 << PLANE_BOTTOM;
        const TOP = 1 << PLANE_TOP;
        const FAR = 1 << PLANE_FAR;
        const NEAR = 1 << PLANE_NEAR;
    }
}

impl PlaneState {
    /// Bit for the given world plane index.
    pub fn for_plane(index: usize) -> Self {
        debug_assert!(index < MAX_WORLD_PLANES, "plane index out of range: {}", index);
        Self::from_bits_retain(1u32 << index)
    }

    /// Whether the given plane is marked as satisfied.
    pub fn is_satisfied(&self, index: usize) -> bool {
        self.contains(Self::for_plane(index))
    }

    /// Mark the given plane as satisfied.
    pub fn mark_satisfied(&mut self, index: usize) {
        self.insert(Self::for_plane(index));
    }
}

/// Side-plane coefficients derived from the frustum extents.
///
/// Each side plane normal is `axis * c[0] + direction * c[1]`, where
/// `axis` is the camera's left vector (left/right planes) or up vector
/// (bottom/top planes). `offsets` are added to the plane constants
/// (only non-zero under parallel projection, in left/right/bottom/top order).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumCoefficients {
    pub left: [f64; 2],
    pub right: [f64; 2],
    pub bottom: [f64; 2],
    pub top: [f64; 2],
    pub offsets: [f64; 4],
}

impl FrustumCoefficients {
    /// Coefficients for a perspective frustum.
    ///
    /// View-space x runs along `-left`, so the left plane leans on `-left`
    /// and the right plane on `+left`. Each pair is normalized by
    /// `1 / sqrt(near² + extent²)`.
    pub fn perspective(near: f64, left: f64, right: f64, bottom: f64, top: f64) -> Self {
        let near_squared = near * near;

        let inverse_length = 1.0 / (near_squared + left * left).sqrt();
        let coeff_left = [-near * inverse_length, -left * inverse_length];

        let inverse_length = 1.0 / (near_squared + right * right).sqrt();
        let coeff_right = [near * inverse_length, right * inverse_length];

        let inverse_length = 1.0 / (near_squared + bottom * bottom).sqrt();
        let coeff_bottom = [near * inverse_length, -bottom * inverse_length];

        let inverse_length = 1.0 / (near_squared + top * top).sqrt();
        let coeff_top = [-near * inverse_length, top * inverse_length];

        Self {
            left: coeff_left,
            right: coeff_right,
            bottom: coeff_bottom,
            top: coeff_top,
            offsets: [0.0; 4],
        }
    }

    /// Coefficients for a parallel (orthographic) frustum.
    ///
    /// Normals degenerate to the unit camera axes; the sign is chosen by the
    /// ordering of the extents so mirrored frusta stay closed. The raw
    /// extents become constant offsets.
    pub fn parallel(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        let (coeff_left, coeff_right, offset_left, offset_right) = if right > left {
            ([-1.0, 0.0], [1.0, 0.0], left, -right)
        } else {
            ([1.0, 0.0], [-1.0, 0.0], -left, right)
        };

        let (coeff_bottom, coeff_top, offset_bottom, offset_top) = if top > bottom {
            ([1.0, 0.0], [-1.0, 0.0], bottom, -top)
        } else {
            ([-1.0, 0.0], [1.0, 0.0], -bottom, top)
        };

        Self {
            left: coeff_left,
            right: coeff_right,
            bottom: coeff_bottom,
            top: coeff_top,
            offsets: [offset_left, offset_right, offset_bottom, offset_top],
        }
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
