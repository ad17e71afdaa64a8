//! Unit tests for frustum.rs
//!
//! Tests Plane classification, the PlaneState bitmask and coefficient derivation.

use super::*;
use glam::DVec3;

const EPSILON: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// PLANE INDICES
// ============================================================================

#[test]
fn test_plane_indices_are_fixed() {
    assert_eq!(PLANE_LEFT, 0);
    assert_eq!(PLANE_RIGHT, 1);
    assert_eq!(PLANE_BOTTOM, 2);
    assert_eq!(PLANE_TOP, 3);
    assert_eq!(PLANE_FAR, 4);
    assert_eq!(PLANE_NEAR, 5);
    assert_eq!(FRUSTUM_PLANES, 6);
    assert!(MAX_WORLD_PLANES <= 32);
}

// ============================================================================
// PLANE
// ============================================================================

#[test]
fn test_plane_pseudo_distance() {
    let plane = Plane::new(DVec3::Y, 2.0);
    assert!(approx(plane.pseudo_distance(DVec3::new(0.0, 5.0, 0.0)), 3.0));
    assert!(approx(plane.pseudo_distance(DVec3::new(7.0, 2.0, -1.0)), 0.0));
    assert!(approx(plane.pseudo_distance(DVec3::ZERO), -2.0));
}

#[test]
fn test_plane_which_side() {
    let plane = Plane::from_normal_and_point(DVec3::X, DVec3::new(1.0, 0.0, 0.0));
    assert_eq!(plane.constant, 1.0);
    assert_eq!(plane.which_side(DVec3::new(2.0, 0.0, 0.0)), PlaneSide::Positive);
    assert_eq!(plane.which_side(DVec3::new(0.0, 0.0, 0.0)), PlaneSide::Negative);
    assert_eq!(plane.which_side(DVec3::new(1.0, 3.0, 3.0)), PlaneSide::Neither);
}

#[test]
fn test_plane_default_is_xz() {
    assert_eq!(Plane::default(), Plane::XZ);
    assert_eq!(Plane::XZ.normal, DVec3::Y);
}

// ============================================================================
// PLANE STATE
// ============================================================================

#[test]
fn test_plane_state_named_bits() {
    assert_eq!(PlaneState::for_plane(PLANE_LEFT), PlaneState::LEFT);
    assert_eq!(PlaneState::for_plane(PLANE_NEAR), PlaneState::NEAR);
    assert_eq!(PlaneState::default(), PlaneState::empty());
}

#[test]
fn test_plane_state_marks_user_planes() {
    let mut state = PlaneState::empty();
    state.mark_satisfied(PLANE_TOP);
    state.mark_satisfied(17);

    assert!(state.is_satisfied(PLANE_TOP));
    assert!(state.is_satisfied(17));
    assert!(!state.is_satisfied(PLANE_BOTTOM));
    assert!(!state.is_satisfied(16));
    assert_eq!(state.bits(), (1 << 3) | (1 << 17));
}

#[test]
fn test_plane_state_highest_bit() {
    let mut state = PlaneState::empty();
    state.mark_satisfied(MAX_WORLD_PLANES - 1);
    assert!(state.is_satisfied(31));
}

// ============================================================================
// COEFFICIENTS
// ============================================================================

#[test]
fn test_perspective_coefficients_are_normalized() {
    let coeff = FrustumCoefficients::perspective(1.0, -0.5, 0.5, -0.5, 0.5);
    for pair in [coeff.left, coeff.right, coeff.bottom, coeff.top] {
        assert!(approx(pair[0] * pair[0] + pair[1] * pair[1], 1.0));
    }
    assert_eq!(coeff.offsets, [0.0; 4]);
}

#[test]
fn test_perspective_coefficients_values() {
    let coeff = FrustumCoefficients::perspective(1.0, -1.0, 1.0, -1.0, 1.0);
    let s = 1.0 / 2.0_f64.sqrt();

    assert!(approx(coeff.left[0], -s) && approx(coeff.left[1], s));
    assert!(approx(coeff.right[0], s) && approx(coeff.right[1], s));
    assert!(approx(coeff.bottom[0], s) && approx(coeff.bottom[1], s));
    assert!(approx(coeff.top[0], -s) && approx(coeff.top[1], s));
}

#[test]
fn test_parallel_coefficients_ordered_extents() {
    let coeff = FrustumCoefficients::parallel(-2.0, 3.0, -1.0, 4.0);
    assert_eq!(coeff.left, [-1.0, 0.0]);
    assert_eq!(coeff.right, [1.0, 0.0]);
    assert_eq!(coeff.bottom, [1.0, 0.0]);
    assert_eq!(coeff.top, [-1.0, 0.0]);
    assert_eq!(coeff.offsets, [-2.0, -3.0, -1.0, -4.0]);
}

#[test]
fn test_parallel_coefficients_mirrored_extents() {
    let coeff = FrustumCoefficients::parallel(3.0, -2.0, 4.0, -1.0);
    assert_eq!(coeff.left, [1.0, 0.0]);
    assert_eq!(coeff.right, [-1.0, 0.0]);
    assert_eq!(coeff.bottom, [-1.0, 0.0]);
    assert_eq!(coeff.top, [1.0, 0.0]);
    assert_eq!(coeff.offsets, [-3.0, -2.0, -4.0, -1.0]);
}
