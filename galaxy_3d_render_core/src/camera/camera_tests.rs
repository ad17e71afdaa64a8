use std::cell::RefCell;
use glam::{DMat3, DMat4, DVec2, DVec3};
use crate::backend::mock_backend::{self, BackendCall, CallLog, MockBackend};
use crate::backend::ViewportRect;
use crate::bounds::{BoundingSphere, BoundingVolume};
use crate::context::{ContextKey, RenderContext};
use crate::error::Error;
use super::*;
use super::PlaneSide::{Negative, Neither, Positive};

const EPSILON: f64 = 1e-9;

fn create_test_context() -> (RenderContext, CallLog) {
    let (backend, log) = MockBackend::with_log();
    (RenderContext::new(ContextKey::default(), Box::new(backend), None), log)
}

/// Camera already synchronized with the context (nothing dirty)
fn create_applied_camera(context: &mut RenderContext, log: &CallLog) -> Camera {
    let mut camera = Camera::new(800, 600);
    camera.apply(context);
    mock_backend::drain(log);
    camera
}

/// Bound answering a fixed side per plane index and recording every test
struct CountingBound {
    planes: Vec<Plane>,
    sides: Vec<PlaneSide>,
    check_plane: usize,
    tested: RefCell<Vec<usize>>,
}

impl CountingBound {
    fn new(camera: &Camera, sides: Vec<PlaneSide>) -> Self {
        Self {
            planes: camera.world_planes().to_vec(),
            sides,
            check_plane: 0,
            tested: RefCell::new(Vec::new()),
        }
    }

    fn tested(&self) -> Vec<usize> {
        self.tested.borrow().clone()
    }
}

impl BoundingVolume for CountingBound {
    fn which_side(&self, plane: &Plane) -> PlaneSide {
        let index = self.planes.iter().position(|p| p == plane).expect("unknown plane");
        self.tested.borrow_mut().push(index);
        self.sides[index]
    }

    fn check_plane(&self) -> usize {
        self.check_plane
    }

    fn set_check_plane(&mut self, plane: usize) {
        self.check_plane = plane;
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_camera_new_defaults() {
    let camera = Camera::new(800, 600);

    assert_eq!(camera.location(), DVec3::ZERO);
    assert_eq!(camera.left(), DVec3::NEG_X);
    assert_eq!(camera.up(), DVec3::Y);
    assert_eq!(camera.direction(), DVec3::NEG_Z);
    assert_eq!(camera.frustum_near(), 1.0);
    assert_eq!(camera.frustum_far(), 2.0);
    assert_eq!(camera.frustum_left(), -0.5);
    assert_eq!(camera.frustum_right(), 0.5);
    assert_eq!(camera.frustum_top(), 0.5);
    assert_eq!(camera.frustum_bottom(), -0.5);
    assert_eq!(camera.projection_mode(), ProjectionMode::Perspective);
    assert_eq!(camera.fov_y(), None);
    assert_eq!(camera.viewport_rect(), ViewportRect { x: 0, y: 0, width: 800, height: 600 });
    assert_eq!(camera.depth_range_near(), 0.0);
    assert_eq!(camera.depth_range_far(), 1.0);
    assert_eq!(camera.plane_quantity(), FRUSTUM_PLANES);
    assert_eq!(camera.dirty_flags(), CameraDirty::all());
}

#[test]
fn test_default_model_view_is_identity() {
    let camera = Camera::new(800, 600);
    assert!(camera.model_view_matrix().abs_diff_eq(DMat4::IDENTITY, EPSILON));
}

// ============================================================================
// Apply
// ============================================================================

#[test]
fn test_apply_pushes_all_aspects_in_order() {
    let (mut context, log) = create_test_context();
    let mut camera = Camera::new(800, 600);

    camera.apply(&mut context);

    let calls = mock_backend::drain(&log);
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0], BackendCall::DepthRange(0.0, 1.0));
    assert_eq!(calls[1], BackendCall::Projection(camera.projection_matrix()));
    assert_eq!(calls[2], BackendCall::Viewport(ViewportRect { x: 0, y: 0, width: 800, height: 600 }));
    assert_eq!(calls[3], BackendCall::ModelView(camera.model_view_matrix()));
    assert!(camera.dirty_flags().is_empty());
}

#[test]
fn test_apply_is_idempotent() {
    let (mut context, log) = create_test_context();
    let mut camera = create_applied_camera(&mut context, &log);

    camera.apply(&mut context);

    assert!(mock_backend::drain(&log).is_empty());
}

#[test]
fn test_location_change_only_pushes_model_view() {
    let (mut context, log) = create_test_context();
    let mut camera = create_applied_camera(&mut context, &log);

    camera.set_location(DVec3::new(1.0, 2.0, 3.0));
    assert_eq!(camera.dirty_flags(), CameraDirty::FRAME);
    camera.apply(&mut context);

    let calls = mock_backend::drain(&log);
    assert_eq!(calls, vec![BackendCall::ModelView(camera.model_view_matrix())]);
}

#[test]
fn test_frustum_change_only_pushes_projection() {
    let (mut context, log) = create_test_context();
    let mut camera = create_applied_camera(&mut context, &log);

    camera.set_frustum_far(500.0);
    assert_eq!(camera.dirty_flags(), CameraDirty::FRUSTUM);
    camera.apply(&mut context);

    let calls = mock_backend::drain(&log);
    assert_eq!(calls, vec![BackendCall::Projection(camera.projection_matrix())]);
}

#[test]
fn test_resize_only_pushes_viewport() {
    let (mut context, log) = create_test_context();
    let mut camera = create_applied_camera(&mut context, &log);

    camera.resize(1024, 768);
    camera.apply(&mut context);

    let calls = mock_backend::drain(&log);
    assert_eq!(calls, vec![BackendCall::Viewport(ViewportRect { x: 0, y: 0, width: 1024, height: 768 })]);
}

#[test]
fn test_depth_range_change_only_pushes_depth_range() {
    let (mut context, log) = create_test_context();
    let mut camera = create_applied_camera(&mut context, &log);

    camera.set_depth_range(0.25, 0.75);
    camera.apply(&mut context);

    assert_eq!(mock_backend::drain(&log), vec![BackendCall::DepthRange(0.25, 0.75)]);
}

#[test]
fn test_update_marks_everything_dirty() {
    let (mut context, log) = create_test_context();
    let mut camera = create_applied_camera(&mut context, &log);

    camera.update();

    assert_eq!(camera.dirty_flags(), CameraDirty::all());
    camera.apply(&mut context);
    assert_eq!(mock_backend::drain(&log).len(), 4);
}

// ============================================================================
// Viewport
// ============================================================================

#[test]
fn test_viewport_rect_from_fractions() {
    let mut camera = Camera::new(800, 600);
    camera.set_viewport(0.25, 0.75, 0.125, 0.875);

    assert_eq!(camera.viewport_rect(), ViewportRect { x: 200, y: 75, width: 400, height: 450 });
}

#[test]
fn test_viewport_rect_truncates() {
    let mut camera = Camera::new(101, 101);
    camera.set_viewport_left(0.5);

    let rect = camera.viewport_rect();
    assert_eq!(rect.x, 50);
    assert_eq!(rect.width, 50);
}

// ============================================================================
// Matrices
// ============================================================================

#[test]
fn test_perspective_projection_from_fov() {
    let mut camera = Camera::new(800, 800);
    camera.set_frustum_perspective(60.0, 1.0, 1.0, 100.0);

    let expected = 1.0 / 30.0_f64.to_radians().tan();
    assert!((camera.projection_matrix().x_axis.x - expected).abs() < EPSILON);
    assert_eq!(camera.fov_y(), Some(60.0));
}

#[test]
fn test_parallel_projection_scale() {
    let mut camera = Camera::new(800, 800);
    camera.set_frustum_perspective(60.0, 1.0, 1.0, 100.0);
    camera.set_parallel_projection(true);

    let expected = 2.0 / (camera.frustum_right() - camera.frustum_left());
    assert_eq!(camera.projection_mode(), ProjectionMode::Parallel);
    assert!((camera.projection_matrix().x_axis.x - expected).abs() < EPSILON);
}

#[test]
fn test_non_finite_aspect_is_ignored() {
    let (mut context, log) = create_test_context();
    let mut camera = create_applied_camera(&mut context, &log);

    camera.set_frustum_perspective(60.0, f64::NAN, 1.0, 100.0);
    camera.set_frustum_perspective(60.0, f64::INFINITY, 1.0, 100.0);

    assert_eq!(camera.frustum_far(), 2.0);
    assert_eq!(camera.frustum_right(), 0.5);
    assert_eq!(camera.fov_y(), None);
    assert!(camera.dirty_flags().is_empty());
}

#[test]
fn test_frustum_change_keeps_model_view_cache() {
    let mut camera = Camera::new(800, 600);
    camera.model_view_matrix();

    camera.set_frustum_near(0.5);

    assert!(camera.model_view.get().is_some());
    assert!(camera.projection.get().is_none());
    assert!(camera.model_view_projection.get().is_none());
}

#[test]
fn test_frame_change_clears_model_view_cache() {
    let mut camera = Camera::new(800, 600);
    camera.projection_matrix();
    camera.model_view_projection_inverse_matrix();

    camera.set_location(DVec3::X);

    assert!(camera.projection.get().is_some());
    assert!(camera.model_view.get().is_none());
    assert!(camera.model_view_projection_inverse.get().is_none());
}

#[test]
fn test_combined_and_inverse() {
    let mut camera = Camera::new(800, 600);
    camera.set_frame(
        DVec3::new(3.0, -1.0, 7.0),
        DVec3::NEG_X,
        DVec3::Y,
        DVec3::NEG_Z,
    );

    let combined = camera.model_view_projection_matrix();
    assert_eq!(combined, camera.projection_matrix() * camera.model_view_matrix());
    let product = combined * camera.model_view_projection_inverse_matrix();
    assert!(product.abs_diff_eq(DMat4::IDENTITY, 1e-6));
}

#[test]
fn test_model_view_translation() {
    let mut camera = Camera::new(800, 600);
    camera.set_location(DVec3::new(0.0, 0.0, 5.0));

    let eye = camera.model_view_matrix().transform_point3(DVec3::ZERO);
    assert!(eye.abs_diff_eq(DVec3::new(0.0, 0.0, -5.0), EPSILON));
}

// ============================================================================
// Frame
// ============================================================================

#[test]
fn test_look_at() {
    let mut camera = Camera::new(800, 600);
    camera.set_location(DVec3::new(0.0, 0.0, 10.0));
    camera.look_at(DVec3::ZERO, DVec3::Y);

    assert!(camera.direction().abs_diff_eq(DVec3::NEG_Z, EPSILON));
    assert!(camera.left().abs_diff_eq(DVec3::NEG_X, EPSILON));
    assert!(camera.up().abs_diff_eq(DVec3::Y, EPSILON));
}

#[test]
fn test_look_at_parallel_to_up() {
    let mut camera = Camera::new(800, 600);
    camera.set_location(DVec3::new(0.0, 10.0, 0.0));
    camera.look_at(DVec3::ZERO, DVec3::Y);

    assert!(camera.direction().abs_diff_eq(DVec3::NEG_Y, EPSILON));
    assert!((camera.left().length() - 1.0).abs() < EPSILON);
    assert!(camera.left().dot(camera.direction()).abs() < EPSILON);
}

#[test]
fn test_set_axes_from_matrix() {
    let mut camera = Camera::new(800, 600);
    let axes = DMat3::from_cols(DVec3::Z, DVec3::Y, DVec3::NEG_X);

    camera.set_axes_from_matrix(&axes);

    assert_eq!(camera.left(), DVec3::Z);
    assert_eq!(camera.up(), DVec3::Y);
    assert_eq!(camera.direction(), DVec3::NEG_X);
    assert!(camera.dirty_flags().contains(CameraDirty::FRAME));
}

#[test]
fn test_normalize() {
    let mut camera = Camera::new(800, 600);
    camera.set_axes(DVec3::NEG_X * 3.0, DVec3::Y * 0.5, DVec3::NEG_Z * 2.0);

    camera.normalize();

    assert!(camera.left().abs_diff_eq(DVec3::NEG_X, EPSILON));
    assert!(camera.up().abs_diff_eq(DVec3::Y, EPSILON));
    assert!(camera.direction().abs_diff_eq(DVec3::NEG_Z, EPSILON));
}

// ============================================================================
// World planes
// ============================================================================

/// Point that lies outside exactly one plane of the default frustum
fn outside_point(plane: usize) -> DVec3 {
    match plane {
        PLANE_LEFT => DVec3::new(-10.0, 0.0, -1.5),
        PLANE_RIGHT => DVec3::new(10.0, 0.0, -1.5),
        PLANE_BOTTOM => DVec3::new(0.0, -10.0, -1.5),
        PLANE_TOP => DVec3::new(0.0, 10.0, -1.5),
        PLANE_FAR => DVec3::new(0.0, 0.0, -3.0),
        PLANE_NEAR => DVec3::new(0.0, 0.0, -0.5),
        _ => unreachable!(),
    }
}

fn assert_plane_order(camera: &Camera) {
    for plane in 0..FRUSTUM_PLANES {
        let point = outside_point(plane);
        for index in 0..FRUSTUM_PLANES {
            let side = camera.world_plane(index).unwrap().which_side(point);
            if index == plane {
                assert_eq!(side, Negative, "point {:?} should be outside plane {}", point, index);
            } else {
                assert_eq!(side, Positive, "point {:?} should be inside plane {}", point, index);
            }
        }
    }
}

#[test]
fn test_perspective_plane_order() {
    let camera = Camera::new(800, 600);
    assert_plane_order(&camera);
}

#[test]
fn test_parallel_plane_order() {
    let mut camera = Camera::new(800, 600);
    camera.set_parallel_projection(true);
    assert_plane_order(&camera);
}

#[test]
fn test_planes_follow_frame() {
    let mut camera = Camera::new(800, 600);
    camera.set_location(DVec3::new(0.0, 0.0, 10.0));

    let inside = DVec3::new(0.0, 0.0, 8.5);
    for plane in camera.world_planes() {
        assert_eq!(plane.which_side(inside), Positive);
    }
    assert_eq!(camera.world_plane(PLANE_NEAR).unwrap().which_side(DVec3::new(0.0, 0.0, 9.5)), Negative);
}

#[test]
fn test_push_clip_plane_limit() {
    let mut camera = Camera::new(800, 600);

    for expected in FRUSTUM_PLANES..MAX_WORLD_PLANES {
        assert_eq!(camera.push_clip_plane(Plane::XZ), Ok(expected));
    }
    assert!(matches!(camera.push_clip_plane(Plane::XZ), Err(Error::InvalidArgument(_))));

    camera.clear_clip_planes();
    assert_eq!(camera.plane_quantity(), FRUSTUM_PLANES);
}

#[test]
fn test_clip_planes_survive_frame_change() {
    let mut camera = Camera::new(800, 600);
    let clip = Plane::new(DVec3::X, 0.0);
    camera.push_clip_plane(clip).unwrap();

    camera.set_location(DVec3::new(4.0, 4.0, 4.0));

    assert_eq!(camera.world_plane(FRUSTUM_PLANES), Some(&clip));
}

// ============================================================================
// Culling
// ============================================================================

#[test]
fn test_contains_none_is_inside() {
    let camera = Camera::new(800, 600);
    let mut state = PlaneState::empty();
    assert_eq!(camera.contains(None, &mut state), FrustumIntersect::Inside);
}

#[test]
fn test_contains_short_circuits_on_check_plane() {
    let camera = Camera::new(800, 600);
    let mut bound = CountingBound::new(&camera, vec![Negative, Positive, Positive, Positive, Positive, Positive]);
    let mut state = PlaneState::empty();

    let result = camera.contains(Some(&mut bound), &mut state);

    assert_eq!(result, FrustumIntersect::Outside);
    assert_eq!(bound.tested(), vec![0]);
    assert_eq!(bound.check_plane, 0);
}

#[test]
fn test_contains_memoizes_culling_plane() {
    let camera = Camera::new(800, 600);
    let mut bound = CountingBound::new(&camera, vec![Positive, Positive, Positive, Positive, Negative, Positive]);

    let mut state = PlaneState::empty();
    assert_eq!(camera.contains(Some(&mut bound), &mut state), FrustumIntersect::Outside);
    assert_eq!(bound.tested(), vec![0, 5, 4]);
    assert_eq!(bound.check_plane, PLANE_FAR);

    bound.tested.borrow_mut().clear();
    let mut state = PlaneState::empty();
    assert_eq!(camera.contains(Some(&mut bound), &mut state), FrustumIntersect::Outside);
    assert_eq!(bound.tested(), vec![PLANE_FAR]);
}

#[test]
fn test_contains_intersects_keeps_testing() {
    let camera = Camera::new(800, 600);
    let mut bound = CountingBound::new(&camera, vec![Positive, Positive, Neither, Positive, Positive, Positive]);
    let mut state = PlaneState::empty();

    assert_eq!(camera.contains(Some(&mut bound), &mut state), FrustumIntersect::Intersects);
    assert_eq!(bound.tested(), vec![0, 5, 4, 3, 2, 1]);
    assert_eq!(state, PlaneState::all() - PlaneState::BOTTOM);
}

#[test]
fn test_contains_later_outside_wins() {
    let camera = Camera::new(800, 600);
    let mut bound = CountingBound::new(&camera, vec![Positive, Positive, Positive, Negative, Positive, Neither]);
    let mut state = PlaneState::empty();

    assert_eq!(camera.contains(Some(&mut bound), &mut state), FrustumIntersect::Outside);
    assert_eq!(bound.tested(), vec![0, 5, 4, 3]);
    assert_eq!(bound.check_plane, PLANE_TOP);
}

#[test]
fn test_plane_state_propagates_to_children() {
    let camera = Camera::new(800, 600);
    let sides = vec![Positive, Positive, Positive, Positive, Neither, Neither];

    let mut parent = CountingBound::new(&camera, sides.clone());
    let mut state = PlaneState::empty();
    assert_eq!(camera.contains(Some(&mut parent), &mut state), FrustumIntersect::Intersects);
    assert_eq!(state, PlaneState::LEFT | PlaneState::RIGHT | PlaneState::BOTTOM | PlaneState::TOP);

    // Each child starts from the parent's state
    for _ in 0..2 {
        let mut child_state = state;
        let mut child = CountingBound::new(&camera, sides.clone());
        assert_eq!(camera.contains(Some(&mut child), &mut child_state), FrustumIntersect::Intersects);
        assert_eq!(child.tested(), vec![5, 4]);
    }
}

#[test]
fn test_contains_spheres() {
    let camera = Camera::new(800, 600);

    let mut inside = BoundingSphere::new(DVec3::new(0.0, 0.0, -1.5), 0.1);
    let mut straddling = BoundingSphere::new(DVec3::new(0.0, 0.0, -2.0), 0.1);
    let mut behind = BoundingSphere::new(DVec3::new(0.0, 0.0, 5.0), 1.0);

    assert_eq!(camera.contains(Some(&mut inside), &mut PlaneState::empty()), FrustumIntersect::Inside);
    assert_eq!(camera.contains(Some(&mut straddling), &mut PlaneState::empty()), FrustumIntersect::Intersects);
    assert_eq!(camera.contains(Some(&mut behind), &mut PlaneState::empty()), FrustumIntersect::Outside);
    // Behind the eye is also outside the side planes; the first one tested wins
    assert_eq!(behind.check_plane(), PLANE_LEFT);
}

#[test]
fn test_contains_with_clip_plane() {
    let mut camera = Camera::new(800, 600);
    let mut sphere = BoundingSphere::new(DVec3::new(-0.2, 0.0, -1.5), 0.05);
    assert_eq!(camera.contains(Some(&mut sphere), &mut PlaneState::empty()), FrustumIntersect::Inside);

    camera.push_clip_plane(Plane::new(DVec3::X, 0.0)).unwrap();
    assert_eq!(camera.contains(Some(&mut sphere), &mut PlaneState::empty()), FrustumIntersect::Outside);
    assert_eq!(sphere.check_plane(), FRUSTUM_PLANES);

    // The memo now points past the remaining planes
    camera.clear_clip_planes();
    assert_eq!(camera.contains(Some(&mut sphere), &mut PlaneState::empty()), FrustumIntersect::Inside);
}

// ============================================================================
// Coordinate conversions
// ============================================================================

#[test]
fn test_screen_coordinates_center() {
    let camera = Camera::new(800, 600);
    let screen = camera.screen_coordinates(DVec3::new(0.0, 0.0, -1.5));

    assert!((screen.x - 400.0).abs() < 1e-6);
    assert!((screen.y - 300.0).abs() < 1e-6);
    assert!(screen.z > 0.0 && screen.z < 1.0);
}

#[test]
fn test_screen_world_round_trip() {
    let mut camera = Camera::new(800, 600);
    camera.set_frustum_perspective(45.0, 800.0 / 600.0, 1.0, 100.0);
    camera.set_location(DVec3::new(2.0, 1.0, 10.0));

    let world = DVec3::new(1.0, 2.0, -5.0);
    let screen = camera.screen_coordinates(world);
    let back = camera.world_coordinates(DVec2::new(screen.x, screen.y), screen.z);

    assert!(back.abs_diff_eq(world, 1e-6));
}

#[test]
fn test_pick_ray_through_center() {
    let camera = Camera::new(800, 600);
    let ray = camera.pick_ray(DVec2::new(400.0, 300.0), false);

    assert!(ray.direction.abs_diff_eq(DVec3::NEG_Z, 1e-9));
    assert!((ray.origin.z + 1.0).abs() < 1e-9);

    let flipped = camera.pick_ray(DVec2::new(400.0, 300.0), true);
    assert!(flipped.direction.abs_diff_eq(ray.direction, 1e-9));
}

// ============================================================================
// Copy & snapshot
// ============================================================================

fn create_custom_camera() -> Camera {
    let mut camera = Camera::new(1280, 720);
    camera.set_frustum_perspective(50.0, 1280.0 / 720.0, 0.5, 250.0);
    camera.set_frame(DVec3::new(1.0, 2.0, 3.0), DVec3::NEG_X, DVec3::Y, DVec3::NEG_Z);
    camera.set_viewport(0.0, 0.5, 0.25, 1.0);
    camera.set_depth_range(0.1, 0.9);
    camera.push_clip_plane(Plane::new(DVec3::Y, -4.0)).unwrap();
    camera
}

#[test]
fn test_snapshot_round_trip() {
    let camera = create_custom_camera();

    let snapshot = camera.snapshot();
    let mut rebuilt = Camera::from_snapshot(&snapshot);
    rebuilt.update();

    assert_eq!(rebuilt.snapshot(), snapshot);
    assert_eq!(rebuilt.model_view_matrix(), camera.model_view_matrix());
    assert_eq!(rebuilt.projection_matrix(), camera.projection_matrix());
    assert_eq!(rebuilt.model_view_projection_matrix(), camera.model_view_projection_matrix());
    assert_eq!(rebuilt.world_planes(), camera.world_planes());
    assert_eq!(rebuilt.viewport_rect(), camera.viewport_rect());
}

#[test]
fn test_set_from_is_independent() {
    let source = create_custom_camera();
    let mut culling = Camera::new(10, 10);

    culling.set_from(&source);
    let frozen = culling.model_view_matrix();

    let mut source = source;
    source.set_location(DVec3::new(50.0, 0.0, 0.0));

    assert_eq!(culling.model_view_matrix(), frozen);
    assert_ne!(source.model_view_matrix(), frozen);
    assert_eq!(culling.plane_quantity(), FRUSTUM_PLANES + 1);
    assert_eq!(culling.dirty_flags(), CameraDirty::all());
}
