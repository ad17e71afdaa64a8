//! Camera module: view/projection camera and frustum culling.
//!
//! The camera is owned by the caller. A render context only remembers
//! which camera is current (see `RenderContext::switch_camera_in`).

mod camera;
mod frustum;

use std::sync::Arc;
use parking_lot::Mutex;

pub use camera::{Camera, CameraDirty, CameraSnapshot, ProjectionMode, Ray3};
pub use frustum::{
    FrustumCoefficients, FrustumIntersect, Plane, PlaneSide, PlaneState,
    FRUSTUM_PLANES, MAX_WORLD_PLANES,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_FAR, PLANE_NEAR,
};

/// Camera shared between the scene and the contexts it is current in
pub type SharedCamera = Arc<Mutex<Camera>>;
