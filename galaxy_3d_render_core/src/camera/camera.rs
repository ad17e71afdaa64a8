/// Camera: view/projection model with lazily derived matrices and
/// world-space clipping planes.
///
/// The camera is described by a small orthonormal basis (location, left,
/// up, direction), six frustum extents, viewport fractions and a depth
/// range. Every mutator marks exactly the dirty aspects it affects; the
/// matrices are rebuilt on read and the dirty aspects are pushed to the
/// backend by `apply()`, the only place they become clean again.
///
/// Cameras are never shared between two logical viewpoints: a culling
/// camera frozen while the display camera keeps moving is a separate
/// instance filled with `set_from()`.

use std::cell::Cell;
use bitflags::bitflags;
use glam::{DMat3, DMat4, DVec2, DVec3, DVec4};
use crate::backend::ViewportRect;
use crate::bounds::BoundingVolume;
use crate::context::RenderContext;
use crate::error::Result;
use crate::{engine_bail, engine_trace, engine_warn};
use super::frustum::{
    FrustumCoefficients, FrustumIntersect, Plane, PlaneSide, PlaneState,
    FRUSTUM_PLANES, MAX_WORLD_PLANES,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_FAR, PLANE_NEAR,
};

bitflags! {
    /// Aspects of the camera not yet pushed to the backend.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CameraDirty: u8 {
        const FRUSTUM = 1 << 0;
        const VIEWPORT = 1 << 1;
        const FRAME = 1 << 2;
        const DEPTH_RANGE = 1 << 3;
    }
}

/// Projection model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectionMode {
    /// Off-center perspective projection built from the six extents
    #[default]
    Perspective,
    /// Orthographic projection
    Parallel,
}

/// A ray in world space (used for picking)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray3 {
    pub origin: DVec3,
    /// Unit direction
    pub direction: DVec3,
}

/// Full attribute set of a camera, for an external persistence layer.
///
/// Rebuilding a camera from a snapshot reproduces identical matrices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraSnapshot {
    pub width: u32,
    pub height: u32,
    pub location: DVec3,
    pub left: DVec3,
    pub up: DVec3,
    pub direction: DVec3,
    pub frustum_near: f64,
    pub frustum_far: f64,
    pub frustum_left: f64,
    pub frustum_right: f64,
    pub frustum_top: f64,
    pub frustum_bottom: f64,
    pub fov_y: Option<f64>,
    pub projection_mode: ProjectionMode,
    pub viewport_left: f64,
    pub viewport_right: f64,
    pub viewport_top: f64,
    pub viewport_bottom: f64,
    pub depth_range_near: f64,
    pub depth_range_far: f64,
    /// User clip planes beyond the six frustum planes
    pub clip_planes: Vec<Plane>,
}

/// View/projection camera with lazy matrices and frustum culling.
#[derive(Debug, Clone)]
pub struct Camera {
    // Frame
    location: DVec3,
    left: DVec3,
    up: DVec3,
    direction: DVec3,

    // Frustum
    frustum_near: f64,
    frustum_far: f64,
    frustum_left: f64,
    frustum_right: f64,
    frustum_top: f64,
    frustum_bottom: f64,
    fov_y: Option<f64>,
    projection_mode: ProjectionMode,
    coefficients: FrustumCoefficients,

    // Viewport (fractions of width/height)
    viewport_left: f64,
    viewport_right: f64,
    viewport_top: f64,
    viewport_bottom: f64,
    width: u32,
    height: u32,

    depth_range_near: f64,
    depth_range_far: f64,

    dirty: CameraDirty,

    /// Six frustum planes (fixed indices) followed by user clip planes
    world_planes: Vec<Plane>,

    // Lazily rebuilt matrices; `None` means stale
    model_view: Cell<Option<DMat4>>,
    projection: Cell<Option<DMat4>>,
    model_view_projection: Cell<Option<DMat4>>,
    model_view_projection_inverse: Cell<Option<DMat4>>,
}

fn cached(cell: &Cell<Option<DMat4>>, build: impl FnOnce() -> DMat4) -> DMat4 {
    if let Some(matrix) = cell.get() {
        return matrix;
    }
    let matrix = build();
    cell.set(Some(matrix));
    matrix
}

impl Camera {
    /// Create a camera for a `width` x `height` pixel surface.
    ///
    /// Defaults: location at the origin, left = -X, up = +Y, direction = -Z;
    /// frustum (near 1, far 2, left -0.5, right 0.5, top 0.5, bottom -0.5);
    /// full viewport; depth range (0, 1). Everything starts dirty.
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            location: DVec3::ZERO,
            left: DVec3::NEG_X,
            up: DVec3::Y,
            direction: DVec3::NEG_Z,
            frustum_near: 1.0,
            frustum_far: 2.0,
            frustum_left: -0.5,
            frustum_right: 0.5,
            frustum_top: 0.5,
            frustum_bottom: -0.5,
            fov_y: None,
            projection_mode: ProjectionMode::Perspective,
            coefficients: FrustumCoefficients::perspective(1.0, -0.5, 0.5, -0.5, 0.5),
            viewport_left: 0.0,
            viewport_right: 1.0,
            viewport_top: 1.0,
            viewport_bottom: 0.0,
            width,
            height,
            depth_range_near: 0.0,
            depth_range_far: 1.0,
            dirty: CameraDirty::empty(),
            world_planes: vec![Plane::default(); FRUSTUM_PLANES],
            model_view: Cell::new(None),
            projection: Cell::new(None),
            model_view_projection: Cell::new(None),
            model_view_projection_inverse: Cell::new(None),
        };
        camera.update();
        camera
    }

    /// Rebuild a camera from a persisted snapshot.
    pub fn from_snapshot(snapshot: &CameraSnapshot) -> Self {
        let mut camera = Self::new(snapshot.width, snapshot.height);
        camera.location = snapshot.location;
        camera.left = snapshot.left;
        camera.up = snapshot.up;
        camera.direction = snapshot.direction;
        camera.frustum_near = snapshot.frustum_near;
        camera.frustum_far = snapshot.frustum_far;
        camera.frustum_left = snapshot.frustum_left;
        camera.frustum_right = snapshot.frustum_right;
        camera.frustum_top = snapshot.frustum_top;
        camera.frustum_bottom = snapshot.frustum_bottom;
        camera.fov_y = snapshot.fov_y;
        camera.projection_mode = snapshot.projection_mode;
        camera.viewport_left = snapshot.viewport_left;
        camera.viewport_right = snapshot.viewport_right;
        camera.viewport_top = snapshot.viewport_top;
        camera.viewport_bottom = snapshot.viewport_bottom;
        camera.depth_range_near = snapshot.depth_range_near;
        camera.depth_range_far = snapshot.depth_range_far;
        camera.world_planes.truncate(FRUSTUM_PLANES);
        camera.world_planes.extend(
            snapshot.clip_planes.iter().copied().take(MAX_WORLD_PLANES - FRUSTUM_PLANES),
        );
        camera.update();
        camera
    }

    /// Capture every persisted attribute.
    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            width: self.width,
            height: self.height,
            location: self.location,
            left: self.left,
            up: self.up,
            direction: self.direction,
            frustum_near: self.frustum_near,
            frustum_far: self.frustum_far,
            frustum_left: self.frustum_left,
            frustum_right: self.frustum_right,
            frustum_top: self.frustum_top,
            frustum_bottom: self.frustum_bottom,
            fov_y: self.fov_y,
            projection_mode: self.projection_mode,
            viewport_left: self.viewport_left,
            viewport_right: self.viewport_right,
            viewport_top: self.viewport_top,
            viewport_bottom: self.viewport_bottom,
            depth_range_near: self.depth_range_near,
            depth_range_far: self.depth_range_far,
            clip_planes: self.world_planes[FRUSTUM_PLANES..].to_vec(),
        }
    }

    /// Deep copy of all state from `source`, then a full resync.
    pub fn set_from(&mut self, source: &Camera) {
        self.location = source.location;
        self.left = source.left;
        self.up = source.up;
        self.direction = source.direction;
        self.frustum_near = source.frustum_near;
        self.frustum_far = source.frustum_far;
        self.frustum_left = source.frustum_left;
        self.frustum_right = source.frustum_right;
        self.frustum_top = source.frustum_top;
        self.frustum_bottom = source.frustum_bottom;
        self.fov_y = source.fov_y;
        self.projection_mode = source.projection_mode;
        self.viewport_left = source.viewport_left;
        self.viewport_right = source.viewport_right;
        self.viewport_top = source.viewport_top;
        self.viewport_bottom = source.viewport_bottom;
        self.width = source.width;
        self.height = source.height;
        self.depth_range_near = source.depth_range_near;
        self.depth_range_far = source.depth_range_far;
        self.world_planes = source.world_planes.clone();
        self.update();
    }

    // ===== FRAME =====

    pub fn location(&self) -> DVec3 {
        self.location
    }

    pub fn left(&self) -> DVec3 {
        self.left
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    pub fn set_location(&mut self, location: DVec3) {
        self.location = location;
        self.on_frame_change();
    }

    /// Set the left axis. The caller keeps the basis orthonormal.
    pub fn set_left(&mut self, left: DVec3) {
        self.left = left;
        self.on_frame_change();
    }

    /// Set the up axis. The caller keeps the basis orthonormal.
    pub fn set_up(&mut self, up: DVec3) {
        self.up = up;
        self.on_frame_change();
    }

    /// Set the view direction. The caller keeps the basis orthonormal.
    pub fn set_direction(&mut self, direction: DVec3) {
        self.direction = direction;
        self.on_frame_change();
    }

    /// Set all three axes at once.
    pub fn set_axes(&mut self, left: DVec3, up: DVec3, direction: DVec3) {
        self.left = left;
        self.up = up;
        self.direction = direction;
        self.on_frame_change();
    }

    /// Set the axes from a rotation matrix (columns: left, up, direction).
    pub fn set_axes_from_matrix(&mut self, axes: &DMat3) {
        self.set_axes(axes.x_axis, axes.y_axis, axes.z_axis);
    }

    /// Set location and axes at once.
    pub fn set_frame(&mut self, location: DVec3, left: DVec3, up: DVec3, direction: DVec3) {
        self.location = location;
        self.left = left;
        self.up = up;
        self.direction = direction;
        self.on_frame_change();
    }

    /// Set location and axes from a rotation matrix (columns: left, up, direction).
    pub fn set_frame_from_matrix(&mut self, location: DVec3, axes: &DMat3) {
        self.set_frame(location, axes.x_axis, axes.y_axis, axes.z_axis);
    }

    /// Point the camera at `position`, keeping `world_up` as the up reference.
    ///
    /// When `world_up` is parallel to the new direction an arbitrary
    /// perpendicular left axis is picked.
    pub fn look_at(&mut self, position: DVec3, world_up: DVec3) {
        self.direction = (position - self.location).normalize_or_zero();
        self.left = world_up.cross(self.direction).normalize_or_zero();
        if self.left == DVec3::ZERO {
            let fallback = if self.direction.x != 0.0 {
                DVec3::new(self.direction.y, -self.direction.x, 0.0)
            } else {
                DVec3::new(0.0, self.direction.z, -self.direction.y)
            };
            self.left = fallback.normalize_or_zero();
        }
        self.up = self.direction.cross(self.left).normalize_or_zero();
        self.on_frame_change();
    }

    /// Re-normalize the three axes after manual edits.
    pub fn normalize(&mut self) {
        self.left = self.left.normalize_or_zero();
        self.up = self.up.normalize_or_zero();
        self.direction = self.direction.normalize_or_zero();
        self.on_frame_change();
    }

    // ===== FRUSTUM =====

    pub fn frustum_near(&self) -> f64 {
        self.frustum_near
    }

    pub fn frustum_far(&self) -> f64 {
        self.frustum_far
    }

    pub fn frustum_left(&self) -> f64 {
        self.frustum_left
    }

    pub fn frustum_right(&self) -> f64 {
        self.frustum_right
    }

    pub fn frustum_top(&self) -> f64 {
        self.frustum_top
    }

    pub fn frustum_bottom(&self) -> f64 {
        self.frustum_bottom
    }

    /// Vertical field of view in degrees, as last given to
    /// `set_frustum_perspective`. Informational only.
    pub fn fov_y(&self) -> Option<f64> {
        self.fov_y
    }

    /// Set all six frustum extents.
    pub fn set_frustum(&mut self, near: f64, far: f64, left: f64, right: f64, top: f64, bottom: f64) {
        self.frustum_near = near;
        self.frustum_far = far;
        self.frustum_left = left;
        self.frustum_right = right;
        self.frustum_top = top;
        self.frustum_bottom = bottom;
        self.on_frustum_change();
    }

    pub fn set_frustum_near(&mut self, near: f64) {
        self.frustum_near = near;
        self.on_frustum_change();
    }

    pub fn set_frustum_far(&mut self, far: f64) {
        self.frustum_far = far;
        self.on_frustum_change();
    }

    pub fn set_frustum_left(&mut self, left: f64) {
        self.frustum_left = left;
        self.on_frustum_change();
    }

    pub fn set_frustum_right(&mut self, right: f64) {
        self.frustum_right = right;
        self.on_frustum_change();
    }

    pub fn set_frustum_top(&mut self, top: f64) {
        self.frustum_top = top;
        self.on_frustum_change();
    }

    pub fn set_frustum_bottom(&mut self, bottom: f64) {
        self.frustum_bottom = bottom;
        self.on_frustum_change();
    }

    /// Symmetric perspective frustum from a vertical field of view (degrees).
    ///
    /// A non-finite aspect ratio is logged and ignored; the frustum is left
    /// unchanged so the frame loop keeps running.
    pub fn set_frustum_perspective(&mut self, fov_y: f64, aspect: f64, near: f64, far: f64) {
        if !aspect.is_finite() {
            engine_warn!("galaxy3d::Camera",
                "Invalid aspect ratio {} given to set_frustum_perspective, frustum unchanged", aspect);
            return;
        }

        let half_height = (fov_y.to_radians() * 0.5).tan() * near;
        let half_width = half_height * aspect;
        self.frustum_left = -half_width;
        self.frustum_right = half_width;
        self.frustum_bottom = -half_height;
        self.frustum_top = half_height;
        self.frustum_near = near;
        self.frustum_far = far;
        self.fov_y = Some(fov_y);
        self.on_frustum_change();
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection_mode
    }

    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.projection_mode = mode;
        self.on_frustum_change();
    }

    /// Switch between parallel and perspective projection.
    pub fn set_parallel_projection(&mut self, parallel: bool) {
        let mode = if parallel { ProjectionMode::Parallel } else { ProjectionMode::Perspective };
        self.set_projection_mode(mode);
    }

    // ===== VIEWPORT =====

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport_left(&self) -> f64 {
        self.viewport_left
    }

    pub fn viewport_right(&self) -> f64 {
        self.viewport_right
    }

    pub fn viewport_top(&self) -> f64 {
        self.viewport_top
    }

    pub fn viewport_bottom(&self) -> f64 {
        self.viewport_bottom
    }

    /// Set the viewport fractions, each in [0, 1] of the surface size.
    pub fn set_viewport(&mut self, left: f64, right: f64, bottom: f64, top: f64) {
        self.viewport_left = left;
        self.viewport_right = right;
        self.viewport_bottom = bottom;
        self.viewport_top = top;
        self.on_viewport_change();
    }

    pub fn set_viewport_left(&mut self, left: f64) {
        self.viewport_left = left;
        self.on_viewport_change();
    }

    pub fn set_viewport_right(&mut self, right: f64) {
        self.viewport_right = right;
        self.on_viewport_change();
    }

    pub fn set_viewport_top(&mut self, top: f64) {
        self.viewport_top = top;
        self.on_viewport_change();
    }

    pub fn set_viewport_bottom(&mut self, bottom: f64) {
        self.viewport_bottom = bottom;
        self.on_viewport_change();
    }

    /// Resize the underlying surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.on_viewport_change();
    }

    /// Viewport rectangle in pixels, truncated toward zero.
    pub fn viewport_rect(&self) -> ViewportRect {
        let width = f64::from(self.width);
        let height = f64::from(self.height);
        ViewportRect {
            x: (self.viewport_left * width) as i32,
            y: (self.viewport_bottom * height) as i32,
            width: ((self.viewport_right - self.viewport_left) * width) as i32,
            height: ((self.viewport_top - self.viewport_bottom) * height) as i32,
        }
    }

    // ===== DEPTH RANGE =====

    pub fn depth_range_near(&self) -> f64 {
        self.depth_range_near
    }

    pub fn depth_range_far(&self) -> f64 {
        self.depth_range_far
    }

    /// Set the depth range, both in [0, 1].
    pub fn set_depth_range(&mut self, near: f64, far: f64) {
        self.depth_range_near = near;
        self.depth_range_far = far;
        self.dirty.insert(CameraDirty::DEPTH_RANGE);
    }

    pub fn set_depth_range_near(&mut self, near: f64) {
        self.depth_range_near = near;
        self.dirty.insert(CameraDirty::DEPTH_RANGE);
    }

    pub fn set_depth_range_far(&mut self, far: f64) {
        self.depth_range_far = far;
        self.dirty.insert(CameraDirty::DEPTH_RANGE);
    }

    // ===== DIRTY TRACKING =====

    /// Aspects waiting to be pushed by `apply()`.
    pub fn dirty_flags(&self) -> CameraDirty {
        self.dirty
    }

    /// Force a full resync: recompute everything and mark every aspect dirty.
    ///
    /// Used when the camera is adopted by another context.
    pub fn update(&mut self) {
        self.on_frustum_change();
        self.on_viewport_change();
        self.on_frame_change();
        self.dirty.insert(CameraDirty::DEPTH_RANGE);
    }

    /// Recompute the side-plane coefficients after a frustum or projection change.
    fn on_frustum_change(&mut self) {
        self.coefficients = match self.projection_mode {
            ProjectionMode::Perspective => FrustumCoefficients::perspective(
                self.frustum_near,
                self.frustum_left,
                self.frustum_right,
                self.frustum_bottom,
                self.frustum_top,
            ),
            ProjectionMode::Parallel => FrustumCoefficients::parallel(
                self.frustum_left,
                self.frustum_right,
                self.frustum_bottom,
                self.frustum_top,
            ),
        };

        self.projection.set(None);
        self.model_view_projection.set(None);
        self.model_view_projection_inverse.set(None);
        self.dirty.insert(CameraDirty::FRUSTUM);

        self.rebuild_frustum_planes();
    }

    fn on_viewport_change(&mut self) {
        self.dirty.insert(CameraDirty::VIEWPORT);
    }

    /// Recompute the world planes after the frame moved.
    fn on_frame_change(&mut self) {
        self.rebuild_frustum_planes();

        self.model_view.set(None);
        self.model_view_projection.set(None);
        self.model_view_projection_inverse.set(None);
        self.dirty.insert(CameraDirty::FRAME);
    }

    /// Rebuild the six base planes from the basis and cached coefficients.
    /// User clip planes are world-space and left untouched.
    fn rebuild_frustum_planes(&mut self) {
        let coeff = &self.coefficients;
        let side_plane = |axis: DVec3, c: [f64; 2], offset: f64, location: DVec3, direction: DVec3| {
            let normal = axis * c[0] + direction * c[1];
            Plane::new(normal, location.dot(normal) + offset)
        };

        let location = self.location;
        let direction = self.direction;
        self.world_planes[PLANE_LEFT] =
            side_plane(self.left, coeff.left, coeff.offsets[0], location, direction);
        self.world_planes[PLANE_RIGHT] =
            side_plane(self.left, coeff.right, coeff.offsets[1], location, direction);
        self.world_planes[PLANE_BOTTOM] =
            side_plane(self.up, coeff.bottom, coeff.offsets[2], location, direction);
        self.world_planes[PLANE_TOP] =
            side_plane(self.up, coeff.top, coeff.offsets[3], location, direction);

        let direction_dot_location = direction.dot(location);
        self.world_planes[PLANE_FAR] =
            Plane::new(-direction, -(direction_dot_location + self.frustum_far));
        self.world_planes[PLANE_NEAR] =
            Plane::new(direction, direction_dot_location + self.frustum_near);
    }

    // ===== MATRICES =====

    /// World → eye matrix.
    pub fn model_view_matrix(&self) -> DMat4 {
        cached(&self.model_view, || {
            let right = -self.left;
            let back = -self.direction;
            DMat4::from_cols(
                DVec4::new(right.x, self.up.x, back.x, 0.0),
                DVec4::new(right.y, self.up.y, back.y, 0.0),
                DVec4::new(right.z, self.up.z, back.z, 0.0),
                DVec4::new(
                    -right.dot(self.location),
                    -self.up.dot(self.location),
                    -back.dot(self.location),
                    1.0,
                ),
            )
        })
    }

    /// Eye → clip matrix (OpenGL clip conventions).
    pub fn projection_matrix(&self) -> DMat4 {
        cached(&self.projection, || {
            let (l, r) = (self.frustum_left, self.frustum_right);
            let (b, t) = (self.frustum_bottom, self.frustum_top);
            let (n, f) = (self.frustum_near, self.frustum_far);
            match self.projection_mode {
                ProjectionMode::Parallel => DMat4::from_cols(
                    DVec4::new(2.0 / (r - l), 0.0, 0.0, 0.0),
                    DVec4::new(0.0, 2.0 / (t - b), 0.0, 0.0),
                    DVec4::new(0.0, 0.0, -2.0 / (f - n), 0.0),
                    DVec4::new(-(r + l) / (r - l), -(t + b) / (t - b), -(f + n) / (f - n), 1.0),
                ),
                ProjectionMode::Perspective => DMat4::from_cols(
                    DVec4::new(2.0 * n / (r - l), 0.0, 0.0, 0.0),
                    DVec4::new(0.0, 2.0 * n / (t - b), 0.0, 0.0),
                    DVec4::new((r + l) / (r - l), (t + b) / (t - b), -(f + n) / (f - n), -1.0),
                    DVec4::new(0.0, 0.0, -2.0 * f * n / (f - n), 0.0),
                ),
            }
        })
    }

    /// projection × model-view
    pub fn model_view_projection_matrix(&self) -> DMat4 {
        cached(&self.model_view_projection, || {
            self.projection_matrix() * self.model_view_matrix()
        })
    }

    /// Inverse of `model_view_projection_matrix()`.
    pub fn model_view_projection_inverse_matrix(&self) -> DMat4 {
        cached(&self.model_view_projection_inverse, || {
            self.model_view_projection_matrix().inverse()
        })
    }

    // ===== WORLD PLANES =====

    /// Number of active world planes (6 + user clip planes).
    pub fn plane_quantity(&self) -> usize {
        self.world_planes.len()
    }

    pub fn world_plane(&self, index: usize) -> Option<&Plane> {
        self.world_planes.get(index)
    }

    pub fn world_planes(&self) -> &[Plane] {
        &self.world_planes
    }

    /// Add a world-space clip plane tested after the frustum planes.
    ///
    /// Returns its plane index.
    pub fn push_clip_plane(&mut self, plane: Plane) -> Result<usize> {
        if self.world_planes.len() >= MAX_WORLD_PLANES {
            engine_bail!("galaxy3d::Camera",
                "Cannot add clip plane: {} world planes is the maximum", MAX_WORLD_PLANES);
        }
        self.world_planes.push(plane);
        Ok(self.world_planes.len() - 1)
    }

    /// Remove all user clip planes.
    pub fn clear_clip_planes(&mut self) {
        self.world_planes.truncate(FRUSTUM_PLANES);
    }

    // ===== CULLING =====

    /// Classify a bound against the world planes.
    ///
    /// `None` is never culled. The bound's memoized check plane is tested
    /// first (loop counter at the sentinel value `plane_quantity()`), then
    /// the remaining planes in descending index order, skipping the
    /// memoized one and every plane already marked in `plane_state`.
    ///
    /// - wholly outside a plane → memoize it on the bound, return `Outside` at once
    /// - wholly inside → mark the plane in `plane_state` for children
    /// - straddling → `Intersects`, but keep testing (a later `Outside` wins)
    ///
    /// The caller owns `plane_state` and restores it between siblings.
    pub fn contains(
        &self,
        bound: Option<&mut dyn BoundingVolume>,
        plane_state: &mut PlaneState,
    ) -> FrustumIntersect {
        let bound = match bound {
            Some(bound) => bound,
            None => return FrustumIntersect::Inside,
        };

        let quantity = self.world_planes.len();
        let mut check_plane = bound.check_plane();
        if check_plane >= quantity {
            // Memo from a camera with more clip planes
            check_plane = 0;
        }

        let mut result = FrustumIntersect::Inside;
        for counter in (0..=quantity).rev() {
            if counter == check_plane {
                continue; // already tested on the first pass
            }
            let plane_id = if counter == quantity { check_plane } else { counter };

            if plane_state.is_satisfied(plane_id) {
                continue;
            }

            match bound.which_side(&self.world_planes[plane_id]) {
                PlaneSide::Negative => {
                    bound.set_check_plane(plane_id);
                    return FrustumIntersect::Outside;
                }
                PlaneSide::Positive => plane_state.mark_satisfied(plane_id),
                PlaneSide::Neither => result = FrustumIntersect::Intersects,
            }
        }

        result
    }

    // ===== APPLY =====

    /// Push the dirty aspects to the context's backend and mark them clean.
    ///
    /// Order: depth range, projection, viewport, model-view. Calling twice
    /// without a mutation in between issues no backend call the second time.
    pub fn apply(&mut self, context: &mut RenderContext) {
        if self.dirty.is_empty() {
            return;
        }
        engine_trace!("galaxy3d::Camera", "Applying dirty aspects {:?}", self.dirty);

        let backend = context.backend_mut();

        if self.dirty.contains(CameraDirty::DEPTH_RANGE) {
            backend.set_depth_range(self.depth_range_near, self.depth_range_far);
            self.dirty.remove(CameraDirty::DEPTH_RANGE);
        }

        if self.dirty.contains(CameraDirty::FRUSTUM) {
            backend.set_projection_matrix(&self.projection_matrix());
            self.dirty.remove(CameraDirty::FRUSTUM);
        }

        if self.dirty.contains(CameraDirty::VIEWPORT) {
            backend.set_viewport(self.viewport_rect());
            self.dirty.remove(CameraDirty::VIEWPORT);
        }

        if self.dirty.contains(CameraDirty::FRAME) {
            backend.set_model_view_matrix(&self.model_view_matrix());
            self.dirty.remove(CameraDirty::FRAME);
        }
    }

    // ===== COORDINATE CONVERSIONS =====

    /// World position → normalized device coordinates ([-1, 1] cube).
    pub fn normalized_device_coordinates(&self, world: DVec3) -> DVec3 {
        let clip = self.model_view_projection_matrix() * world.extend(1.0);
        clip.truncate() / clip.w
    }

    /// World position → screen pixels; z is the depth in [0, 1].
    pub fn screen_coordinates(&self, world: DVec3) -> DVec3 {
        let ndc = self.normalized_device_coordinates(world);
        let width = f64::from(self.width);
        let height = f64::from(self.height);
        DVec3::new(
            ((ndc.x + 1.0) * (self.viewport_right - self.viewport_left) / 2.0 + self.viewport_left) * width,
            ((ndc.y + 1.0) * (self.viewport_top - self.viewport_bottom) / 2.0 + self.viewport_bottom) * height,
            (ndc.z + 1.0) / 2.0,
        )
    }

    /// Screen pixels plus depth in [0, 1] → world position.
    pub fn world_coordinates(&self, screen: DVec2, z_depth: f64) -> DVec3 {
        let width = f64::from(self.width);
        let height = f64::from(self.height);
        let ndc = DVec4::new(
            (screen.x / width - self.viewport_left) / (self.viewport_right - self.viewport_left) * 2.0 - 1.0,
            (screen.y / height - self.viewport_bottom) / (self.viewport_top - self.viewport_bottom) * 2.0 - 1.0,
            z_depth * 2.0 - 1.0,
            1.0,
        );
        let world = self.model_view_projection_inverse_matrix() * ndc;
        world.truncate() / world.w
    }

    /// Ray from the near plane through the given screen position.
    ///
    /// With `flip_vertical`, `screen.y` is measured from the top edge.
    pub fn pick_ray(&self, screen: DVec2, flip_vertical: bool) -> Ray3 {
        let screen = if flip_vertical {
            DVec2::new(screen.x, f64::from(self.height) - screen.y)
        } else {
            screen
        };
        let near = self.world_coordinates(screen, 0.0);
        let far = self.world_coordinates(screen, 1.0);
        Ray3 {
            origin: near,
            direction: (far - near).normalize_or_zero(),
        }
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
