/// RenderBackend trait - driver-facing operations of one native context

use glam::DMat4;
use crate::identity::ResourceKind;
use crate::state::{RenderState, StateRecord};

/// Viewport rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Operations a graphics backend performs for one native context.
///
/// Calls are only made while the owning context is current. Driver-level
/// failures are the backend's concern (log and carry on); none of these
/// calls can fail from the core's point of view.
pub trait RenderBackend: Send {
    /// Set the depth range mapping, both values in [0, 1]
    fn set_depth_range(&mut self, near: f64, far: f64);

    /// Load the projection matrix
    fn set_projection_matrix(&mut self, matrix: &DMat4);

    /// Set the pixel viewport
    fn set_viewport(&mut self, viewport: ViewportRect);

    /// Load the model-view matrix
    fn set_model_view_matrix(&mut self, matrix: &DMat4);

    /// Push a render state to the driver
    ///
    /// # Arguments
    ///
    /// * `state` - State to apply (its category is `state.state_type()`)
    /// * `previous` - What the driver is believed to hold for that category.
    ///   An invalid record means nothing can be assumed.
    fn apply_state(&mut self, state: &RenderState, previous: &StateRecord);

    /// Delete native handles of the given kind
    fn delete_handles(&mut self, kind: ResourceKind, handles: &[u32]);
}
