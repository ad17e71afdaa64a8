/// Mock backend for unit tests (no driver required)
///
/// Records every call so tests can assert on what reached the "driver".

use std::sync::Arc;
use parking_lot::Mutex;
use glam::DMat4;
use crate::backend::{RenderBackend, ViewportRect};
use crate::identity::ResourceKind;
use crate::state::{RenderState, StateId, StateRecord, StateType};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    DepthRange(f64, f64),
    Projection(DMat4),
    Viewport(ViewportRect),
    ModelView(DMat4),
    /// (category, applied state id, whether the previous record was valid)
    ApplyState(StateType, StateId, bool),
    DeleteHandles(ResourceKind, Vec<u32>),
}

/// Shared call log, still readable after the backend moved into a context
pub type CallLog = Arc<Mutex<Vec<BackendCall>>>;

#[derive(Debug, Default)]
pub struct MockBackend {
    calls: CallLog,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend and return a handle to its call log
    pub fn with_log() -> (Self, CallLog) {
        let backend = Self::new();
        let log = backend.calls.clone();
        (backend, log)
    }
}

impl RenderBackend for MockBackend {
    fn set_depth_range(&mut self, near: f64, far: f64) {
        self.calls.lock().push(BackendCall::DepthRange(near, far));
    }

    fn set_projection_matrix(&mut self, matrix: &DMat4) {
        self.calls.lock().push(BackendCall::Projection(*matrix));
    }

    fn set_viewport(&mut self, viewport: ViewportRect) {
        self.calls.lock().push(BackendCall::Viewport(viewport));
    }

    fn set_model_view_matrix(&mut self, matrix: &DMat4) {
        self.calls.lock().push(BackendCall::ModelView(*matrix));
    }

    fn apply_state(&mut self, state: &RenderState, previous: &StateRecord) {
        self.calls.lock().push(BackendCall::ApplyState(
            state.state_type(),
            state.id(),
            previous.is_valid(),
        ));
    }

    fn delete_handles(&mut self, kind: ResourceKind, handles: &[u32]) {
        self.calls.lock().push(BackendCall::DeleteHandles(kind, handles.to_vec()));
    }
}

/// Take every recorded call, leaving the log empty
pub fn drain(log: &CallLog) -> Vec<BackendCall> {
    std::mem::take(&mut *log.lock())
}
