/// RenderContext: state mirror and enforced overrides of one native context.

use std::sync::{Arc, Weak};
use parking_lot::Mutex;
use crate::backend::RenderBackend;
use crate::camera::{Camera, SharedCamera};
use crate::context::ContextKey;
use crate::error::Result;
use crate::state::{DefaultStates, RenderState, StateRecord, StateType, MAX_TEXTURE_UNITS};
use crate::{engine_bail, engine_trace};

/// Opaque reference to the native object (or shared group) behind a
/// context, as handed out by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeRef(pub u64);

type EnforcedSet = [Option<RenderState>; StateType::COUNT];

pub struct RenderContext {
    key: ContextKey,
    native_ref: Option<NativeRef>,
    backend: Box<dyn RenderBackend>,
    /// Last applied state per category, as the driver holds it
    records: [StateRecord; StateType::COUNT],
    enforced: EnforcedSet,
    enforced_stack: Vec<EnforcedSet>,
    current_camera: Option<Weak<Mutex<Camera>>>,
    /// Texture units the driver behind this context exposes
    texture_unit_limit: usize,
}

impl RenderContext {
    pub(crate) fn new(
        key: ContextKey,
        backend: Box<dyn RenderBackend>,
        native_ref: Option<NativeRef>,
    ) -> Self {
        Self {
            key,
            native_ref,
            backend,
            records: std::array::from_fn(|_| StateRecord::new()),
            enforced: std::array::from_fn(|_| None),
            enforced_stack: Vec::new(),
            current_camera: None,
            texture_unit_limit: MAX_TEXTURE_UNITS,
        }
    }

    pub fn key(&self) -> ContextKey {
        self.key
    }

    pub fn native_ref(&self) -> Option<NativeRef> {
        self.native_ref
    }

    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> &mut dyn RenderBackend {
        self.backend.as_mut()
    }

    pub fn texture_unit_limit(&self) -> usize {
        self.texture_unit_limit
    }

    /// Clamped to `MAX_TEXTURE_UNITS`.
    pub(crate) fn set_texture_unit_limit(&mut self, limit: usize) {
        self.texture_unit_limit = limit.min(MAX_TEXTURE_UNITS);
    }

    // ===== STATE RECORDS =====

    pub fn state_record(&self, state_type: StateType) -> &StateRecord {
        &self.records[state_type.index()]
    }

    /// Last state applied for the category, if the record is valid.
    pub fn current_state(&self, state_type: StateType) -> Option<&RenderState> {
        let record = &self.records[state_type.index()];
        if record.is_valid() {
            record.values()
        } else {
            None
        }
    }

    /// Invalidate every record so the next apply of each category reaches
    /// the driver (context switch, external driver calls).
    pub fn invalidate_states(&mut self) {
        for record in &mut self.records {
            record.invalidate();
        }
    }

    /// Resolve and apply the state for one category.
    ///
    /// Resolution order: enforced override, then `supplied`, then the
    /// default from `defaults`. The backend is only called when the record
    /// is invalid, the resolved state has a different identity than the
    /// recorded one, or it needs a refresh.
    ///
    /// Returns whether the backend was called.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `supplied` is not of category `state_type`, or
    /// if the resolved texture state binds a unit beyond
    /// `texture_unit_limit()`. Nothing reaches the backend in that case.
    pub fn apply_state(
        &mut self,
        state_type: StateType,
        supplied: Option<&mut RenderState>,
        defaults: &mut DefaultStates,
    ) -> Result<bool> {
        if let Some(supplied) = supplied.as_deref() {
            if supplied.state_type() != state_type {
                engine_bail!("galaxy3d::RenderContext",
                    "{:?} state supplied for category {:?}", supplied.state_type(), state_type);
            }
        }

        let index = state_type.index();
        let state: &mut RenderState = match (self.enforced[index].as_mut(), supplied) {
            (Some(enforced), _) => enforced,
            (None, Some(supplied)) => supplied,
            (None, None) => defaults.get_mut(state_type),
        };

        let record = &mut self.records[index];
        if !record.needs_apply(state) {
            return Ok(false);
        }

        if let Some(texture_state) = state.as_texture() {
            let limit = self.texture_unit_limit;
            if let Some((unit, _)) = texture_state.bound_textures().find(|(unit, _)| *unit >= limit) {
                engine_bail!("galaxy3d::RenderContext",
                    "Texture unit {} exceeds the {} units of {:?}", unit, limit, self.key);
            }
        }

        engine_trace!("galaxy3d::RenderContext",
            "Applying {:?} state {} on {:?}", state_type, state.id().raw(), self.key);
        self.backend.apply_state(state, record);
        record.record(state);
        state.set_needs_refresh(false);
        Ok(true)
    }

    // ===== ENFORCED STATES =====

    /// Force `state` for its category until cleared, overriding any
    /// supplied state.
    pub fn enforce_state(&mut self, state: RenderState) {
        let index = state.state_type().index();
        self.enforced[index] = Some(state);
    }

    pub fn enforced_state(&self, state_type: StateType) -> Option<&RenderState> {
        self.enforced[state_type.index()].as_ref()
    }

    pub fn enforced_state_mut(&mut self, state_type: StateType) -> Option<&mut RenderState> {
        self.enforced[state_type.index()].as_mut()
    }

    pub fn clear_enforced_state(&mut self, state_type: StateType) -> Option<RenderState> {
        self.enforced[state_type.index()].take()
    }

    pub fn clear_enforced_states(&mut self) {
        for slot in &mut self.enforced {
            *slot = None;
        }
    }

    /// Save the current enforced set; restore it with `pop_enforced_states`.
    pub fn push_enforced_states(&mut self) {
        let saved = std::array::from_fn(|index| {
            self.enforced[index].as_ref().map(RenderState::duplicate)
        });
        self.enforced_stack.push(saved);
    }

    /// Restore the last saved enforced set. Restored states are marked for
    /// refresh so they reach the driver again.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if nothing was pushed.
    pub fn pop_enforced_states(&mut self) -> Result<()> {
        let Some(mut saved) = self.enforced_stack.pop() else {
            engine_bail!("galaxy3d::RenderContext",
                "pop_enforced_states without a matching push on {:?}", self.key);
        };
        for state in saved.iter_mut().flatten() {
            state.set_needs_refresh(true);
        }
        self.enforced = saved;
        Ok(())
    }

    // ===== CAMERA =====

    /// Camera currently bound to this context, if it is still alive.
    pub fn current_camera(&self) -> Option<SharedCamera> {
        self.current_camera.as_ref().and_then(Weak::upgrade)
    }

    pub fn set_current_camera(&mut self, camera: Option<&SharedCamera>) {
        self.current_camera = camera.map(Arc::downgrade);
    }

    /// Make `camera` current, fully resynchronized with the driver.
    ///
    /// Returns the previous camera for `switch_camera_out`.
    ///
    /// Locks `camera`. The mutex is not reentrant: a caller already holding
    /// the guard must use `switch_camera_in_locked` instead.
    pub fn switch_camera_in(&mut self, camera: &SharedCamera) -> Option<SharedCamera> {
        let mut guard = camera.lock();
        self.switch_camera_in_locked(camera, &mut guard)
    }

    /// `switch_camera_in` for a caller holding the lock of `shared`;
    /// `camera` is the locked value.
    pub fn switch_camera_in_locked(
        &mut self,
        shared: &SharedCamera,
        camera: &mut Camera,
    ) -> Option<SharedCamera> {
        let previous = self.current_camera();
        self.set_current_camera(Some(shared));

        camera.update();
        camera.apply(self);
        previous
    }

    /// Restore the camera returned by `switch_camera_in`.
    ///
    /// Locks `previous`, which must not be held by the caller.
    pub fn switch_camera_out(&mut self, previous: Option<SharedCamera>) {
        self.set_current_camera(previous.as_ref());

        if let Some(previous) = previous {
            let mut camera = previous.lock();
            camera.update();
            camera.apply(self);
        }
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("key", &self.key)
            .field("native_ref", &self.native_ref)
            .field("enforced_depth", &self.enforced_stack.len())
            .finish()
    }
}
