/// RenderingSession: ties the context registry, the resource manager and
/// the default state table together.

use std::sync::Arc;
use crate::backend::RenderBackend;
use crate::camera::Camera;
use crate::context::{ContextKey, ContextRegistry, NativeRef, RenderContext};
use crate::error::Result;
use crate::identity::{
    ContextMode, KeyDescriptor, LogicalKey, ShaderProgramDesc, ShaderProgramKey,
    TextureKey, TextureKeyDesc,
};
use crate::resource::ResourceManager;
use crate::state::{DefaultStates, RenderState, StateType};
use crate::{engine_bail, engine_err, engine_info};

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Handle storage of logical keys (one context, or many sharing resources)
    pub context_mode: ContextMode,
    /// Invalidate the state records of a context each time it becomes current
    pub invalidate_on_switch: bool,
    /// Texture units the driver exposes; applying a texture state that
    /// binds a higher unit fails
    pub max_texture_units: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            context_mode: ContextMode::Multi,
            invalidate_on_switch: true,
            max_texture_units: 16,
        }
    }
}

pub struct RenderingSession {
    config: SessionConfig,
    contexts: ContextRegistry,
    resources: ResourceManager,
    defaults: DefaultStates,
}

impl RenderingSession {
    pub fn new(config: SessionConfig) -> Self {
        engine_info!("galaxy3d::RenderingSession",
            "Creating session ({:?} contexts, {} texture units)",
            config.context_mode, config.max_texture_units);
        Self {
            resources: ResourceManager::new(config.context_mode),
            contexts: ContextRegistry::new(),
            defaults: DefaultStates::new(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn contexts(&self) -> &ContextRegistry {
        &self.contexts
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    pub fn default_states(&self) -> &DefaultStates {
        &self.defaults
    }

    pub fn default_states_mut(&mut self) -> &mut DefaultStates {
        &mut self.defaults
    }

    // ===== CONTEXTS =====

    /// Register a native context and apply the session's texture unit limit to it.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a second context in `ContextMode::Single`:
    /// single-mode keys hold one handle without comparing contexts.
    pub fn register_context(
        &mut self,
        backend: Box<dyn RenderBackend>,
        native_ref: Option<NativeRef>,
    ) -> Result<ContextKey> {
        if self.config.context_mode == ContextMode::Single && !self.contexts.is_empty() {
            engine_bail!("galaxy3d::RenderingSession",
                "Single context mode already drives {} context(s)", self.contexts.len());
        }

        let key = self.contexts.register(backend, native_ref);
        if let Some(context) = self.contexts.get_mut(key) {
            context.set_texture_unit_limit(self.config.max_texture_units);
        }
        Ok(key)
    }

    /// Unregister a context. Its queued deletions are discarded and every
    /// key forgets its handle there.
    pub fn unregister_context(&mut self, key: ContextKey) -> Option<RenderContext> {
        let context = self.contexts.unregister(key)?;
        self.resources.forget_context(key);
        Some(context)
    }

    /// Make `key` current: records are invalidated (per config) and
    /// deletions queued for it are flushed.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the context is not registered.
    pub fn switch_to(&mut self, key: ContextKey) -> Result<()> {
        let context = self.contexts.switch_to(key)?;
        if self.config.invalidate_on_switch {
            context.invalidate_states();
        }
        self.resources.flush_deletions(context);
        Ok(())
    }

    pub fn current_context(&self) -> Option<&RenderContext> {
        self.contexts.current()
    }

    pub fn current_context_mut(&mut self) -> Option<&mut RenderContext> {
        self.contexts.current_mut()
    }

    pub fn find_by_native_ref(&self, native_ref: NativeRef) -> Option<ContextKey> {
        self.contexts.find_by_native_ref(native_ref)
    }

    fn require_current(&mut self) -> Result<&mut RenderContext> {
        match self.contexts.current_mut() {
            Some(context) => Ok(context),
            None => Err(engine_err!("galaxy3d::RenderingSession", "No current context")),
        }
    }

    // ===== APPLY =====

    /// Apply the state for `state_type` on the current context.
    ///
    /// Returns whether the backend was called.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if no context is current, `supplied` has the wrong
    /// category, or the resolved texture state (enforced, supplied or
    /// default) binds a unit beyond `max_texture_units`.
    pub fn apply_state(
        &mut self,
        state_type: StateType,
        supplied: Option<&mut RenderState>,
    ) -> Result<bool> {
        let context = match self.contexts.current_mut() {
            Some(context) => context,
            None => engine_bail!("galaxy3d::RenderingSession", "No current context"),
        };
        context.apply_state(state_type, supplied, &mut self.defaults)
    }

    /// Push the dirty aspects of `camera` to the current context.
    pub fn apply_camera(&mut self, camera: &mut Camera) -> Result<()> {
        let context = self.require_current()?;
        camera.apply(context);
        Ok(())
    }

    // ===== RESOURCES =====

    pub fn texture_key(&mut self, descriptor: TextureKeyDesc) -> Arc<TextureKey> {
        self.resources.texture_key(descriptor)
    }

    pub fn shader_program_key(&mut self, descriptor: ShaderProgramDesc) -> Arc<ShaderProgramKey> {
        self.resources.shader_program_key(descriptor)
    }

    /// Release every native handle of `key` (see `ResourceManager::release`).
    pub fn release<D: KeyDescriptor>(&mut self, key: &LogicalKey<D>) -> usize {
        self.resources.release(key, &mut self.contexts)
    }

    /// Route handles left by dropped keys (see `ResourceManager::reclaim`).
    pub fn reclaim(&mut self) -> usize {
        self.resources.reclaim(&mut self.contexts)
    }
}

impl Default for RenderingSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
#[path = "rendering_session_tests.rs"]
mod tests;
