/// ContextRegistry: every registered context and the current one.

use slotmap::SlotMap;
use crate::backend::RenderBackend;
use crate::context::{ContextKey, NativeRef, RenderContext};
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_info};

/// Owns all render contexts of a session.
///
/// Exactly one context is current at a time; switching is explicit and
/// carries no stack. Callers save and restore themselves.
#[derive(Debug, Default)]
pub struct ContextRegistry {
    contexts: SlotMap<ContextKey, RenderContext>,
    current: Option<ContextKey>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a native context driven by `backend`.
    pub fn register(
        &mut self,
        backend: Box<dyn RenderBackend>,
        native_ref: Option<NativeRef>,
    ) -> ContextKey {
        let key = self
            .contexts
            .insert_with_key(|key| RenderContext::new(key, backend, native_ref));
        engine_info!("galaxy3d::ContextRegistry", "Registered context {:?}", key);
        key
    }

    /// Remove a context. If it was current, no context is current afterwards.
    pub fn unregister(&mut self, key: ContextKey) -> Option<RenderContext> {
        let context = self.contexts.remove(key)?;
        if self.current == Some(key) {
            self.current = None;
        }
        engine_info!("galaxy3d::ContextRegistry", "Unregistered context {:?}", key);
        Some(context)
    }

    /// Make `key` the current context.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `key` was never registered (or was removed).
    pub fn switch_to(&mut self, key: ContextKey) -> Result<&mut RenderContext> {
        let Some(context) = self.contexts.get_mut(key) else {
            engine_bail!("galaxy3d::ContextRegistry",
                "Cannot switch to unknown context {:?}", key);
        };
        if self.current != Some(key) {
            engine_debug!("galaxy3d::ContextRegistry", "Switching to context {:?}", key);
            self.current = Some(key);
        }
        Ok(context)
    }

    pub fn current_key(&self) -> Option<ContextKey> {
        self.current
    }

    pub fn current(&self) -> Option<&RenderContext> {
        self.current.and_then(|key| self.contexts.get(key))
    }

    pub fn current_mut(&mut self) -> Option<&mut RenderContext> {
        self.current.and_then(|key| self.contexts.get_mut(key))
    }

    pub fn get(&self, key: ContextKey) -> Option<&RenderContext> {
        self.contexts.get(key)
    }

    pub fn get_mut(&mut self, key: ContextKey) -> Option<&mut RenderContext> {
        self.contexts.get_mut(key)
    }

    pub fn contains(&self, key: ContextKey) -> bool {
        self.contexts.contains_key(key)
    }

    /// Context whose native reference is `native_ref` (linear scan).
    pub fn find_by_native_ref(&self, native_ref: NativeRef) -> Option<ContextKey> {
        self.contexts
            .iter()
            .find(|(_, context)| context.native_ref() == Some(native_ref))
            .map(|(key, _)| key)
    }

    pub fn keys(&self) -> impl Iterator<Item = ContextKey> + '_ {
        self.contexts.keys()
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
