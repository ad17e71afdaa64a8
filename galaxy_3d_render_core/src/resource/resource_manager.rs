/// ResourceManager: logical resource keys and native handle reclamation.
///
/// Keys are handed out deduplicated by descriptor. Native handles leave a
/// key in two ways:
/// - `release()`: the owner is done with the resource (normal path)
/// - the key is dropped while still holding handles; the handles land in
///   the reclaim queue and `reclaim()` picks them up (logged as a leak)
///
/// Either way a handle is deleted immediately when its context is current,
/// otherwise queued until that context becomes current again.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::backend::RenderBackend;
use crate::context::{ContextKey, ContextRegistry, RenderContext};
use crate::identity::{
    AbandonedHandle, ContextMode, KeyCache, KeyDescriptor, LogicalKey, ReclaimQueue,
    ResourceKind, ShaderProgramDesc, ShaderProgramKey, TextureKey, TextureKeyDesc,
};
use crate::{engine_debug, engine_warn};

pub struct ResourceManager {
    reclaim: Arc<ReclaimQueue>,
    textures: KeyCache<TextureKeyDesc>,
    shader_programs: KeyCache<ShaderProgramDesc>,
    /// Handles waiting for their context to become current
    pending_deletions: FxHashMap<ContextKey, Vec<(ResourceKind, u32)>>,
}

impl ResourceManager {
    /// Create a resource manager whose keys store handles per `mode`
    pub fn new(mode: ContextMode) -> Self {
        let reclaim = Arc::new(ReclaimQueue::new());
        Self {
            textures: KeyCache::new(mode, reclaim.clone()),
            shader_programs: KeyCache::new(mode, reclaim.clone()),
            reclaim,
            pending_deletions: FxHashMap::default(),
        }
    }

    // ===== KEYS =====

    /// Shared key for a texture; equal descriptors yield the same key.
    pub fn texture_key(&mut self, descriptor: TextureKeyDesc) -> Arc<TextureKey> {
        self.textures.get_or_create(descriptor)
    }

    pub fn find_texture_key(&self, descriptor: &TextureKeyDesc) -> Option<Arc<TextureKey>> {
        self.textures.get(descriptor)
    }

    /// Shared key for a shader program variant.
    pub fn shader_program_key(&mut self, descriptor: ShaderProgramDesc) -> Arc<ShaderProgramKey> {
        self.shader_programs.get_or_create(descriptor)
    }

    pub fn find_shader_program_key(&self, descriptor: &ShaderProgramDesc) -> Option<Arc<ShaderProgramKey>> {
        self.shader_programs.get(descriptor)
    }

    /// Queue filled by dropped keys
    pub fn reclaim_queue(&self) -> &Arc<ReclaimQueue> {
        &self.reclaim
    }

    // ===== RECLAMATION =====

    /// Release every native handle of `key`.
    ///
    /// Returns the number of handles deleted or queued for deletion.
    pub fn release<D: KeyDescriptor>(
        &mut self,
        key: &LogicalKey<D>,
        contexts: &mut ContextRegistry,
    ) -> usize {
        let handles = key.take_handles();
        self.route(handles, contexts)
    }

    /// Drain the reclaim queue and route what dropped keys left behind.
    ///
    /// Call once per frame on the render thread. Returns the number of
    /// handles deleted or queued for deletion.
    pub fn reclaim(&mut self, contexts: &mut ContextRegistry) -> usize {
        self.textures.purge();
        self.shader_programs.purge();

        let abandoned = self.reclaim.drain();
        if abandoned.is_empty() {
            return 0;
        }
        engine_warn!("galaxy3d::ResourceManager",
            "{} native handle(s) reclaimed from keys dropped without release", abandoned.len());
        self.route(abandoned, contexts)
    }

    fn route(&mut self, handles: Vec<AbandonedHandle>, contexts: &mut ContextRegistry) -> usize {
        let current = contexts.current_key();
        let mut immediate = Vec::new();
        let mut routed = 0;

        for abandoned in handles {
            if Some(abandoned.context) == current {
                immediate.push((abandoned.kind, abandoned.handle));
            } else if contexts.contains(abandoned.context) {
                self.pending_deletions
                    .entry(abandoned.context)
                    .or_default()
                    .push((abandoned.kind, abandoned.handle));
            } else {
                // The native object died with its context
                engine_debug!("galaxy3d::ResourceManager",
                    "Dropping handle {} of unregistered context {:?}", abandoned.handle, abandoned.context);
                continue;
            }
            routed += 1;
        }

        if !immediate.is_empty() {
            if let Some(context) = contexts.current_mut() {
                delete_grouped(context.backend_mut(), immediate);
            }
        }
        routed
    }

    /// Delete everything queued for `context` (which must be current).
    ///
    /// Returns the number of handles deleted.
    pub fn flush_deletions(&mut self, context: &mut RenderContext) -> usize {
        let Some(pending) = self.pending_deletions.remove(&context.key()) else {
            return 0;
        };
        let count = pending.len();
        engine_debug!("galaxy3d::ResourceManager",
            "Flushing {} deferred deletion(s) on {:?}", count, context.key());
        delete_grouped(context.backend_mut(), pending);
        count
    }

    /// Handles queued for `context`
    pub fn pending_deletions(&self, context: ContextKey) -> &[(ResourceKind, u32)] {
        self.pending_deletions
            .get(&context)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Forget every handle owned by a context that is going away.
    ///
    /// Queued deletions are discarded and live keys drop their handle for
    /// that context: the native objects die with it.
    pub fn forget_context(&mut self, context: ContextKey) {
        self.pending_deletions.remove(&context);
        for key in self.textures.live_keys() {
            key.remove_handle(context);
        }
        for key in self.shader_programs.live_keys() {
            key.remove_handle(context);
        }
    }
}

/// Issue one `delete_handles` call per resource kind.
fn delete_grouped(backend: &mut dyn RenderBackend, handles: Vec<(ResourceKind, u32)>) {
    let (textures, programs): (Vec<_>, Vec<_>) = handles
        .into_iter()
        .partition(|(kind, _)| *kind == ResourceKind::Texture);

    if !textures.is_empty() {
        let ids: Vec<u32> = textures.into_iter().map(|(_, handle)| handle).collect();
        backend.delete_handles(ResourceKind::Texture, &ids);
    }
    if !programs.is_empty() {
        let ids: Vec<u32> = programs.into_iter().map(|(_, handle)| handle).collect();
        backend.delete_handles(ResourceKind::ShaderProgram, &ids);
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
