/// LogicalKey: one logical resource and its native handles per context.

use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Weak};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use crate::context::ContextKey;
use crate::error::Result;
use crate::identity::{AbandonedHandle, ContextHandles, ContextMode, ReclaimQueue, ResourceKind};

/// Descriptor identifying a logical resource. Equal descriptors share
/// one key within a `KeyCache`.
pub trait KeyDescriptor: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    const KIND: ResourceKind;
}

/// A logical resource shared by every context of a session.
pub struct LogicalKey<D: KeyDescriptor> {
    descriptor: D,
    handles: Mutex<ContextHandles>,
    reclaim: Arc<ReclaimQueue>,
}

impl<D: KeyDescriptor> LogicalKey<D> {
    pub fn new(descriptor: D, mode: ContextMode, reclaim: Arc<ReclaimQueue>) -> Self {
        Self {
            descriptor,
            handles: Mutex::new(ContextHandles::new(mode)),
            reclaim,
        }
    }

    pub fn descriptor(&self) -> &D {
        &self.descriptor
    }

    pub fn kind(&self) -> ResourceKind {
        D::KIND
    }

    /// Native handle in `context`, if one was created there.
    pub fn handle(&self, context: ContextKey) -> Option<u32> {
        self.handles.lock().get(context)
    }

    /// Record the native handle created in `context`.
    ///
    /// Returns the handle it replaces; the caller deletes that one.
    pub fn put_handle(&self, context: ContextKey, handle: u32) -> Result<Option<u32>> {
        self.handles.lock().put(context, handle)
    }

    pub fn remove_handle(&self, context: ContextKey) -> Option<u32> {
        self.handles.lock().remove(context)
    }

    /// Contexts holding a native handle for this key
    pub fn context_keys(&self) -> Vec<ContextKey> {
        self.handles.lock().context_keys()
    }

    pub(crate) fn take_handles(&self) -> Vec<AbandonedHandle> {
        self.handles
            .lock()
            .take_all()
            .into_iter()
            .map(|(context, handle)| AbandonedHandle { kind: D::KIND, context, handle })
            .collect()
    }
}

impl<D: KeyDescriptor> Drop for LogicalKey<D> {
    fn drop(&mut self) {
        let abandoned = self.take_handles();
        if !abandoned.is_empty() {
            self.reclaim.push(abandoned);
        }
    }
}

impl<D: KeyDescriptor> fmt::Debug for LogicalKey<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicalKey")
            .field("descriptor", &self.descriptor)
            .field("handles", &*self.handles.lock())
            .finish()
    }
}

/// Deduplicating cache: one live key per descriptor.
///
/// Holds weak references only, so the cache never keeps a key alive.
pub struct KeyCache<D: KeyDescriptor> {
    keys: FxHashMap<D, Weak<LogicalKey<D>>>,
    mode: ContextMode,
    reclaim: Arc<ReclaimQueue>,
}

impl<D: KeyDescriptor> KeyCache<D> {
    pub fn new(mode: ContextMode, reclaim: Arc<ReclaimQueue>) -> Self {
        Self {
            keys: FxHashMap::default(),
            mode,
            reclaim,
        }
    }

    /// Live key for `descriptor`, created if none exists.
    pub fn get_or_create(&mut self, descriptor: D) -> Arc<LogicalKey<D>> {
        if let Some(key) = self.keys.get(&descriptor).and_then(Weak::upgrade) {
            return key;
        }
        let key = Arc::new(LogicalKey::new(descriptor.clone(), self.mode, self.reclaim.clone()));
        self.keys.insert(descriptor, Arc::downgrade(&key));
        key
    }

    /// Live key for `descriptor`, without creating one.
    pub fn get(&self, descriptor: &D) -> Option<Arc<LogicalKey<D>>> {
        self.keys.get(descriptor).and_then(Weak::upgrade)
    }

    /// Every key still alive
    pub fn live_keys(&self) -> Vec<Arc<LogicalKey<D>>> {
        self.keys.values().filter_map(Weak::upgrade).collect()
    }

    /// Drop entries whose key is gone; returns how many were removed.
    pub fn purge(&mut self) -> usize {
        let before = self.keys.len();
        self.keys.retain(|_, key| key.strong_count() > 0);
        before - self.keys.len()
    }

    /// Number of entries, including dead ones not yet purged
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
