/// Queue of native handles whose logical key was dropped while still
/// holding them.

use parking_lot::Mutex;
use crate::context::ContextKey;
use crate::identity::ResourceKind;

/// A native handle with no remaining logical owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbandonedHandle {
    pub kind: ResourceKind,
    pub context: ContextKey,
    pub handle: u32,
}

/// Thread-safe queue filled by `LogicalKey` drops, drained by the
/// resource manager.
#[derive(Debug, Default)]
pub struct ReclaimQueue {
    pending: Mutex<Vec<AbandonedHandle>>,
}

impl ReclaimQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, abandoned: impl IntoIterator<Item = AbandonedHandle>) {
        self.pending.lock().extend(abandoned);
    }

    /// Take everything queued so far.
    pub fn drain(&self) -> Vec<AbandonedHandle> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
