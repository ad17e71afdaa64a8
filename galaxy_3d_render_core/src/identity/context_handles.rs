/// Per-context native handle storage for one logical key.

use rustc_hash::FxHashMap;
use crate::context::ContextKey;
use crate::error::{Error, Result};
use crate::engine_error;

/// How many native contexts a session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContextMode {
    /// One context: a single slot, the context key is not compared.
    /// A session in this mode refuses to register a second context.
    Single,
    /// Any number of contexts sharing logical resources
    #[default]
    Multi,
}

/// Native handles of one logical resource, keyed by context.
///
/// Handle 0 is reserved by drivers for "no object" and is rejected.
#[derive(Debug, Clone)]
pub enum ContextHandles {
    Single(Option<(ContextKey, u32)>),
    Multi(FxHashMap<ContextKey, u32>),
}

impl ContextHandles {
    pub fn new(mode: ContextMode) -> Self {
        match mode {
            ContextMode::Single => ContextHandles::Single(None),
            ContextMode::Multi => ContextHandles::Multi(FxHashMap::default()),
        }
    }

    /// Handle for `context`. In single mode the key is not consulted.
    pub fn get(&self, context: ContextKey) -> Option<u32> {
        match self {
            ContextHandles::Single(slot) => slot.map(|(_, handle)| handle),
            ContextHandles::Multi(map) => map.get(&context).copied(),
        }
    }

    /// Store the handle for `context`, returning the one it replaces.
    pub fn put(&mut self, context: ContextKey, handle: u32) -> Result<Option<u32>> {
        if handle == 0 {
            let message = format!("Native handle 0 is reserved (context {:?})", context);
            engine_error!("galaxy3d::ContextHandles", "{}", message);
            return Err(Error::InvalidResource(message));
        }
        Ok(match self {
            ContextHandles::Single(slot) => slot.replace((context, handle)).map(|(_, old)| old),
            ContextHandles::Multi(map) => map.insert(context, handle),
        })
    }

    /// Remove and return the handle for `context`.
    pub fn remove(&mut self, context: ContextKey) -> Option<u32> {
        match self {
            ContextHandles::Single(slot) => slot.take().map(|(_, handle)| handle),
            ContextHandles::Multi(map) => map.remove(&context),
        }
    }

    /// Contexts that currently hold a handle
    pub fn context_keys(&self) -> Vec<ContextKey> {
        match self {
            ContextHandles::Single(slot) => slot.iter().map(|(context, _)| *context).collect(),
            ContextHandles::Multi(map) => map.keys().copied().collect(),
        }
    }

    /// Remove every (context, handle) pair.
    pub fn take_all(&mut self) -> Vec<(ContextKey, u32)> {
        match self {
            ContextHandles::Single(slot) => slot.take().into_iter().collect(),
            ContextHandles::Multi(map) => map.drain().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ContextHandles::Single(slot) => usize::from(slot.is_some()),
            ContextHandles::Multi(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
