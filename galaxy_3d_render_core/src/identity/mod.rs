//! Logical resource identity across native contexts.
//!
//! A logical key (one texture, one shader program) may own a different
//! native handle in every context. Keys are shared (`Arc`) and deduplicated
//! by descriptor; when the last reference drops, the handles still held are
//! pushed to a reclaim queue instead of leaking silently.

mod context_handles;
mod logical_key;
mod reclaim_queue;
mod texture_key;
mod shader_program_key;

pub use context_handles::{ContextHandles, ContextMode};
pub use logical_key::{KeyCache, KeyDescriptor, LogicalKey};
pub use reclaim_queue::{AbandonedHandle, ReclaimQueue};
pub use texture_key::{MinificationFilter, TextureFormat, TextureKey, TextureKeyDesc};
pub use shader_program_key::{ShaderProgramDesc, ShaderProgramKey};

/// Kind of native resource behind a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Texture,
    ShaderProgram,
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
