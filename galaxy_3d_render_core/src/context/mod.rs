//! Render contexts: one per native rendering context.
//!
//! A `RenderContext` mirrors what its driver holds (per-category state
//! records), carries enforced state overrides and remembers the current
//! camera. The `ContextRegistry` owns every context and knows which one
//! is current.

mod render_context;
mod context_registry;

pub use render_context::{NativeRef, RenderContext};
pub use context_registry::ContextRegistry;

slotmap::new_key_type! {
    /// Generational key of a registered context. A key removed from the
    /// registry never resolves again.
    pub struct ContextKey;
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
