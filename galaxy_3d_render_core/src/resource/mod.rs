//! Resource management module
//!
//! Hands out logical resource keys and reclaims their native handles in
//! the context that owns them.

mod resource_manager;

pub use resource_manager::ResourceManager;
