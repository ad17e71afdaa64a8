//! Backend module: the seam between the render core and a graphics API.
//!
//! The core never talks to a driver directly. Each registered context owns
//! one `RenderBackend`; camera, state and resource code push through it.

pub mod render_backend;

#[cfg(test)]
pub(crate) mod mock_backend;

pub use render_backend::*;
