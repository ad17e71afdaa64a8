//! Rendering session: the explicit owner of contexts, resources and
//! default states. There is no process-wide current context; everything
//! goes through a session.

mod rendering_session;

pub use rendering_session::{RenderingSession, SessionConfig};
