/*!
# Galaxy 3D Render Core

Camera and per-context state/resource cache of the Galaxy 3D renderer.

This crate sits between a scene graph and a graphics driver. It never
talks to the driver itself: each native context is driven through a
`RenderBackend` implementation supplied by the caller.

## Architecture

- **Camera**: view/projection model with lazily rebuilt matrices, world
  clip planes and hierarchical frustum culling
- **RenderContext**: per-native-context mirror of the driver's render
  states, enforced overrides and current camera
- **RenderState**: typed driver settings (blend, depth, cull, ...) with
  identities used to skip redundant applies
- **Identity cache**: logical resources shared across contexts, one
  native handle per context
- **RenderingSession**: owns the contexts, resources and default states
*/

// Internal modules
mod error;
pub mod log;
pub mod backend;
pub mod bounds;
pub mod camera;
pub mod context;
pub mod identity;
pub mod resource;
pub mod session;
pub mod state;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Session entry point
    pub use crate::session::{RenderingSession, SessionConfig};

    // Driver seam
    pub use crate::backend::{RenderBackend, ViewportRect};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        pub use crate::log::{set_logger, reset_logger, set_min_severity, min_severity};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
        pub use crate::bounds::*;
    }

    // Context sub-module
    pub mod context {
        pub use crate::context::*;
    }

    // Render state sub-module
    pub mod state {
        pub use crate::state::*;
    }

    // Resource identity sub-module
    pub mod resource {
        pub use crate::identity::*;
        pub use crate::resource::*;
    }
}

// Re-export math library at crate root
pub use glam;
