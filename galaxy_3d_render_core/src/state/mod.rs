//! Render states: typed, identity-carrying driver settings.
//!
//! Each category (blend, depth buffer, culling, ...) has one concrete
//! struct. A `RenderContext` keeps a `StateRecord` per category mirroring
//! what the driver holds, and skips redundant applies by comparing state
//! identities.

mod state_type;
mod render_state;
mod state_record;
mod blend_state;
mod clip_state;
mod cull_state;
mod material_state;
mod shader_state;
mod stencil_state;
mod texture_state;
mod wireframe_state;
mod zbuffer_state;

pub use state_type::{ConcreteState, StateCommon, StateId, StateType};
pub use render_state::{RenderState, TestFunction};
pub use state_record::{DefaultStates, StateRecord};
pub use blend_state::{BlendEquation, BlendState, DestinationFunction, SourceFunction};
pub use clip_state::{ClipState, MAX_CLIP_PLANES};
pub use cull_state::{CullFace, CullState, PolygonWind};
pub use material_state::{ColorMaterial, MaterialFace, MaterialState};
pub use shader_state::{ShaderState, ShaderUniform, UniformValue};
pub use stencil_state::{StencilOperation, StencilState};
pub use texture_state::{TextureState, MAX_TEXTURE_UNITS};
pub use wireframe_state::{WireframeFace, WireframeState};
pub use zbuffer_state::ZBufferState;

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
