/// RenderState: one value of any category, as stored by contexts.

use crate::state::{
    BlendState, ClipState, ConcreteState, CullState, MaterialState, ShaderState,
    StateCommon, StateId, StateType, StencilState, TextureState, WireframeState,
    ZBufferState,
};

/// Comparison used by alpha, depth and stencil tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TestFunction {
    Never,
    LessThan,
    EqualTo,
    #[default]
    LessThanOrEqualTo,
    GreaterThan,
    NotEqualTo,
    GreaterThanOrEqualTo,
    Always,
}

/// A render state of any category.
#[derive(Debug, Clone)]
pub enum RenderState {
    Blend(BlendState),
    Clip(ClipState),
    Cull(CullState),
    Material(MaterialState),
    Shader(ShaderState),
    Stencil(StencilState),
    Texture(TextureState),
    Wireframe(WireframeState),
    ZBuffer(ZBufferState),
}

macro_rules! each_state {
    ($value:expr, $state:ident => $body:expr) => {
        match $value {
            RenderState::Blend($state) => $body,
            RenderState::Clip($state) => $body,
            RenderState::Cull($state) => $body,
            RenderState::Material($state) => $body,
            RenderState::Shader($state) => $body,
            RenderState::Stencil($state) => $body,
            RenderState::Texture($state) => $body,
            RenderState::Wireframe($state) => $body,
            RenderState::ZBuffer($state) => $body,
        }
    };
}

macro_rules! accessors {
    ($as_ref:ident, $as_mut:ident, $variant:ident, $state:ty) => {
        pub fn $as_ref(&self) -> Option<&$state> {
            match self {
                RenderState::$variant(state) => Some(state),
                _ => None,
            }
        }

        pub fn $as_mut(&mut self) -> Option<&mut $state> {
            match self {
                RenderState::$variant(state) => Some(state),
                _ => None,
            }
        }
    };
}

impl RenderState {
    /// Built-in default for a category: a disabled state of that type.
    pub fn default_for(state_type: StateType) -> Self {
        let mut state: RenderState = match state_type {
            StateType::Blend => BlendState::default().into(),
            StateType::Clip => ClipState::default().into(),
            StateType::Cull => CullState::default().into(),
            StateType::Material => MaterialState::default().into(),
            StateType::Shader => ShaderState::default().into(),
            StateType::Stencil => StencilState::default().into(),
            StateType::Texture => TextureState::default().into(),
            StateType::Wireframe => WireframeState::default().into(),
            StateType::ZBuffer => ZBufferState::default().into(),
        };
        state.set_enabled(false);
        state
    }

    pub fn state_type(&self) -> StateType {
        match self {
            RenderState::Blend(_) => StateType::Blend,
            RenderState::Clip(_) => StateType::Clip,
            RenderState::Cull(_) => StateType::Cull,
            RenderState::Material(_) => StateType::Material,
            RenderState::Shader(_) => StateType::Shader,
            RenderState::Stencil(_) => StateType::Stencil,
            RenderState::Texture(_) => StateType::Texture,
            RenderState::Wireframe(_) => StateType::Wireframe,
            RenderState::ZBuffer(_) => StateType::ZBuffer,
        }
    }

    fn common(&self) -> &StateCommon {
        each_state!(self, state => state.common())
    }

    pub fn id(&self) -> StateId {
        each_state!(self, state => state.id())
    }

    pub fn is_enabled(&self) -> bool {
        each_state!(self, state => state.is_enabled())
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        each_state!(self, state => state.set_enabled(enabled))
    }

    pub fn needs_refresh(&self) -> bool {
        each_state!(self, state => state.needs_refresh())
    }

    pub fn set_needs_refresh(&mut self, refresh: bool) {
        each_state!(self, state => state.set_needs_refresh(refresh))
    }

    /// Copy keeping the identity; used for the driver-side record only.
    pub(crate) fn duplicate(&self) -> Self {
        let common = self.common().duplicate();
        let mut copy = self.clone();
        each_state!(&mut copy, state => *state.common_mut() = common);
        copy
    }

    accessors!(as_blend, as_blend_mut, Blend, BlendState);
    accessors!(as_clip, as_clip_mut, Clip, ClipState);
    accessors!(as_cull, as_cull_mut, Cull, CullState);
    accessors!(as_material, as_material_mut, Material, MaterialState);
    accessors!(as_shader, as_shader_mut, Shader, ShaderState);
    accessors!(as_stencil, as_stencil_mut, Stencil, StencilState);
    accessors!(as_texture, as_texture_mut, Texture, TextureState);
    accessors!(as_wireframe, as_wireframe_mut, Wireframe, WireframeState);
    accessors!(as_zbuffer, as_zbuffer_mut, ZBuffer, ZBufferState);
}
