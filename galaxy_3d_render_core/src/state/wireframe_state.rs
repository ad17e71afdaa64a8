/// Wireframe polygon mode.

use crate::state::StateCommon;
use super::state_type::concrete_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WireframeFace {
    Front,
    Back,
    #[default]
    FrontAndBack,
}

#[derive(Debug, Clone)]
pub struct WireframeState {
    common: StateCommon,
    face: WireframeFace,
    line_width: f32,
    antialiased: bool,
}

concrete_state!(WireframeState, Wireframe);

impl Default for WireframeState {
    fn default() -> Self {
        Self {
            common: StateCommon::default(),
            face: WireframeFace::FrontAndBack,
            line_width: 1.0,
            antialiased: false,
        }
    }
}

impl WireframeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face(&self) -> WireframeFace {
        self.face
    }

    pub fn set_face(&mut self, face: WireframeFace) {
        self.face = face;
        self.common.touch();
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
        self.common.touch();
    }

    pub fn is_antialiased(&self) -> bool {
        self.antialiased
    }

    pub fn set_antialiased(&mut self, antialiased: bool) {
        self.antialiased = antialiased;
        self.common.touch();
    }
}
