/// Face culling.

use crate::state::StateCommon;
use super::state_type::concrete_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullFace {
    None,
    Front,
    #[default]
    Back,
    FrontAndBack,
}

/// Winding that defines a front face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolygonWind {
    #[default]
    CounterClockwise,
    Clockwise,
}

#[derive(Debug, Clone, Default)]
pub struct CullState {
    common: StateCommon,
    cull_face: CullFace,
    polygon_wind: PolygonWind,
}

concrete_state!(CullState, Cull);

impl CullState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cull_face(&self) -> CullFace {
        self.cull_face
    }

    pub fn set_cull_face(&mut self, face: CullFace) {
        self.cull_face = face;
        self.common.touch();
    }

    pub fn polygon_wind(&self) -> PolygonWind {
        self.polygon_wind
    }

    pub fn set_polygon_wind(&mut self, wind: PolygonWind) {
        self.polygon_wind = wind;
        self.common.touch();
    }
}
