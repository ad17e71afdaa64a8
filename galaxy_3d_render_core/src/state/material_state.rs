/// Fixed-function material colors.

use glam::Vec4;
use crate::state::StateCommon;
use super::state_type::concrete_state;

/// Which material color tracks the vertex color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMaterial {
    #[default]
    None,
    Ambient,
    Diffuse,
    AmbientAndDiffuse,
    Specular,
    Emissive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialFace {
    #[default]
    Front,
    Back,
    FrontAndBack,
}

#[derive(Debug, Clone)]
pub struct MaterialState {
    common: StateCommon,
    ambient: Vec4,
    diffuse: Vec4,
    specular: Vec4,
    emissive: Vec4,
    shininess: f32,
    color_material: ColorMaterial,
    material_face: MaterialFace,
}

concrete_state!(MaterialState, Material);

impl Default for MaterialState {
    fn default() -> Self {
        Self {
            common: StateCommon::default(),
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::new(0.8, 0.8, 0.8, 1.0),
            specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
            emissive: Vec4::new(0.0, 0.0, 0.0, 1.0),
            shininess: 0.0,
            color_material: ColorMaterial::None,
            material_face: MaterialFace::Front,
        }
    }
}

impl MaterialState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ambient(&self) -> Vec4 {
        self.ambient
    }

    pub fn set_ambient(&mut self, color: Vec4) {
        self.ambient = color;
        self.common.touch();
    }

    pub fn diffuse(&self) -> Vec4 {
        self.diffuse
    }

    pub fn set_diffuse(&mut self, color: Vec4) {
        self.diffuse = color;
        self.common.touch();
    }

    pub fn specular(&self) -> Vec4 {
        self.specular
    }

    pub fn set_specular(&mut self, color: Vec4) {
        self.specular = color;
        self.common.touch();
    }

    pub fn emissive(&self) -> Vec4 {
        self.emissive
    }

    pub fn set_emissive(&mut self, color: Vec4) {
        self.emissive = color;
        self.common.touch();
    }

    pub fn shininess(&self) -> f32 {
        self.shininess
    }

    /// Specular exponent, clamped to [0, 128]
    pub fn set_shininess(&mut self, shininess: f32) {
        self.shininess = shininess.clamp(0.0, 128.0);
        self.common.touch();
    }

    pub fn color_material(&self) -> ColorMaterial {
        self.color_material
    }

    pub fn set_color_material(&mut self, mode: ColorMaterial) {
        self.color_material = mode;
        self.common.touch();
    }

    pub fn material_face(&self) -> MaterialFace {
        self.material_face
    }

    pub fn set_material_face(&mut self, face: MaterialFace) {
        self.material_face = face;
        self.common.touch();
    }
}
