/// Shader program binding and uniform values.

use std::sync::Arc;
use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::identity::ShaderProgramKey;
use crate::state::StateCommon;
use super::state_type::concrete_state;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaderUniform {
    pub name: String,
    pub value: UniformValue,
}

#[derive(Debug, Clone, Default)]
pub struct ShaderState {
    common: StateCommon,
    program: Option<Arc<ShaderProgramKey>>,
    uniforms: Vec<ShaderUniform>,
}

concrete_state!(ShaderState, Shader);

impl ShaderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program(&self) -> Option<&Arc<ShaderProgramKey>> {
        self.program.as_ref()
    }

    pub fn set_program(&mut self, program: Option<Arc<ShaderProgramKey>>) {
        self.program = program;
        self.common.touch();
    }

    /// Set a uniform, replacing any previous value with the same name.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) {
        match self.uniforms.iter_mut().find(|uniform| uniform.name == name) {
            Some(uniform) => uniform.value = value,
            None => self.uniforms.push(ShaderUniform { name: name.to_string(), value }),
        }
        self.common.touch();
    }

    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms
            .iter()
            .find(|uniform| uniform.name == name)
            .map(|uniform| uniform.value)
    }

    pub fn uniforms(&self) -> &[ShaderUniform] {
        &self.uniforms
    }

    pub fn clear_uniforms(&mut self) {
        self.uniforms.clear();
        self.common.touch();
    }
}
