/// Blending and alpha test.

use glam::Vec4;
use crate::state::{StateCommon, TestFunction};
use super::state_type::concrete_state;

/// Source blend factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceFunction {
    Zero,
    One,
    DestinationColor,
    OneMinusDestinationColor,
    #[default]
    SourceAlpha,
    OneMinusSourceAlpha,
    DestinationAlpha,
    OneMinusDestinationAlpha,
    SourceAlphaSaturate,
    ConstantColor,
    OneMinusConstantColor,
}

/// Destination blend factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DestinationFunction {
    Zero,
    One,
    SourceColor,
    OneMinusSourceColor,
    SourceAlpha,
    #[default]
    OneMinusSourceAlpha,
    DestinationAlpha,
    OneMinusDestinationAlpha,
    ConstantColor,
    OneMinusConstantColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendEquation {
    #[default]
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

/// Blend and alpha-test configuration.
#[derive(Debug, Clone, Default)]
pub struct BlendState {
    common: StateCommon,
    blend_enabled: bool,
    source_function: SourceFunction,
    destination_function: DestinationFunction,
    blend_equation: BlendEquation,
    constant_color: Vec4,
    test_enabled: bool,
    test_function: TestFunction,
    reference: f32,
}

concrete_state!(BlendState, Blend);

impl BlendState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_blend_enabled(&self) -> bool {
        self.blend_enabled
    }

    pub fn set_blend_enabled(&mut self, enabled: bool) {
        self.blend_enabled = enabled;
        self.common.touch();
    }

    pub fn source_function(&self) -> SourceFunction {
        self.source_function
    }

    pub fn set_source_function(&mut self, function: SourceFunction) {
        self.source_function = function;
        self.common.touch();
    }

    pub fn destination_function(&self) -> DestinationFunction {
        self.destination_function
    }

    pub fn set_destination_function(&mut self, function: DestinationFunction) {
        self.destination_function = function;
        self.common.touch();
    }

    pub fn blend_equation(&self) -> BlendEquation {
        self.blend_equation
    }

    pub fn set_blend_equation(&mut self, equation: BlendEquation) {
        self.blend_equation = equation;
        self.common.touch();
    }

    /// Color used by the `ConstantColor` factors
    pub fn constant_color(&self) -> Vec4 {
        self.constant_color
    }

    pub fn set_constant_color(&mut self, color: Vec4) {
        self.constant_color = color;
        self.common.touch();
    }

    pub fn is_test_enabled(&self) -> bool {
        self.test_enabled
    }

    pub fn set_test_enabled(&mut self, enabled: bool) {
        self.test_enabled = enabled;
        self.common.touch();
    }

    pub fn test_function(&self) -> TestFunction {
        self.test_function
    }

    pub fn set_test_function(&mut self, function: TestFunction) {
        self.test_function = function;
        self.common.touch();
    }

    /// Alpha-test reference value in [0, 1]
    pub fn reference(&self) -> f32 {
        self.reference
    }

    pub fn set_reference(&mut self, reference: f32) {
        self.reference = reference;
        self.common.touch();
    }
}
