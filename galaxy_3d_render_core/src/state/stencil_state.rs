/// Stencil test.

use crate::state::{StateCommon, TestFunction};
use super::state_type::concrete_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StencilOperation {
    #[default]
    Keep,
    Zero,
    Replace,
    Increment,
    IncrementWrap,
    Decrement,
    DecrementWrap,
    Invert,
}

#[derive(Debug, Clone)]
pub struct StencilState {
    common: StateCommon,
    function: TestFunction,
    reference: i32,
    function_mask: u32,
    write_mask: u32,
    on_stencil_fail: StencilOperation,
    on_depth_fail: StencilOperation,
    on_depth_pass: StencilOperation,
}

concrete_state!(StencilState, Stencil);

impl Default for StencilState {
    fn default() -> Self {
        Self {
            common: StateCommon::default(),
            function: TestFunction::Always,
            reference: 0,
            function_mask: u32::MAX,
            write_mask: u32::MAX,
            on_stencil_fail: StencilOperation::Keep,
            on_depth_fail: StencilOperation::Keep,
            on_depth_pass: StencilOperation::Keep,
        }
    }
}

impl StencilState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn function(&self) -> TestFunction {
        self.function
    }

    pub fn set_function(&mut self, function: TestFunction) {
        self.function = function;
        self.common.touch();
    }

    pub fn reference(&self) -> i32 {
        self.reference
    }

    pub fn set_reference(&mut self, reference: i32) {
        self.reference = reference;
        self.common.touch();
    }

    pub fn function_mask(&self) -> u32 {
        self.function_mask
    }

    pub fn set_function_mask(&mut self, mask: u32) {
        self.function_mask = mask;
        self.common.touch();
    }

    pub fn write_mask(&self) -> u32 {
        self.write_mask
    }

    pub fn set_write_mask(&mut self, mask: u32) {
        self.write_mask = mask;
        self.common.touch();
    }

    /// Operations for (stencil fail, depth fail, depth pass)
    pub fn operations(&self) -> (StencilOperation, StencilOperation, StencilOperation) {
        (self.on_stencil_fail, self.on_depth_fail, self.on_depth_pass)
    }

    pub fn set_operations(
        &mut self,
        on_stencil_fail: StencilOperation,
        on_depth_fail: StencilOperation,
        on_depth_pass: StencilOperation,
    ) {
        self.on_stencil_fail = on_stencil_fail;
        self.on_depth_fail = on_depth_fail;
        self.on_depth_pass = on_depth_pass;
        self.common.touch();
    }
}
