/// Depth buffer test and writes.

use crate::state::{StateCommon, TestFunction};
use super::state_type::concrete_state;

#[derive(Debug, Clone)]
pub struct ZBufferState {
    common: StateCommon,
    writable: bool,
    function: TestFunction,
}

concrete_state!(ZBufferState, ZBuffer);

impl Default for ZBufferState {
    fn default() -> Self {
        Self {
            common: StateCommon::default(),
            writable: true,
            function: TestFunction::LessThanOrEqualTo,
        }
    }
}

impl ZBufferState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn set_writable(&mut self, writable: bool) {
        self.writable = writable;
        self.common.touch();
    }

    pub fn function(&self) -> TestFunction {
        self.function
    }

    pub fn set_function(&mut self, function: TestFunction) {
        self.function = function;
        self.common.touch();
    }
}
