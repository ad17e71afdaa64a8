/// Shader program descriptors.

use crate::identity::{KeyDescriptor, LogicalKey, ResourceKind};

/// A program variant: the named program plus its compile-time defines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ShaderProgramDesc {
    pub name: String,
    pub defines: Vec<String>,
}

impl ShaderProgramDesc {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            defines: Vec::new(),
        }
    }

    pub fn with_define(mut self, define: &str) -> Self {
        self.defines.push(define.to_string());
        self
    }
}

impl KeyDescriptor for ShaderProgramDesc {
    const KIND: ResourceKind = ResourceKind::ShaderProgram;
}

/// Logical shader program
pub type ShaderProgramKey = LogicalKey<ShaderProgramDesc>;
