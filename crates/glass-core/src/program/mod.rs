//! Shader programs and reflection.
//!
//! A [`ProgramSource`] holds the unlinked program and its two shaders.
//! Linking consumes it and, only when compilation, linking and reflection
//! all succeed, yields a [`Program`] with its uniform and attribute tables
//! populated. A program that failed reflection cannot be drawn with because
//! it does not exist.

mod link;
mod reflect;

use std::collections::HashMap;
use std::fmt;

use crate::device::GpuDevice;
use crate::uniform::UniformSlot;

pub use reflect::strip_array_subscript;

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// A vertex attribute's binding index, enabled when the program was linked.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AttributeSlot {
    index: u32,
}

impl AttributeSlot {
    pub fn new(index: u32) -> Self {
        Self { index }
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

/// An unlinked program with both shaders created and attached.
pub struct ProgramSource<D: GpuDevice> {
    handle: D::Program,
    vertex: D::Shader,
    fragment: D::Shader,
}

impl<D: GpuDevice> ProgramSource<D> {
    pub fn handle(&self) -> D::Program {
        self.handle
    }

    pub fn shader(&self, stage: ShaderStage) -> D::Shader {
        match stage {
            ShaderStage::Vertex => self.vertex,
            ShaderStage::Fragment => self.fragment,
        }
    }
}

impl<D: GpuDevice> fmt::Debug for ProgramSource<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramSource")
            .field("handle", &self.handle)
            .field("vertex", &self.vertex)
            .field("fragment", &self.fragment)
            .finish()
    }
}

/// A linked, fully reflected program.
///
/// Uniforms are keyed by base name (`lights`, not `lights[0]`); attributes
/// by the name the driver reports.
pub struct Program<D: GpuDevice> {
    handle: D::Program,
    vertex: D::Shader,
    fragment: D::Shader,
    uniforms: HashMap<String, UniformSlot<D::UniformLocation>>,
    attributes: HashMap<String, AttributeSlot>,
}

impl<D: GpuDevice> Program<D> {
    pub fn handle(&self) -> D::Program {
        self.handle
    }

    pub fn shader(&self, stage: ShaderStage) -> D::Shader {
        match stage {
            ShaderStage::Vertex => self.vertex,
            ShaderStage::Fragment => self.fragment,
        }
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformSlot<D::UniformLocation>> {
        self.uniforms.get(name)
    }

    pub fn attribute(&self, name: &str) -> Option<AttributeSlot> {
        self.attributes.get(name).copied()
    }

    pub fn uniforms(&self) -> impl Iterator<Item = (&str, &UniformSlot<D::UniformLocation>)> {
        self.uniforms.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, AttributeSlot)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<D: GpuDevice> fmt::Debug for Program<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("handle", &self.handle)
            .field("uniforms", &self.uniforms)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
