use std::fmt::Debug;

use crate::buffer::{BufferKind, UsageHint};
use crate::draw::Topology;
use crate::program::ShaderStage;

/// A uniform as reported by the driver after linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveUniform {
    pub name: String,

    /// GL type enum (`FLOAT`, `FLOAT_VEC3`, `FLOAT_MAT4`, ...).
    pub type_tag: u32,

    /// Declared array length; 1 for non-array uniforms.
    pub size: i32,
}

/// A vertex attribute as reported by the driver after linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAttribute {
    pub name: String,
}

/// The driver calls the glass layer is built on.
///
/// Implementations issue each call immediately against a single GL-style
/// state machine. Call order is significant: binds affect every later call
/// until rebound.
pub trait GpuDevice {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type Buffer: Copy + Debug;
    type UniformLocation: Clone + Debug;

    // ── shaders & programs ────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Self::Program);

    // ── reflection ────────────────────────────────────────────────────────

    fn active_uniform_count(&self, program: Self::Program) -> u32;
    fn active_uniform(&self, program: Self::Program, index: u32) -> Option<ActiveUniform>;
    fn active_attribute_count(&self, program: Self::Program) -> u32;
    fn active_attribute(&self, program: Self::Program, index: u32) -> Option<ActiveAttribute>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    // ── uniform upload ────────────────────────────────────────────────────

    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32);
    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32);
    fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32);
    fn uniform_4_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32, w: f32);
    fn uniform_1_i32(&self, location: &Self::UniformLocation, x: i32);

    fn uniform_1_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]);
    fn uniform_2_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]);
    fn uniform_3_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]);
    fn uniform_4_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]);
    fn uniform_1_i32_slice(&self, location: &Self::UniformLocation, values: &[i32]);

    /// Matrix uploads are never transposed.
    fn uniform_matrix_2_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]);
    fn uniform_matrix_3_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]);
    fn uniform_matrix_4_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]);

    // ── buffers & vertex input ────────────────────────────────────────────

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&self, target: BufferKind, buffer: Self::Buffer);
    fn buffer_data(&self, target: BufferKind, data: &[u8], usage: UsageHint);
    fn enable_vertex_attrib_array(&self, index: u32);

    /// Reads attribute `index` as `components` floats, `stride` bytes apart,
    /// starting `offset` bytes into the bound vertex buffer.
    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32);

    // ── frame ─────────────────────────────────────────────────────────────

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&self);
    fn draw_arrays(&self, topology: Topology, first: i32, count: i32);

    /// Indexed draw reading unsigned 16-bit indices from the bound index buffer.
    fn draw_elements_u16(&self, topology: Topology, count: i32, offset: i32);
}
