//! In-memory driver that records every call, for tests.

use std::cell::{Cell, RefCell};

use crate::buffer::{BufferKind, UsageHint};
use crate::draw::Topology;
use crate::program::ShaderStage;

use super::{ActiveAttribute, ActiveUniform, GpuDevice};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateShader(ShaderStage),
    ShaderSource(u32, String),
    CompileShader(u32),
    CreateProgram,
    AttachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(u32),
    EnableVertexAttribArray(u32),
    VertexAttribPointer { index: u32, components: i32, stride: i32, offset: i32 },
    /// GL entry point name, location, forwarded values.
    UniformF(&'static str, i32, Vec<f32>),
    UniformI(&'static str, i32, Vec<i32>),
    CreateBuffer,
    BindBuffer(BufferKind, u32),
    BufferData(BufferKind, Vec<u8>, UsageHint),
    ClearColor([f32; 4]),
    Clear,
    DrawArrays(Topology, i32, i32),
    DrawElementsU16(Topology, i32, i32),
}

/// Scriptable [`GpuDevice`]. Handles are sequential integers starting at 1;
/// uniform locations are indices into the scripted uniform list.
#[derive(Default)]
pub(crate) struct RecordingDevice {
    calls: RefCell<Vec<Call>>,
    next_handle: Cell<u32>,
    shaders: RefCell<Vec<(u32, ShaderStage)>>,
    uniforms: Vec<ActiveUniform>,
    attributes: Vec<(String, Option<u32>)>,
    compile_failure: Option<(ShaderStage, String)>,
    link_failure: Option<String>,
}

impl RecordingDevice {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_uniform(mut self, name: &str, type_tag: u32, size: i32) -> Self {
        self.uniforms.push(ActiveUniform { name: name.to_owned(), type_tag, size });
        self
    }

    /// `location = None` models built-ins such as `gl_VertexID`.
    pub(crate) fn with_attribute(mut self, name: &str, location: Option<u32>) -> Self {
        self.attributes.push((name.to_owned(), location));
        self
    }

    pub(crate) fn failing_compile(mut self, stage: ShaderStage, log: &str) -> Self {
        self.compile_failure = Some((stage, log.to_owned()));
        self
    }

    pub(crate) fn failing_link(mut self, log: &str) -> Self {
        self.link_failure = Some(log.to_owned());
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Returns and forgets everything recorded so far.
    pub(crate) fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn handle(&self) -> u32 {
        let h = self.next_handle.get() + 1;
        self.next_handle.set(h);
        h
    }

    fn stage_of(&self, shader: u32) -> Option<ShaderStage> {
        self.shaders
            .borrow()
            .iter()
            .find(|(h, _)| *h == shader)
            .map(|(_, stage)| *stage)
    }
}

impl GpuDevice for RecordingDevice {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = i32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        self.record(Call::CreateShader(stage));
        let h = self.handle();
        self.shaders.borrow_mut().push((h, stage));
        Ok(h)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.record(Call::ShaderSource(shader, source.to_owned()));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        match &self.compile_failure {
            Some((stage, _)) => self.stage_of(shader) != Some(*stage),
            None => true,
        }
    }

    fn shader_info_log(&self, shader: u32) -> String {
        match &self.compile_failure {
            Some((stage, log)) if self.stage_of(shader) == Some(*stage) => log.clone(),
            _ => String::new(),
        }
    }

    fn create_program(&self) -> Result<u32, String> {
        self.record(Call::CreateProgram);
        Ok(self.handle())
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        self.link_failure.is_none()
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.link_failure.clone().unwrap_or_default()
    }

    fn use_program(&self, program: u32) {
        self.record(Call::UseProgram(program));
    }

    fn active_uniform_count(&self, _program: u32) -> u32 {
        self.uniforms.len() as u32
    }

    fn active_uniform(&self, _program: u32, index: u32) -> Option<ActiveUniform> {
        self.uniforms.get(index as usize).cloned()
    }

    fn active_attribute_count(&self, _program: u32) -> u32 {
        self.attributes.len() as u32
    }

    fn active_attribute(&self, _program: u32, index: u32) -> Option<ActiveAttribute> {
        self.attributes
            .get(index as usize)
            .map(|(name, _)| ActiveAttribute { name: name.clone() })
    }

    // Drivers accept both `name` and `name[0]` for array uniforms.
    fn uniform_location(&self, _program: u32, name: &str) -> Option<i32> {
        let subscripted = format!("{name}[0]");
        self.uniforms
            .iter()
            .position(|u| u.name == name || u.name == subscripted)
            .map(|i| i as i32)
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, location)| *location)
    }

    fn uniform_1_f32(&self, location: &i32, x: f32) {
        self.record(Call::UniformF("uniform1f", *location, vec![x]));
    }

    fn uniform_2_f32(&self, location: &i32, x: f32, y: f32) {
        self.record(Call::UniformF("uniform2f", *location, vec![x, y]));
    }

    fn uniform_3_f32(&self, location: &i32, x: f32, y: f32, z: f32) {
        self.record(Call::UniformF("uniform3f", *location, vec![x, y, z]));
    }

    fn uniform_4_f32(&self, location: &i32, x: f32, y: f32, z: f32, w: f32) {
        self.record(Call::UniformF("uniform4f", *location, vec![x, y, z, w]));
    }

    fn uniform_1_i32(&self, location: &i32, x: i32) {
        self.record(Call::UniformI("uniform1i", *location, vec![x]));
    }

    fn uniform_1_f32_slice(&self, location: &i32, values: &[f32]) {
        self.record(Call::UniformF("uniform1fv", *location, values.to_vec()));
    }

    fn uniform_2_f32_slice(&self, location: &i32, values: &[f32]) {
        self.record(Call::UniformF("uniform2fv", *location, values.to_vec()));
    }

    fn uniform_3_f32_slice(&self, location: &i32, values: &[f32]) {
        self.record(Call::UniformF("uniform3fv", *location, values.to_vec()));
    }

    fn uniform_4_f32_slice(&self, location: &i32, values: &[f32]) {
        self.record(Call::UniformF("uniform4fv", *location, values.to_vec()));
    }

    fn uniform_1_i32_slice(&self, location: &i32, values: &[i32]) {
        self.record(Call::UniformI("uniform1iv", *location, values.to_vec()));
    }

    fn uniform_matrix_2_f32_slice(&self, location: &i32, values: &[f32]) {
        self.record(Call::UniformF("uniformMatrix2fv", *location, values.to_vec()));
    }

    fn uniform_matrix_3_f32_slice(&self, location: &i32, values: &[f32]) {
        self.record(Call::UniformF("uniformMatrix3fv", *location, values.to_vec()));
    }

    fn uniform_matrix_4_f32_slice(&self, location: &i32, values: &[f32]) {
        self.record(Call::UniformF("uniformMatrix4fv", *location, values.to_vec()));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        self.record(Call::CreateBuffer);
        Ok(self.handle())
    }

    fn bind_buffer(&self, target: BufferKind, buffer: u32) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferKind, data: &[u8], usage: UsageHint) {
        self.record(Call::BufferData(target, data.to_vec(), usage));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::VertexAttribPointer { index, components, stride, offset });
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        self.record(Call::DrawArrays(topology, first, count));
    }

    fn draw_elements_u16(&self, topology: Topology, count: i32, offset: i32) {
        self.record(Call::DrawElementsU16(topology, count, offset));
    }
}
