use glow::HasContext;

use crate::buffer::{BufferKind, UsageHint};
use crate::draw::Topology;
use crate::program::ShaderStage;

use super::{ActiveAttribute, ActiveUniform, GpuDevice};

/// [`GpuDevice`] backed by a `glow` context (native GL, GLES or WebGL2).
///
/// Creating the context and making it current is the caller's job (glutin,
/// web-sys, SDL, ...). This type only issues calls against it.
pub struct GlowDevice<G: HasContext = glow::Context> {
    gl: G,
}

impl<G: HasContext> GlowDevice<G> {
    /// Wraps a GL context.
    ///
    /// # Safety
    ///
    /// `gl` must be current on the calling thread whenever this device is
    /// used, and every handle passed back into it must have been created by
    /// it.
    pub unsafe fn new(gl: G) -> Self {
        Self { gl }
    }

    /// Returns the wrapped context for calls glass does not cover.
    pub fn gl(&self) -> &G {
        &self.gl
    }

    pub fn into_inner(self) -> G {
        self.gl
    }
}

fn shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn buffer_target(kind: BufferKind) -> u32 {
    match kind {
        BufferKind::Vertex => glow::ARRAY_BUFFER,
        BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn usage_hint(usage: UsageHint) -> u32 {
    match usage {
        UsageHint::Static => glow::STATIC_DRAW,
        UsageHint::Dynamic => glow::DYNAMIC_DRAW,
    }
}

fn draw_mode(topology: Topology) -> u32 {
    match topology {
        Topology::Triangles => glow::TRIANGLES,
        Topology::LineLoop => glow::LINE_LOOP,
        Topology::Points => glow::POINTS,
    }
}

// SAFETY (every `unsafe` block below): the context is current and owns the
// handles, as required by `GlowDevice::new`.
impl<G: HasContext> GpuDevice for GlowDevice<G> {
    type Shader = G::Shader;
    type Program = G::Program;
    type Buffer = G::Buffer;
    type UniformLocation = G::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { self.gl.create_shader(shader_type(stage)) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn use_program(&self, program: Self::Program) {
        unsafe { self.gl.use_program(Some(program)) }
    }

    fn active_uniform_count(&self, program: Self::Program) -> u32 {
        unsafe { self.gl.get_active_uniforms(program) }
    }

    fn active_uniform(&self, program: Self::Program, index: u32) -> Option<ActiveUniform> {
        let u = unsafe { self.gl.get_active_uniform(program, index) }?;
        Some(ActiveUniform { name: u.name, type_tag: u.utype, size: u.size })
    }

    fn active_attribute_count(&self, program: Self::Program) -> u32 {
        unsafe { self.gl.get_active_attributes(program) }
    }

    fn active_attribute(&self, program: Self::Program, index: u32) -> Option<ActiveAttribute> {
        let a = unsafe { self.gl.get_active_attribute(program, index) }?;
        Some(ActiveAttribute { name: a.name })
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_1_f32(&self, location: &Self::UniformLocation, x: f32) {
        unsafe { self.gl.uniform_1_f32(Some(location), x) }
    }

    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32) {
        unsafe { self.gl.uniform_2_f32(Some(location), x, y) }
    }

    fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32) {
        unsafe { self.gl.uniform_3_f32(Some(location), x, y, z) }
    }

    fn uniform_4_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32, w: f32) {
        unsafe { self.gl.uniform_4_f32(Some(location), x, y, z, w) }
    }

    fn uniform_1_i32(&self, location: &Self::UniformLocation, x: i32) {
        unsafe { self.gl.uniform_1_i32(Some(location), x) }
    }

    fn uniform_1_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]) {
        unsafe { self.gl.uniform_1_f32_slice(Some(location), values) }
    }

    fn uniform_2_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]) {
        unsafe { self.gl.uniform_2_f32_slice(Some(location), values) }
    }

    fn uniform_3_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]) {
        unsafe { self.gl.uniform_3_f32_slice(Some(location), values) }
    }

    fn uniform_4_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]) {
        unsafe { self.gl.uniform_4_f32_slice(Some(location), values) }
    }

    fn uniform_1_i32_slice(&self, location: &Self::UniformLocation, values: &[i32]) {
        unsafe { self.gl.uniform_1_i32_slice(Some(location), values) }
    }

    fn uniform_matrix_2_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]) {
        unsafe { self.gl.uniform_matrix_2_f32_slice(Some(location), false, values) }
    }

    fn uniform_matrix_3_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]) {
        unsafe { self.gl.uniform_matrix_3_f32_slice(Some(location), false, values) }
    }

    fn uniform_matrix_4_f32_slice(&self, location: &Self::UniformLocation, values: &[f32]) {
        unsafe { self.gl.uniform_matrix_4_f32_slice(Some(location), false, values) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn bind_buffer(&self, target: BufferKind, buffer: Self::Buffer) {
        unsafe { self.gl.bind_buffer(buffer_target(target), Some(buffer)) }
    }

    fn buffer_data(&self, target: BufferKind, data: &[u8], usage: UsageHint) {
        unsafe { self.gl.buffer_data_u8_slice(buffer_target(target), data, usage_hint(usage)) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, components, glow::FLOAT, false, stride, offset)
        }
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear_color_buffer(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(draw_mode(topology), first, count) }
    }

    fn draw_elements_u16(&self, topology: Topology, count: i32, offset: i32) {
        unsafe {
            self.gl
                .draw_elements(draw_mode(topology), count, glow::UNSIGNED_SHORT, offset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_mapping_matches_gl_constants() {
        assert_eq!(shader_type(ShaderStage::Vertex), 0x8b31);
        assert_eq!(shader_type(ShaderStage::Fragment), 0x8b30);
        assert_eq!(buffer_target(BufferKind::Vertex), 0x8892);
        assert_eq!(buffer_target(BufferKind::Index), 0x8893);
        assert_eq!(usage_hint(UsageHint::Static), 0x88e4);
        assert_eq!(usage_hint(UsageHint::Dynamic), 0x88e8);
        assert_eq!(draw_mode(Topology::Triangles), 0x0004);
        assert_eq!(draw_mode(Topology::LineLoop), 0x0002);
        assert_eq!(draw_mode(Topology::Points), 0x0000);
    }
}
