//! The explicit context every glass operation goes through.
//!
//! A [`Context`] owns the device and its configuration. There is no global
//! "current context": callers hold the context and pass it (or call through
//! it) for every program, buffer, uniform and draw operation. Calls are
//! issued immediately and in order; a bind stays in effect until the next
//! bind of the same target.

mod config;

use anyhow::Context as _;
use bytemuck::Pod;

use crate::buffer::Buffer;
use crate::device::GpuDevice;
use crate::draw;
use crate::error::GlassError;
use crate::layout::LayoutPlan;
use crate::program::{Program, ProgramSource, ShaderStage};
use crate::uniform::{UniformSlot, UniformValue};

pub use config::ContextConfig;

/// A device plus the state glass keeps on top of it.
pub struct Context<D: GpuDevice> {
    device: D,
    config: ContextConfig,
}

impl<D: GpuDevice> Context<D> {
    /// Wraps a device and applies the configured clear color.
    pub fn new(device: D, config: ContextConfig) -> Self {
        let [r, g, b, a] = config.clear_color;
        device.clear_color(r, g, b, a);
        log::debug!("context created: {config:?}");
        Self { device, config }
    }

    /// Returns the device for calls glass does not wrap.
    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn set_clear_color(&mut self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        self.device.clear_color(r, g, b, a);
        self.config.clear_color = color;
    }

    // ── programs ──────────────────────────────────────────────────────────

    /// Creates an unlinked program with vertex and fragment shaders attached.
    pub fn create_program(&self) -> Result<ProgramSource<D>, GlassError> {
        ProgramSource::create(&self.device)
    }

    /// Assigns vertex shader text (leading/trailing whitespace is trimmed).
    pub fn set_vertex_source(&self, program: &ProgramSource<D>, source: &str) {
        program.set_source(&self.device, ShaderStage::Vertex, source);
    }

    /// Assigns fragment shader text (leading/trailing whitespace is trimmed).
    pub fn set_fragment_source(&self, program: &ProgramSource<D>, source: &str) {
        program.set_source(&self.device, ShaderStage::Fragment, source);
    }

    /// Compiles, links and reflects `program`.
    ///
    /// On error the program is consumed; nothing partially reflected escapes.
    pub fn compile_and_link(&self, program: ProgramSource<D>) -> Result<Program<D>, GlassError> {
        program.compile_and_link(&self.device, self.config.check_shader_status)
    }

    /// Creates, sources and links a program in one step.
    pub fn build_program(&self, vertex: &str, fragment: &str) -> anyhow::Result<Program<D>> {
        let source = self.create_program().context("failed to create program objects")?;
        self.set_vertex_source(&source, vertex);
        self.set_fragment_source(&source, fragment);
        let program = self
            .compile_and_link(source)
            .context("failed to build shader program")?;
        Ok(program)
    }

    pub fn use_program(&self, program: &Program<D>) {
        self.device.use_program(program.handle());
    }

    // ── buffers ───────────────────────────────────────────────────────────

    /// Creates an empty vertex buffer with a dynamic usage hint.
    pub fn create_buffer(&self) -> Result<Buffer<D::Buffer>, GlassError> {
        Buffer::create(&self.device)
    }

    /// Replaces the buffer's contents. Its `len` becomes `data.len()`.
    pub fn upload_buffer_data<T: Pod>(&self, buffer: &mut Buffer<D::Buffer>, data: &[T]) {
        buffer.upload(&self.device, data);
    }

    /// Binds `buffer` as the vertex source and replays `plan` against it.
    pub fn bind_layout(&self, buffer: &Buffer<D::Buffer>, plan: &LayoutPlan) {
        plan.replay(&self.device, buffer.handle());
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    /// Uploads `value` through the slot's resolved setter.
    ///
    /// The owning program must be in use.
    pub fn set_uniform(
        &self,
        slot: &UniformSlot<D::UniformLocation>,
        value: &UniformValue,
    ) -> Result<(), GlassError> {
        slot.setter().apply(&self.device, slot.location(), value)
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Clears the color buffer to the configured clear color.
    pub fn clear_frame(&self) {
        self.device.clear_color_buffer();
    }

    /// Draws `count` vertices as triangles, indexed when `index` is given.
    pub fn draw(&self, count: usize, index: Option<&Buffer<D::Buffer>>) {
        draw::dispatch(&self.device, count, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{BufferKind, UsageHint};
    use crate::device::recording::{Call, RecordingDevice};
    use crate::draw::Topology;
    use crate::uniform::UniformKind;

    const VS: &str = "
        #version 300 es
        in vec3 a_pos;
        in vec4 a_color;
        uniform mat4 u_mvp;
        void main() { gl_Position = u_mvp * vec4(a_pos, 1.0); }
    ";

    fn quad_device() -> RecordingDevice {
        RecordingDevice::new()
            .with_uniform("u_mvp", glow::FLOAT_MAT4, 1)
            .with_uniform("u_weights[0]", glow::FLOAT, 3)
            .with_attribute("a_pos", Some(0))
            .with_attribute("a_color", Some(1))
    }

    #[test]
    fn new_applies_clear_color() {
        let config = ContextConfig { clear_color: [0.1, 0.2, 0.3, 1.0], ..Default::default() };
        let ctx = Context::new(RecordingDevice::new(), config);
        assert_eq!(ctx.device().take_calls(), [Call::ClearColor([0.1, 0.2, 0.3, 1.0])]);

        ctx.clear_frame();
        assert_eq!(ctx.device().take_calls(), [Call::Clear]);
    }

    #[test]
    fn set_clear_color_updates_device_and_config() {
        let mut ctx = Context::new(RecordingDevice::new(), ContextConfig::default());
        ctx.device().take_calls();

        ctx.set_clear_color([1.0, 1.0, 1.0, 1.0]);
        assert_eq!(ctx.device().take_calls(), [Call::ClearColor([1.0; 4])]);
        assert_eq!(ctx.config().clear_color, [1.0; 4]);
    }

    #[test]
    fn build_program_reflects_tables() {
        let ctx = Context::new(quad_device(), ContextConfig::default());
        let program = ctx.build_program(VS, "void main() {}").unwrap();

        let mut uniforms: Vec<&str> = program.uniforms().map(|(name, _)| name).collect();
        uniforms.sort_unstable();
        assert_eq!(uniforms, ["u_mvp", "u_weights"]);
        assert_eq!(program.attributes().count(), 2);
    }

    #[test]
    fn build_program_error_chains_context() {
        let device = quad_device().failing_compile(ShaderStage::Vertex, "0:2: 'in' : syntax error");
        let ctx = Context::new(device, ContextConfig::default());

        let err = ctx.build_program(VS, "void main() {}").unwrap_err();
        assert_eq!(err.to_string(), "failed to build shader program");
        let cause = err.downcast_ref::<GlassError>().unwrap();
        assert!(matches!(cause, GlassError::ShaderCompile { stage: ShaderStage::Vertex, .. }));
    }

    #[test]
    fn frame_issues_calls_in_caller_order() {
        let ctx = Context::new(quad_device(), ContextConfig::default());
        let program = ctx.build_program(VS, "void main() {}").unwrap();

        let mut vertices = ctx.create_buffer().unwrap();
        ctx.upload_buffer_data(&mut vertices, &[0.0f32; 4 * 7]);

        let mut indices = ctx.create_buffer().unwrap();
        indices.set_kind(BufferKind::Index);
        indices.set_usage(UsageHint::Static);
        ctx.upload_buffer_data(&mut indices, &[0u16, 1, 2, 0, 2, 3]);

        let plan = LayoutPlan::for_program(&program, &[("a_pos", 3), ("a_color", 4)]).unwrap();
        ctx.device().take_calls();

        ctx.clear_frame();
        ctx.use_program(&program);
        ctx.bind_layout(&vertices, &plan);
        ctx.set_uniform(program.uniform("u_mvp").unwrap(), &UniformValue::Mat4(IDENTITY)).unwrap();
        let weights = UniformValue::array(UniformKind::Float, vec![0.2, 0.6, 0.2]).unwrap();
        ctx.set_uniform(program.uniform("u_weights").unwrap(), &weights).unwrap();
        ctx.draw(indices.len(), Some(&indices));

        let vbo = vertices.handle();
        let ibo = indices.handle();
        assert_eq!(
            ctx.device().take_calls(),
            [
                Call::Clear,
                Call::UseProgram(program.handle()),
                Call::BindBuffer(BufferKind::Vertex, vbo),
                Call::VertexAttribPointer { index: 0, components: 3, stride: 28, offset: 0 },
                Call::VertexAttribPointer { index: 1, components: 4, stride: 28, offset: 12 },
                Call::UniformF("uniformMatrix4fv", 0, IDENTITY.to_vec()),
                Call::UniformF("uniform1fv", 1, vec![0.2, 0.6, 0.2]),
                Call::BindBuffer(BufferKind::Index, ibo),
                Call::DrawElementsU16(Topology::Triangles, 6, 0),
            ]
        );
    }

    #[test]
    fn layout_for_unknown_attribute_fails() {
        let ctx = Context::new(quad_device(), ContextConfig::default());
        let program = ctx.build_program(VS, "void main() {}").unwrap();

        let err = LayoutPlan::for_program(&program, &[("a_pos", 3), ("a_normal", 3)]).unwrap_err();
        assert_eq!(err, GlassError::UnknownAttribute("a_normal".into()));
    }

    #[test]
    fn set_uniform_rejects_wrong_shape() {
        let ctx = Context::new(quad_device(), ContextConfig::default());
        let program = ctx.build_program(VS, "void main() {}").unwrap();
        ctx.device().take_calls();

        let slot = program.uniform("u_mvp").unwrap();
        assert!(ctx.set_uniform(slot, &UniformValue::Vec4([0.0; 4])).is_err());
        assert!(ctx.device().calls().is_empty());
    }

    const IDENTITY: [f32; 16] = [
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ];
}
