use crate::device::GpuDevice;
use crate::error::GlassError;

use super::reflect::{reflect_attributes, reflect_uniforms};
use super::{Program, ProgramSource, ShaderStage};

impl<D: GpuDevice> ProgramSource<D> {
    /// Creates the program object and both shaders, attaching them.
    pub(crate) fn create(device: &D) -> Result<Self, GlassError> {
        let handle = device.create_program().map_err(GlassError::Driver)?;
        let vertex = device.create_shader(ShaderStage::Vertex).map_err(GlassError::Driver)?;
        let fragment = device.create_shader(ShaderStage::Fragment).map_err(GlassError::Driver)?;

        device.attach_shader(handle, vertex);
        device.attach_shader(handle, fragment);

        Ok(Self { handle, vertex, fragment })
    }

    /// Assigns trimmed source text to one stage. Replaces any earlier text.
    pub(crate) fn set_source(&self, device: &D, stage: ShaderStage, source: &str) {
        device.shader_source(self.shader(stage), source.trim());
    }

    /// Compiles both stages, links, then reflects uniforms and attributes.
    ///
    /// Both stages are always compiled before any status is read. With
    /// `check_status`, the first failing stage (vertex before fragment) or a
    /// link failure is reported with the driver's log. Without it, a broken program surfaces as an empty (or
    /// partial) reflection from the driver.
    pub(crate) fn compile_and_link(
        self,
        device: &D,
        check_status: bool,
    ) -> Result<Program<D>, GlassError> {
        const STAGES: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];

        for stage in STAGES {
            device.compile_shader(self.shader(stage));
        }

        for stage in STAGES {
            let shader = self.shader(stage);
            if check_status && !device.shader_compile_status(shader) {
                let log = device.shader_info_log(shader);
                log::warn!("{stage} shader failed to compile:\n{log}");
                return Err(GlassError::ShaderCompile { stage, log });
            }
        }

        device.link_program(self.handle);
        if check_status && !device.program_link_status(self.handle) {
            let log = device.program_info_log(self.handle);
            log::warn!("program failed to link:\n{log}");
            return Err(GlassError::ProgramLink { log });
        }

        let uniforms = reflect_uniforms(device, self.handle)?;
        let attributes = reflect_attributes(device, self.handle);

        log::debug!(
            "program {:?} linked: {} uniforms, {} attributes",
            self.handle,
            uniforms.len(),
            attributes.len()
        );

        Ok(Program {
            handle: self.handle,
            vertex: self.vertex,
            fragment: self.fragment,
            uniforms,
            attributes,
        })
    }
}
