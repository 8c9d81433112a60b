/// Initialization parameters for a [`Context`](super::Context).
///
/// Keep this structure small. Add options only when a concrete caller needs
/// one.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextConfig {
    /// Color written by [`Context::clear_frame`](super::Context::clear_frame), linear RGBA.
    pub clear_color: [f32; 4],

    /// Query compile and link status after building a program.
    ///
    /// When disabled, driver errors are not reported and a broken program
    /// reflects whatever the driver returns.
    pub check_shader_status: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            check_shader_status: true,
        }
    }
}
