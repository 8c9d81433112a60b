use std::fmt;

use crate::program::ShaderStage;
use crate::uniform::UniformKind;

/// Errors reported by the glass layer.
///
/// Driver diagnostics (compile and link logs) are carried verbatim; they are
/// never parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum GlassError {
    /// A reflected uniform has a driver type with no registered setter.
    UnsupportedUniformType { name: String, type_tag: u32 },

    /// A shader stage failed to compile. `log` is the driver's info log.
    ShaderCompile { stage: ShaderStage, log: String },

    /// The program failed to link. `log` is the driver's info log.
    ProgramLink { log: String },

    /// The driver refused to create an object (shader, program, buffer).
    Driver(String),

    /// A uniform value does not have the shape the slot was resolved for.
    UniformMismatch {
        expected: UniformKind,
        expected_array: bool,
        found: UniformKind,
        found_array: bool,
    },

    /// A packed uniform array whose length is not a positive multiple of the
    /// element size.
    InvalidUniformArray { kind: UniformKind, len: usize },

    /// A layout names an attribute the program does not declare.
    UnknownAttribute(String),
}

impl fmt::Display for GlassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedUniformType { name, type_tag } => {
                write!(f, "uniform `{name}` has unsupported type 0x{type_tag:04x}")
            }
            Self::ShaderCompile { stage, log } => {
                write!(f, "{stage} shader failed to compile: {}", log.trim_end())
            }
            Self::ProgramLink { log } => write!(f, "program failed to link: {}", log.trim_end()),
            Self::Driver(msg) => write!(f, "driver error: {msg}"),
            Self::UniformMismatch { expected, expected_array, found, found_array } => write!(
                f,
                "uniform expects {}{}, got {}{}",
                expected,
                if *expected_array { "[]" } else { "" },
                found,
                if *found_array { "[]" } else { "" },
            ),
            Self::InvalidUniformArray { kind, len } => write!(
                f,
                "packed {kind} array has {len} components, expected a positive multiple of {}",
                kind.component_count()
            ),
            Self::UnknownAttribute(name) => write!(f, "program has no active attribute `{name}`"),
        }
    }
}

impl std::error::Error for GlassError {}
