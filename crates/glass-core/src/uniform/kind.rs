use std::fmt;

/// GPU value shapes a uniform can be dispatched for.
///
/// Anything else the driver reports (samplers, unsigned and boolean vectors,
/// non-square matrices) has no setter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformKind {
    Float,
    Int,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl UniformKind {
    pub const ALL: [UniformKind; 8] = [
        Self::Float,
        Self::Int,
        Self::Vec2,
        Self::Vec3,
        Self::Vec4,
        Self::Mat2,
        Self::Mat3,
        Self::Mat4,
    ];

    /// Maps a GL type enum to a kind.
    pub fn from_gl(type_tag: u32) -> Option<Self> {
        match type_tag {
            glow::FLOAT => Some(Self::Float),
            glow::INT => Some(Self::Int),
            glow::FLOAT_VEC2 => Some(Self::Vec2),
            glow::FLOAT_VEC3 => Some(Self::Vec3),
            glow::FLOAT_VEC4 => Some(Self::Vec4),
            glow::FLOAT_MAT2 => Some(Self::Mat2),
            glow::FLOAT_MAT3 => Some(Self::Mat3),
            glow::FLOAT_MAT4 => Some(Self::Mat4),
            _ => None,
        }
    }

    pub fn gl_type(self) -> u32 {
        match self {
            Self::Float => glow::FLOAT,
            Self::Int => glow::INT,
            Self::Vec2 => glow::FLOAT_VEC2,
            Self::Vec3 => glow::FLOAT_VEC3,
            Self::Vec4 => glow::FLOAT_VEC4,
            Self::Mat2 => glow::FLOAT_MAT2,
            Self::Mat3 => glow::FLOAT_MAT3,
            Self::Mat4 => glow::FLOAT_MAT4,
        }
    }

    /// Number of 32-bit components in one element of this kind.
    pub const fn component_count(self) -> usize {
        match self {
            Self::Float | Self::Int => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 | Self::Mat2 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }

    pub const fn is_matrix(self) -> bool {
        matches!(self, Self::Mat2 | Self::Mat3 | Self::Mat4)
    }

    /// GLSL spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Mat2 => "mat2",
            Self::Mat3 => "mat3",
            Self::Mat4 => "mat4",
        }
    }
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
