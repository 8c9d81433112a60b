use crate::error::GlassError;

use super::UniformKind;

/// A value to upload to a uniform.
///
/// Single-element variants carry fixed-size arrays, so their component count
/// is correct by construction. Matrices are column-major and uploaded as-is.
/// Packed arrays for array uniforms go through [`UniformValue::array`] or
/// [`UniformValue::int_array`], which check the length.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat2([f32; 4]),
    Mat3([f32; 9]),
    Mat4([f32; 16]),
    Array(UniformArray),
}

/// Packed elements for an array uniform.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformArray {
    kind: UniformKind,
    data: ArrayData,
}

#[derive(Debug, Clone, PartialEq)]
enum ArrayData {
    Floats(Vec<f32>),
    Ints(Vec<i32>),
}

impl UniformArray {
    pub fn kind(&self) -> UniformKind {
        self.kind
    }

    /// Number of elements (not components).
    pub fn len(&self) -> usize {
        let components = match &self.data {
            ArrayData::Floats(v) => v.len(),
            ArrayData::Ints(v) => v.len(),
        };
        components / self.kind.component_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UniformValue {
    /// Packs float elements of `kind` for an array uniform.
    ///
    /// `data` must hold a positive multiple of `kind.component_count()`
    /// floats, and `kind` must not be [`UniformKind::Int`].
    pub fn array(kind: UniformKind, data: Vec<f32>) -> Result<Self, GlassError> {
        let count = kind.component_count();
        if kind == UniformKind::Int || data.is_empty() || data.len() % count != 0 {
            return Err(GlassError::InvalidUniformArray { kind, len: data.len() });
        }
        Ok(Self::Array(UniformArray { kind, data: ArrayData::Floats(data) }))
    }

    /// Packs integers for an `int[]` uniform.
    pub fn int_array(data: Vec<i32>) -> Result<Self, GlassError> {
        if data.is_empty() {
            return Err(GlassError::InvalidUniformArray { kind: UniformKind::Int, len: 0 });
        }
        Ok(Self::Array(UniformArray { kind: UniformKind::Int, data: ArrayData::Ints(data) }))
    }

    /// Element kind of this value.
    pub fn kind(&self) -> UniformKind {
        match self {
            Self::Float(_) => UniformKind::Float,
            Self::Int(_) => UniformKind::Int,
            Self::Vec2(_) => UniformKind::Vec2,
            Self::Vec3(_) => UniformKind::Vec3,
            Self::Vec4(_) => UniformKind::Vec4,
            Self::Mat2(_) => UniformKind::Mat2,
            Self::Mat3(_) => UniformKind::Mat3,
            Self::Mat4(_) => UniformKind::Mat4,
            Self::Array(a) => a.kind,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// All float components in upload order; `None` for integer values.
    pub(crate) fn floats(&self) -> Option<&[f32]> {
        match self {
            Self::Float(x) => Some(std::slice::from_ref(x)),
            Self::Vec2(v) => Some(&v[..]),
            Self::Vec3(v) => Some(&v[..]),
            Self::Vec4(v) | Self::Mat2(v) => Some(&v[..]),
            Self::Mat3(m) => Some(&m[..]),
            Self::Mat4(m) => Some(&m[..]),
            Self::Array(UniformArray { data: ArrayData::Floats(v), .. }) => Some(v.as_slice()),
            Self::Int(_) | Self::Array(_) => None,
        }
    }

    /// All integer components; `None` for float values.
    pub(crate) fn ints(&self) -> Option<&[i32]> {
        match self {
            Self::Int(x) => Some(std::slice::from_ref(x)),
            Self::Array(UniformArray { data: ArrayData::Ints(v), .. }) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl From<f32> for UniformValue {
    fn from(x: f32) -> Self {
        Self::Float(x)
    }
}

impl From<i32> for UniformValue {
    fn from(x: i32) -> Self {
        Self::Int(x)
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(v: [f32; 2]) -> Self {
        Self::Vec2(v)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(v: [f32; 3]) -> Self {
        Self::Vec3(v)
    }
}

// Four floats read as a vector; a mat2 has to be spelled out.
impl From<[f32; 4]> for UniformValue {
    fn from(v: [f32; 4]) -> Self {
        Self::Vec4(v)
    }
}

impl From<[f32; 9]> for UniformValue {
    fn from(m: [f32; 9]) -> Self {
        Self::Mat3(m)
    }
}

impl From<[f32; 16]> for UniformValue {
    fn from(m: [f32; 16]) -> Self {
        Self::Mat4(m)
    }
}
