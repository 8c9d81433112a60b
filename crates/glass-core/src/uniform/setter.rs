use crate::device::GpuDevice;
use crate::error::GlassError;

use super::{UniformKind, UniformValue};

/// Resolved upload call for one uniform.
///
/// `packed` selects the vector entry point (`uniform3fv`) over the
/// positional one (`uniform3f`). It is fixed at resolution: array uniforms
/// and matrices are always packed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformSetter {
    kind: UniformKind,
    array: bool,
    packed: bool,
}

impl UniformSetter {
    /// Resolves the setter for a driver-reported uniform.
    ///
    /// `name` is only used to report an unsupported type.
    pub fn resolve(name: &str, type_tag: u32, is_array: bool) -> Result<Self, GlassError> {
        let kind = UniformKind::from_gl(type_tag).ok_or_else(|| {
            GlassError::UnsupportedUniformType { name: name.to_owned(), type_tag }
        })?;
        Ok(Self::for_kind(kind, is_array))
    }

    pub fn for_kind(kind: UniformKind, is_array: bool) -> Self {
        Self { kind, array: is_array, packed: is_array || kind.is_matrix() }
    }

    pub fn kind(&self) -> UniformKind {
        self.kind
    }

    pub fn is_array(&self) -> bool {
        self.array
    }

    pub fn is_packed(&self) -> bool {
        self.packed
    }

    /// Uploads `value` to `location`.
    ///
    /// The value's kind must match. Array uniforms accept a single element
    /// or a packed array; non-array uniforms accept a single element only.
    pub fn apply<D: GpuDevice>(
        &self,
        device: &D,
        location: &D::UniformLocation,
        value: &UniformValue,
    ) -> Result<(), GlassError> {
        if value.kind() != self.kind || (value.is_array() && !self.array) {
            return Err(self.mismatch(value));
        }

        log::trace!("set {} uniform at {location:?}", self.kind);
        if self.packed {
            return self.apply_packed(device, location, value);
        }

        match *value {
            UniformValue::Float(x) => device.uniform_1_f32(location, x),
            UniformValue::Int(x) => device.uniform_1_i32(location, x),
            UniformValue::Vec2([x, y]) => device.uniform_2_f32(location, x, y),
            UniformValue::Vec3([x, y, z]) => device.uniform_3_f32(location, x, y, z),
            UniformValue::Vec4([x, y, z, w]) => device.uniform_4_f32(location, x, y, z, w),
            // Matrices and arrays are always packed.
            _ => return Err(self.mismatch(value)),
        }
        Ok(())
    }

    fn apply_packed<D: GpuDevice>(
        &self,
        device: &D,
        location: &D::UniformLocation,
        value: &UniformValue,
    ) -> Result<(), GlassError> {
        let floats = || value.floats().ok_or_else(|| self.mismatch(value));
        match self.kind {
            UniformKind::Int => {
                let ints = value.ints().ok_or_else(|| self.mismatch(value))?;
                device.uniform_1_i32_slice(location, ints);
            }
            UniformKind::Float => device.uniform_1_f32_slice(location, floats()?),
            UniformKind::Vec2 => device.uniform_2_f32_slice(location, floats()?),
            UniformKind::Vec3 => device.uniform_3_f32_slice(location, floats()?),
            UniformKind::Vec4 => device.uniform_4_f32_slice(location, floats()?),
            UniformKind::Mat2 => device.uniform_matrix_2_f32_slice(location, floats()?),
            UniformKind::Mat3 => device.uniform_matrix_3_f32_slice(location, floats()?),
            UniformKind::Mat4 => device.uniform_matrix_4_f32_slice(location, floats()?),
        }
        Ok(())
    }

    fn mismatch(&self, value: &UniformValue) -> GlassError {
        GlassError::UniformMismatch {
            expected: self.kind,
            expected_array: self.array,
            found: value.kind(),
            found_array: value.is_array(),
        }
    }
}

/// A reflected uniform: its location plus the setter resolved at link time.
#[derive(Debug, Clone)]
pub struct UniformSlot<L> {
    location: L,
    setter: UniformSetter,
}

impl<L> UniformSlot<L> {
    pub fn new(location: L, setter: UniformSetter) -> Self {
        Self { location, setter }
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn setter(&self) -> UniformSetter {
        self.setter
    }

    pub fn kind(&self) -> UniformKind {
        self.setter.kind
    }

    pub fn is_array(&self) -> bool {
        self.setter.array
    }
}
