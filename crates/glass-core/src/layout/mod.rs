//! Interleaved vertex layouts.
//!
//! A [`LayoutPlan`] is computed once from an ordered attribute list and
//! replayed on every bind. All attributes are 32-bit floats; the stride is
//! the sum of every attribute's size and offsets are prefix sums in
//! declaration order.
//!
//! The declaration order must match the order values are interleaved in the
//! buffer. That is a caller contract and is not checked.

use crate::buffer::BufferKind;
use crate::device::GpuDevice;
use crate::error::GlassError;
use crate::program::{AttributeSlot, Program};

const FLOAT_SIZE: u32 = std::mem::size_of::<f32>() as u32;

/// One attribute-pointer command, fully precomputed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AttributeBinding {
    pub index: u32,
    pub components: u32,
    /// Byte offset of this attribute within one vertex.
    pub offset: u32,
    /// Byte distance between consecutive vertices.
    pub stride: u32,
}

/// Reusable read plan for one interleaved layout.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct LayoutPlan {
    stride: u32,
    bindings: Vec<AttributeBinding>,
}

impl LayoutPlan {
    /// Plans a layout from `(attribute, component count)` pairs.
    ///
    /// Component counts must be 1 to 4; other values are not rejected and
    /// produce whatever the driver makes of them.
    pub fn new<I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (AttributeSlot, u32)>,
    {
        let attributes: Vec<(AttributeSlot, u32)> = attributes.into_iter().collect();

        let sizes: Vec<u32> = attributes.iter().map(|&(_, n)| n * FLOAT_SIZE).collect();
        let stride: u32 = sizes.iter().sum();
        let offsets = sizes.iter().scan(0, |acc, &size| {
            let offset = *acc;
            *acc += size;
            Some(offset)
        });

        let bindings = attributes
            .iter()
            .zip(offsets)
            .map(|(&(slot, components), offset)| AttributeBinding {
                index: slot.index(),
                components,
                offset,
                stride,
            })
            .collect();

        Self { stride, bindings }
    }

    /// Plans a layout by attribute name against a linked program.
    pub fn for_program<D: GpuDevice>(
        program: &Program<D>,
        attributes: &[(&str, u32)],
    ) -> Result<Self, GlassError> {
        let slots = attributes
            .iter()
            .map(|&(name, components)| {
                program
                    .attribute(name)
                    .map(|slot| (slot, components))
                    .ok_or_else(|| GlassError::UnknownAttribute(name.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(slots))
    }

    /// Bytes per vertex.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn bindings(&self) -> &[AttributeBinding] {
        &self.bindings
    }

    pub fn offsets(&self) -> impl Iterator<Item = u32> + '_ {
        self.bindings.iter().map(|b| b.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Binds `buffer` as the vertex source and issues every attribute
    /// pointer in order. Offsets are read, never recomputed.
    pub(crate) fn replay<D: GpuDevice>(&self, device: &D, buffer: D::Buffer) {
        device.bind_buffer(BufferKind::Vertex, buffer);
        for b in &self.bindings {
            device.vertex_attrib_pointer_f32(
                b.index,
                b.components as i32,
                b.stride as i32,
                b.offset as i32,
            );
        }
        log::trace!(
            "bound {:?} with {} attributes, stride {}",
            buffer,
            self.bindings.len(),
            self.stride
        );
    }
}
