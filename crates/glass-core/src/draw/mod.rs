//! Draw submission.
//!
//! Draws always use [`Topology::Triangles`]. The other topologies exist on
//! the device surface but are not selectable through [`dispatch`].

use crate::buffer::Buffer;
use crate::device::GpuDevice;

/// Primitive assembly mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    Triangles,
    LineLoop,
    Points,
}

/// Topology used by every draw issued through [`dispatch`].
pub const DRAW_TOPOLOGY: Topology = Topology::Triangles;

/// Draws `count` vertices, indexed when `index` is given.
///
/// An index buffer is bound to its own target and read as unsigned 16-bit
/// indices from offset 0. `count` is not compared with any buffer's length.
pub(crate) fn dispatch<D: GpuDevice>(device: &D, count: usize, index: Option<&Buffer<D::Buffer>>) {
    let count = i32::try_from(count).unwrap_or_else(|_| {
        log::warn!("draw count {count} exceeds i32::MAX; clamped");
        i32::MAX
    });
    match index {
        Some(ib) => {
            device.bind_buffer(ib.kind(), ib.handle());
            device.draw_elements_u16(DRAW_TOPOLOGY, count, 0);
            log::trace!("draw_elements: {count} u16 indices from {:?}", ib.handle());
        }
        None => {
            device.draw_arrays(DRAW_TOPOLOGY, 0, count);
            log::trace!("draw_arrays: {count} vertices");
        }
    }
}
