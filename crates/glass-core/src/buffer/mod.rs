//! GPU buffers.
//!
//! A [`Buffer`] is a handle plus the bookkeeping the draw path needs: which
//! target it binds to, the usage hint passed on upload, and how many elements
//! the last upload held.

use std::fmt;

use bytemuck::Pod;

use crate::device::GpuDevice;
use crate::error::GlassError;

/// Binding target of a buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BufferKind {
    /// Vertex data (`ARRAY_BUFFER`).
    #[default]
    Vertex,
    /// Element indices (`ELEMENT_ARRAY_BUFFER`).
    Index,
}

/// Upload frequency hint passed to the driver.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum UsageHint {
    Static,
    #[default]
    Dynamic,
}

/// A driver buffer with its target, usage hint and element count.
///
/// `len` is advisory: it records the last upload and is not checked against
/// draw calls or shader inputs.
#[derive(Debug, Clone)]
pub struct Buffer<H> {
    handle: H,
    kind: BufferKind,
    usage: UsageHint,
    len: usize,
}

impl<H: Copy + fmt::Debug> Buffer<H> {
    /// Creates an empty vertex buffer with a dynamic usage hint.
    pub(crate) fn create<D>(device: &D) -> Result<Self, GlassError>
    where
        D: GpuDevice<Buffer = H>,
    {
        let handle = device.create_buffer().map_err(GlassError::Driver)?;
        Ok(Self {
            handle,
            kind: BufferKind::default(),
            usage: UsageHint::default(),
            len: 0,
        })
    }

    /// Binds to the buffer's own target and replaces its contents.
    ///
    /// `len` becomes the number of `T` elements in `data`.
    pub(crate) fn upload<D, T>(&mut self, device: &D, data: &[T])
    where
        D: GpuDevice<Buffer = H>,
        T: Pod,
    {
        device.bind_buffer(self.kind, self.handle);
        device.buffer_data(self.kind, bytemuck::cast_slice(data), self.usage);
        self.len = data.len();
        log::trace!(
            "buffer {:?}: uploaded {} elements ({} bytes) as {:?}",
            self.handle,
            self.len,
            std::mem::size_of_val(data),
            self.kind
        );
    }

    pub fn handle(&self) -> H {
        self.handle
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// Changes the binding target. Takes effect on the next upload or bind.
    pub fn set_kind(&mut self, kind: BufferKind) {
        self.kind = kind;
    }

    pub fn usage(&self) -> UsageHint {
        self.usage
    }

    /// Changes the usage hint. Takes effect on the next upload.
    pub fn set_usage(&mut self, usage: UsageHint) {
        self.usage = usage;
    }

    /// Element count of the last upload.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
