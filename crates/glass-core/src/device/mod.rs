//! GPU driver surface.
//!
//! Everything above this module talks to the driver through [`GpuDevice`]:
//! - `backend`: the trait and the records the driver reports back
//! - `gl`: the implementation for any `glow::HasContext`

mod backend;
mod gl;

#[cfg(test)]
pub(crate) mod recording;

pub use backend::{ActiveAttribute, ActiveUniform, GpuDevice};
pub use gl::GlowDevice;
