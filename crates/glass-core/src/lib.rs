//! Glass core crate.
//!
//! A thin layer over a GL-style rasterization API: programs whose uniforms
//! and attributes are discovered by reflection, typed uniform dispatch,
//! interleaved vertex layouts and triangle draw submission.
//!
//! Window and GL context creation belong to the caller. Wrap the context in
//! [`device::GlowDevice`] and hand it to [`Context::new`].

pub mod buffer;
pub mod context;
pub mod device;
pub mod draw;
pub mod error;
pub mod layout;
pub mod logging;
pub mod program;
pub mod uniform;

pub use buffer::{Buffer, BufferKind, UsageHint};
pub use context::{Context, ContextConfig};
pub use device::{GlowDevice, GpuDevice};
pub use error::GlassError;
pub use layout::LayoutPlan;
pub use program::{AttributeSlot, Program, ProgramSource};
pub use uniform::{UniformSlot, UniformValue};
