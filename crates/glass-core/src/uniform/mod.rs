//! Uniform dispatch.
//!
//! A driver type tag resolves once, at link time, into a [`UniformSetter`]
//! stored on the [`UniformSlot`]. Setting a uniform afterwards is a single
//! match on the resolved setter; no type lookup happens per frame.
//!
//! Values are typed ([`UniformValue`]) so a value of the wrong shape is
//! rejected instead of reaching the driver.

mod kind;
mod setter;
mod value;

pub use kind::UniformKind;
pub use setter::{UniformSetter, UniformSlot};
pub use value::{UniformArray, UniformValue};
