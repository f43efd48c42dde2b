//! Vector primitives and region volumes
#![doc = include_str!("../readme.md")]

mod error;
mod vector;
mod volume;

#[doc(inline)]
pub use vector::{reference_axis, Vector, Vector2, Vector3};

#[doc(inline)]
pub use volume::Volume;

#[doc(inline)]
pub use error::{Error, Result};
