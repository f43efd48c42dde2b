//! Scattering and absorbing materials
#![doc = include_str!("../readme.md")]

mod error;
mod material;

#[doc(inline)]
pub use material::{Material, MaterialKind};

#[doc(inline)]
pub use error::{Error, Result};
