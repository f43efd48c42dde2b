//! Random sampling primitives for neutron random walks
#![doc = include_str!("../readme.md")]

mod direction;
mod flight;
mod streams;

#[doc(inline)]
pub use direction::{isotropic_cosine, isotropic_direction, Isotropic};

#[doc(inline)]
pub use flight::{fast_ln, free_flight_length, uniform_nonzero, LogMode};

#[doc(inline)]
pub use streams::{RngStreams, Stream};
