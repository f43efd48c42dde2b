//! Result and Error types for ntransport-geometry

/// Type alias for Result<T, geometry::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `ntransport-geometry` crate
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("slab must satisfy x_min < x_max (found {x_min} to {x_max})")]
    DegenerateSlab { x_min: f64, x_max: f64 },

    #[error("radius must be positive (found {0})")]
    NonPositiveRadius(f64),

    #[error("cuboid corners are inverted or flat along axis {axis} (min {min}, max {max})")]
    DegenerateCuboid { axis: usize, min: f64, max: f64 },
}
