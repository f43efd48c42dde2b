//! Result and Error types for ntransport-material

use crate::MaterialKind;

/// Type alias for Result<T, material::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `ntransport-material` crate
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    /// Cross-sections must be finite and positive for anything but vacuum
    #[error("{kind} cross-section must be finite and positive (found {value})")]
    InvalidCrossSection { kind: MaterialKind, value: f64 },

    /// Absorption probabilities must be in (0, 1] for anything but vacuum
    #[error("{kind} absorption probability must be in (0, 1] (found {value})")]
    InvalidAbsorptionProbability { kind: MaterialKind, value: f64 },

    /// Vacuum is a sentinel and can not be given properties
    #[error("vacuum can not have a cross-section or absorption probability")]
    PropertiesForVacuum,

    /// Only named kinds come with preset properties
    #[error("{0} material has no preset, give a cross-section and absorption probability")]
    NoPreset(MaterialKind),

    #[error("failed to infer material from \"{0}\"")]
    FailedToInferMaterial(String),
}
