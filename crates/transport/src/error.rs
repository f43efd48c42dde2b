//! Result and Error types for ntransport-transport

/// Type alias for Result<T, transport::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `ntransport-transport` crate
///
/// Everything here is a precondition failure, reported before any sampling
/// begins. Nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid geometry: {0}")]
    Geometry(#[from] ntransport_geometry::Error),

    #[error("invalid material: {0}")]
    Material(#[from] ntransport_material::Error),

    #[error("failed to find scene majorant: {0}")]
    Majorant(#[from] ntransport_utils::Error),

    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to initialise progress bar: {0}")]
    ProgressBar(String),

    #[error("slab width must be finite and positive (found {0})")]
    InvalidSlabWidth(f64),

    #[error("a single region can not be filled with vacuum")]
    VacuumRegion,

    #[error("{materials} materials supplied for {volumes} volumes")]
    MismatchedScene { materials: usize, volumes: usize },

    #[error("scene has no regions")]
    EmptyScene,

    #[error("scene needs at least one material that is not vacuum")]
    NoCollidingMaterial,

    #[error("step limit must allow at least one step")]
    ZeroStepLimit,

    #[error("initial directions can only be changed before the first step")]
    SimulationStarted,
}
