//! Run configuration shared by every engine

use std::sync::Arc;

// crate modules
use crate::error::{Error, Result};
use crate::trace::Tracer;

// ntransport modules
use ntransport_sampling::{LogMode, RngStreams};
use ntransport_utils::OptionExt;

// external crates
use log::debug;

/// Default cap on the number of flights a single history may take
pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

/// Settings for a transport run
///
/// The defaults are a fresh random seed, exact logarithms, a step limit of
/// [DEFAULT_MAX_STEPS], parallel execution, no progress bar and no tracer.
///
/// ```rust
/// # use ntransport_transport::TransportConfig;
/// # use ntransport_sampling::LogMode;
/// let config = TransportConfig::new()
///     .with_seed(42)
///     .with_log_mode(LogMode::Fast)
///     .with_max_steps(Some(1_000))
///     .sequential();
///
/// assert_eq!(config.seed, Some(42));
/// assert!(!config.parallel);
/// ```
#[derive(Clone)]
pub struct TransportConfig {
    /// Master seed, `None` for a new seed on every run
    pub seed: Option<u64>,
    /// Exact or fast logarithm for free flights
    pub log_mode: LogMode,
    /// Histories still going after this many flights are [TimedOut](crate::Outcome::TimedOut)
    pub max_steps: Option<u64>,
    /// Shard the ensemble across rayon worker threads
    pub parallel: bool,
    /// Print a kdam progress bar over completed shards
    pub progress: bool,
    /// Optional sink for per-particle events
    pub tracer: Option<Arc<dyn Tracer>>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_mode: LogMode::default(),
            max_steps: Some(DEFAULT_MAX_STEPS),
            parallel: true,
            progress: false,
            tracer: None,
        }
    }
}

impl std::fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("TransportConfig")
            .field("seed", &self.seed)
            .field("log_mode", &self.log_mode)
            .field("max_steps", &self.max_steps)
            .field("parallel", &self.parallel)
            .field("progress", &self.progress)
            .field("tracer", &self.tracer.is_some())
            .finish()
    }
}

impl TransportConfig {
    /// Just calls Default::default()
    pub fn new() -> Self {
        Default::default()
    }

    /// Fix the master seed for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Choose the logarithm used for free flights
    pub fn with_log_mode(mut self, log_mode: LogMode) -> Self {
        self.log_mode = log_mode;
        self
    }

    /// Set or remove (`None`) the step limit
    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Run everything on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Show or hide the progress bar
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Send per-particle events to a [Tracer]
    pub fn with_tracer(mut self, tracer: impl Tracer + 'static) -> Self {
        self.tracer = Some(Arc::new(tracer));
        self
    }

    /// Reject settings that can never produce a result
    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_steps == Some(0) {
            return Err(Error::ZeroStepLimit);
        }
        Ok(())
    }

    /// Maximum number of flights per history
    pub(crate) fn step_limit(&self) -> u64 {
        self.max_steps.unwrap_or(u64::MAX)
    }

    /// Random streams for a run, seeded from entropy if no seed is fixed
    pub(crate) fn streams(&self) -> RngStreams {
        let streams = match self.seed {
            Some(seed) => RngStreams::new(seed),
            None => RngStreams::from_entropy(),
        };
        debug!(
            "Seed {} (requested {}), {} log, step limit {}",
            streams.seed(),
            self.seed.display(),
            self.log_mode,
            self.max_steps.display()
        );
        streams
    }

    /// Borrow the tracer, if any
    pub(crate) fn tracer(&self) -> Option<&dyn Tracer> {
        self.tracer.as_deref()
    }
}
