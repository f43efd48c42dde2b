//! Monte Carlo neutron transport engines
#![doc = include_str!("../readme.md")]

mod config;
mod error;
mod region;
mod results;
mod scene;
mod shard;
mod simulation;
mod slab;
mod trace;
mod woodcock;

#[doc(inline)]
pub use crate::config::{TransportConfig, DEFAULT_MAX_STEPS};

#[doc(inline)]
pub use crate::results::{Outcome, SimulationResults};

#[doc(inline)]
pub use crate::slab::run_batch_slab;

#[doc(inline)]
pub use crate::region::run_single_region;

#[doc(inline)]
pub use crate::scene::{Region, Scene};

#[doc(inline)]
pub use crate::woodcock::{
    delta_step, run_woodcock, run_woodcock_pair, Neutron, StepResult, SOURCE_OFFSET,
};

#[doc(inline)]
pub use crate::simulation::Simulation;

#[doc(inline)]
pub use crate::trace::{Event, EventKind, LogTracer, Tracer};

#[doc(inline)]
pub use crate::error::{Error, Result};
