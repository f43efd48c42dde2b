//! Optional per-particle event tracing
//!
//! Tracing is off unless a [Tracer] is placed in the
//! [TransportConfig](crate::TransportConfig). The engines then report every
//! birth, collision and death. Closures work as tracers, and [LogTracer]
//! forwards events to the `log` facade at trace level.

use crate::results::Outcome;

// external crates
use log::trace;

/// Kind of event in a particle history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Particle created at the source
    Born,
    /// Real collision, the particle scattered into a new direction
    Scatter,
    /// Rejected collision sampled at the majorant rate
    Fictitious,
    /// History ended
    Terminated(Outcome),
}

/// Single event reported to a [Tracer]
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Index of the particle in the ensemble
    pub particle: u64,
    /// Number of flights taken so far
    pub step: u64,
    /// What happened
    pub kind: EventKind,
    /// Position of the particle after the event
    pub position: &'a [f64],
}

/// Sink for particle events
///
/// Shared between worker threads, so implementations must be `Send + Sync`.
///
/// ```rust
/// # use ntransport_transport::{Event, EventKind, Outcome, TransportConfig};
/// # use std::sync::atomic::{AtomicU64, Ordering};
/// # use std::sync::Arc;
/// let absorbed = Arc::new(AtomicU64::new(0));
/// let counter = absorbed.clone();
///
/// let config = TransportConfig::new().with_tracer(move |event: &Event| {
///     if event.kind == EventKind::Terminated(Outcome::Absorbed) {
///         counter.fetch_add(1, Ordering::Relaxed);
///     }
/// });
/// # assert!(config.tracer.is_some());
/// ```
pub trait Tracer: Send + Sync {
    /// Called for every event
    fn record(&self, event: &Event<'_>);
}

impl<F> Tracer for F
where
    F: Fn(&Event<'_>) + Send + Sync,
{
    fn record(&self, event: &Event<'_>) {
        self(event)
    }
}

/// Forwards every event to `log::trace!`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn record(&self, event: &Event<'_>) {
        trace!(
            "particle {} step {}: {:?} at {:?}",
            event.particle,
            event.step,
            event.kind,
            event.position
        );
    }
}

/// Report an event if there is anyone listening
#[inline]
pub(crate) fn emit(
    tracer: Option<&dyn Tracer>,
    particle: u64,
    step: u64,
    kind: EventKind,
    position: &[f64],
) {
    if let Some(tracer) = tracer {
        tracer.record(&Event {
            particle,
            step,
            kind,
            position,
        });
    }
}
