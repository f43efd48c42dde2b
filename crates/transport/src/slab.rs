//! Batch engine for a single slab in one dimension

// crate modules
use crate::config::TransportConfig;
use crate::error::{Error, Result};
use crate::results::{Outcome, SimulationResults};
use crate::shard::run_sharded;
use crate::trace::{emit, EventKind, Tracer};

// ntransport modules
use ntransport_material::Material;
use ntransport_sampling::{free_flight_length, isotropic_cosine, LogMode, Stream};

// external crates
use log::{debug, trace};
use rand::Rng;

/// Simulate `count` neutrons through a slab of `material` between `x = 0`
/// and `x = slab_width`
///
/// Only the x coordinate and the x direction cosine are tracked. Every
/// neutron starts on the front face moving straight in (cosine of 1), and
/// the whole ensemble advances one flight at a time.
///
/// Each iteration takes three draws per live neutron (flight length,
/// absorption, new direction cosine), moves it, then classifies it:
///
/// - `x <= 0` is **reflected**
/// - `x >= slab_width` is **transmitted**
/// - an absorption draw below the absorption probability is **absorbed**
/// - anything else survives with the new direction
///
/// Survivors are packed to the front of the working arrays so later
/// iterations only touch live neutrons.
///
/// ```rust
/// # use ntransport_material::Material;
/// # use ntransport_transport::{run_batch_slab, TransportConfig};
/// let water = Material::water();
/// let config = TransportConfig::new().with_seed(1);
///
/// let results = run_batch_slab(10_000, &water, 1.0, &config).unwrap();
/// assert_eq!(results.total(), 10_000);
/// assert!(results.reflected > results.transmitted);
/// ```
///
/// Histories are split into blocks of 4096 and each block draws from its
/// own random stream, so a fixed seed gives identical results sequentially
/// or in parallel.
pub fn run_batch_slab(
    count: u64,
    material: &Material,
    slab_width: f64,
    config: &TransportConfig,
) -> Result<SimulationResults> {
    config.validate()?;
    if material.is_vacuum() {
        return Err(Error::VacuumRegion);
    }
    if !(slab_width.is_finite() && slab_width > 0.0) {
        return Err(Error::InvalidSlabWidth(slab_width));
    }

    debug!("Batch slab: {count} neutrons, width {slab_width}, {material}");
    let streams = config.streams();

    let results = run_sharded(count, config, "Slab", |shard, range| {
        let mut ensemble = Ensemble::new(range.start, range.end - range.start);
        let mut rng = streams.stream(shard);
        ensemble.run(material, slab_width, &mut rng, config)
    })?;

    results.warn_timeouts("Batch slab");
    debug!("Batch slab finished: {results}");
    Ok(results)
}

/// Working arrays for one block of neutrons
///
/// Only the first `active` entries are live.
#[derive(Debug)]
struct Ensemble {
    positions: Vec<f64>,
    cosines: Vec<f64>,
    ids: Vec<u64>,
    active: usize,
}

impl Ensemble {
    /// `count` neutrons on the front face, numbered from `first_id`
    fn new(first_id: u64, count: u64) -> Self {
        let n = count as usize;
        Self {
            positions: vec![0.0; n],
            cosines: vec![1.0; n],
            ids: (first_id..first_id + count).collect(),
            active: n,
        }
    }

    /// Iterate until nothing is left alive or the step limit is reached
    fn run(
        &mut self,
        material: &Material,
        slab_width: f64,
        rng: &mut Stream,
        config: &TransportConfig,
    ) -> SimulationResults {
        let tracer = config.tracer();
        let limit = config.step_limit();
        let mut results = SimulationResults::default();

        for i in 0..self.active {
            emit(tracer, self.ids[i], 0, EventKind::Born, &self.positions[i..=i]);
        }

        let mut step = 0;
        while self.active > 0 {
            if step == limit {
                for i in 0..self.active {
                    let position = &self.positions[i..=i];
                    emit(tracer, self.ids[i], step, EventKind::Terminated(Outcome::TimedOut), position);
                    results.record(Outcome::TimedOut);
                }
                self.active = 0;
                break;
            }
            step += 1;
            self.advance(material, slab_width, rng, config.log_mode, tracer, step, &mut results);
            trace!("Slab iteration {step}: {} neutrons still active", self.active);
        }

        results
    }

    /// One flight for every live neutron, compacting the survivors in place
    #[allow(clippy::too_many_arguments)]
    fn advance(
        &mut self,
        material: &Material,
        slab_width: f64,
        rng: &mut Stream,
        log_mode: LogMode,
        tracer: Option<&dyn Tracer>,
        step: u64,
        results: &mut SimulationResults,
    ) {
        let mean_free_path = material.mean_free_path();
        let absorption_probability = material.absorption_probability();
        let mut kept = 0;

        for i in 0..self.active {
            let flight = free_flight_length(mean_free_path, rng, log_mode);
            let absorb: f64 = rng.gen();
            let cosine = isotropic_cosine(rng);

            let x = self.positions[i] + self.cosines[i] * flight;

            let fate = if x <= 0.0 {
                Some(Outcome::Reflected)
            } else if x >= slab_width {
                Some(Outcome::Transmitted)
            } else if absorb < absorption_probability {
                Some(Outcome::Absorbed)
            } else {
                None
            };

            let id = self.ids[i];
            match fate {
                Some(outcome) => {
                    emit(tracer, id, step, EventKind::Terminated(outcome), &[x]);
                    results.record(outcome);
                }
                None => {
                    emit(tracer, id, step, EventKind::Scatter, &[x]);
                    self.positions[kept] = x;
                    self.cosines[kept] = cosine;
                    self.ids[kept] = id;
                    kept += 1;
                }
            }
        }

        self.active = kept;
    }
}
