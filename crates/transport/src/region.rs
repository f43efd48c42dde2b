//! Per-particle engine for a single region of any shape

// crate modules
use crate::config::TransportConfig;
use crate::error::{Error, Result};
use crate::results::{Outcome, SimulationResults};
use crate::shard::run_sharded;
use crate::trace::{emit, EventKind};

// ntransport modules
use ntransport_geometry::{reference_axis, Vector, Volume};
use ntransport_material::Material;
use ntransport_sampling::{free_flight_length, isotropic_direction, Isotropic, Stream};

// external crates
use log::debug;
use rand::Rng;

/// Simulate `count` neutrons born at the origin inside a single `volume`
///
/// The first flight of each neutron is along the x axis, modelling a beam,
/// and every flight after that follows an isotropic scatter. A neutron that
/// ends a flight outside the volume is **reflected**; otherwise it is
/// **absorbed** with the material's absorption probability. There is only
/// one region, so nothing is ever transmitted.
///
/// Walks that survive `config.max_steps` flights are counted as timed out.
///
/// ```rust
/// # use ntransport_geometry::Volume;
/// # use ntransport_material::Material;
/// # use ntransport_transport::{run_single_region, TransportConfig};
/// let lead = Material::lead();
/// let sphere = Volume::<3>::sphere(5.0).unwrap();
/// let config = TransportConfig::new().with_seed(9);
///
/// let results = run_single_region(5_000, &lead, &sphere, &config).unwrap();
/// assert_eq!(results.reflected + results.absorbed, 5_000);
/// ```
pub fn run_single_region<const D: usize>(
    count: u64,
    material: &Material,
    volume: &Volume<D>,
    config: &TransportConfig,
) -> Result<SimulationResults>
where
    Vector<D>: Isotropic,
{
    config.validate()?;
    volume.validate()?;
    if material.is_vacuum() {
        return Err(Error::VacuumRegion);
    }

    debug!("Single region: {count} neutrons, {volume}, {material}");
    let streams = config.streams();

    let results = run_sharded(count, config, volume.name(), |_, range| {
        range
            .map(|index| walk(index, material, volume, &mut streams.stream(index), config))
            .collect()
    })?;

    results.warn_timeouts("Single region");
    debug!("Single region finished: {results}");
    Ok(results)
}

/// Full random walk of one neutron
fn walk<const D: usize>(
    index: u64,
    material: &Material,
    volume: &Volume<D>,
    rng: &mut Stream,
    config: &TransportConfig,
) -> Outcome
where
    Vector<D>: Isotropic,
{
    let tracer = config.tracer();
    let mean_free_path = material.mean_free_path();
    let absorption_probability = material.absorption_probability();

    let mut position = Vector::<D>::zeros();
    let mut direction = reference_axis::<D>();
    emit(tracer, index, 0, EventKind::Born, position.as_slice());

    for step in 1..=config.step_limit() {
        let flight = free_flight_length(mean_free_path, rng, config.log_mode);
        let absorb: f64 = rng.gen();
        if step > 1 {
            direction = isotropic_direction(rng);
        }
        position += direction * flight;

        let outcome = if !volume.contains(&position) {
            Outcome::Reflected
        } else if absorb < absorption_probability {
            Outcome::Absorbed
        } else {
            emit(tracer, index, step, EventKind::Scatter, position.as_slice());
            continue;
        };

        emit(tracer, index, step, EventKind::Terminated(outcome), position.as_slice());
        return outcome;
    }

    emit(tracer, index, config.step_limit(), EventKind::Terminated(Outcome::TimedOut), position.as_slice());
    Outcome::TimedOut
}
