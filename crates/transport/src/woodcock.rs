//! Woodcock delta-tracking through several regions
//!
//! Flights are always sampled with the majorant mean free path, so no ray
//! ever has to be intersected with a region boundary. At each tentative
//! collision the region under the neutron decides whether the collision was
//! real or fictitious. Rejecting the right share of collisions reproduces
//! the statistics of tracking with the true local cross-section.

// crate modules
use crate::config::TransportConfig;
use crate::error::Result;
use crate::results::{Outcome, SimulationResults};
use crate::scene::Scene;
use crate::shard::run_sharded;
use crate::trace::{emit, EventKind};

// ntransport modules
use ntransport_geometry::{reference_axis, Vector, Volume};
use ntransport_material::Material;
use ntransport_sampling::{free_flight_length, isotropic_direction, Isotropic, LogMode};

// external crates
use log::debug;
use rand::Rng;

/// Distance along the x axis between the origin and the source point
///
/// Keeps neutrons off the exact boundary of regions that touch the origin.
pub const SOURCE_OFFSET: f64 = 1e-9;

/// State of a single neutron during delta-tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neutron<const D: usize> {
    /// Current position
    pub position: Vector<D>,
    /// Unit direction of travel
    pub direction: Vector<D>,
    /// Whether the last collision was fictitious
    pub fictitious: bool,
}

impl<const D: usize> Neutron<D> {
    /// Neutron at the source point, travelling along +x
    pub fn at_source() -> Self {
        let axis = reference_axis::<D>();
        Self {
            position: axis * SOURCE_OFFSET,
            direction: axis,
            fictitious: false,
        }
    }
}

/// What happened to a neutron during one [delta_step]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Collision rejected, the neutron carries on in the same direction
    Fictitious,
    /// Real collision, the neutron scattered into a new direction
    Scatter,
    /// History is over
    Terminated(Outcome),
}

/// Advance a neutron through one tentative collision
///
/// 1. Fly a distance sampled at the majorant mean free path
/// 2. Find the first region containing the new position, none is **reflected**
/// 3. Unless the previous collision was fictitious, test for **absorption**
/// 4. Accept the collision as real with probability `Σ_region / Σ_majorant`,
///    scattering isotropically, otherwise mark it fictitious
///
/// The draws are made in that order, and this is the only place the physics
/// lives, so one-shot and incremental runs stay identical.
pub fn delta_step<const D: usize, R: Rng + ?Sized>(
    scene: &Scene<D>,
    neutron: &mut Neutron<D>,
    rng: &mut R,
    log_mode: LogMode,
) -> StepResult
where
    Vector<D>: Isotropic,
{
    let flight = free_flight_length(scene.min_mean_free_path(), rng, log_mode);
    neutron.position += neutron.direction * flight;

    let Some(region) = scene.locate(&neutron.position) else {
        return StepResult::Terminated(Outcome::Reflected);
    };

    if !neutron.fictitious && rng.gen::<f64>() < region.material.absorption_probability() {
        return StepResult::Terminated(Outcome::Absorbed);
    }

    if rng.gen::<f64>() > scene.real_collision_probability(region) {
        neutron.fictitious = true;
        StepResult::Fictitious
    } else {
        neutron.direction = isotropic_direction(rng);
        neutron.fictitious = false;
        StepResult::Scatter
    }
}

/// Simulate `count` neutrons through a scene of regions
///
/// `materials[i]` fills `volumes[i]`, and the first listed volume wins where
/// they overlap. Every neutron starts at [SOURCE_OFFSET] on the x axis
/// moving along +x. Leaving every region counts as **reflected**, so the
/// transmitted count is always zero.
///
/// ```rust
/// # use ntransport_geometry::Volume;
/// # use ntransport_material::Material;
/// # use ntransport_transport::{run_woodcock, TransportConfig};
/// let near = Volume::<3>::slab(0.0, 5.0).unwrap();
/// let far = Volume::<3>::slab(5.0, 10.0).unwrap();
/// let config = TransportConfig::new().with_seed(2);
///
/// let results = run_woodcock(
///     2_000,
///     &[Material::water(), Material::lead()],
///     &[&near, &far],
///     &config,
/// )
/// .unwrap();
/// assert_eq!(results.reflected + results.absorbed, 2_000);
/// assert_eq!(results.transmitted, 0);
/// ```
pub fn run_woodcock<const D: usize>(
    count: u64,
    materials: &[Material],
    volumes: &[&Volume<D>],
    config: &TransportConfig,
) -> Result<SimulationResults>
where
    Vector<D>: Isotropic,
{
    config.validate()?;
    let scene = Scene::new(materials, volumes)?;

    debug!("Woodcock: {count} neutrons through {} regions", scene.regions().len());
    let streams = config.streams();

    let results = run_sharded(count, config, "Woodcock", |_, range| {
        range
            .map(|index| track(index, &scene, config, &mut streams.stream(index)))
            .collect()
    })?;

    results.warn_timeouts("Woodcock");
    debug!("Woodcock finished: {results}");
    Ok(results)
}

/// Two region form of [run_woodcock]
///
/// `volume1` takes priority over `volume2` where they overlap.
pub fn run_woodcock_pair<const D: usize>(
    count: u64,
    material1: &Material,
    material2: &Material,
    volume1: &Volume<D>,
    volume2: &Volume<D>,
    config: &TransportConfig,
) -> Result<SimulationResults>
where
    Vector<D>: Isotropic,
{
    run_woodcock(count, &[*material1, *material2], &[volume1, volume2], config)
}

/// Full history of one neutron
fn track<const D: usize, R: Rng + ?Sized>(
    index: u64,
    scene: &Scene<D>,
    config: &TransportConfig,
    rng: &mut R,
) -> Outcome
where
    Vector<D>: Isotropic,
{
    let tracer = config.tracer();
    let mut neutron = Neutron::<D>::at_source();
    emit(tracer, index, 0, EventKind::Born, neutron.position.as_slice());

    for step in 1..=config.step_limit() {
        let kind = match delta_step(scene, &mut neutron, rng, config.log_mode) {
            StepResult::Fictitious => EventKind::Fictitious,
            StepResult::Scatter => EventKind::Scatter,
            StepResult::Terminated(outcome) => {
                emit(tracer, index, step, EventKind::Terminated(outcome), neutron.position.as_slice());
                return outcome;
            }
        };
        emit(tracer, index, step, kind, neutron.position.as_slice());
    }

    emit(
        tracer,
        index,
        config.step_limit(),
        EventKind::Terminated(Outcome::TimedOut),
        neutron.position.as_slice(),
    );
    Outcome::TimedOut
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntransport_geometry::Vector3;
    use rand::rngs::mock::StepRng;

    #[test]
    fn source_is_just_off_the_origin() {
        let neutron = Neutron::<3>::at_source();
        assert_eq!(neutron.position, Vector3::new(SOURCE_OFFSET, 0.0, 0.0));
        assert_eq!(neutron.direction, Vector3::new(1.0, 0.0, 0.0));
        assert!(!neutron.fictitious);
    }

    #[test]
    fn leaving_every_region_is_reflected() {
        let slab = Volume::<3>::slab(-1.0, 0.0).unwrap();
        let scene = Scene::new(&[Material::water()], &[&slab]).unwrap();
        let mut neutron = Neutron::<3>::at_source();

        // draws of 0.5, so a flight of ln(2) / 3.47 along +x
        let mut rng = StepRng::new(1 << 63, 0);
        let result = delta_step(&scene, &mut neutron, &mut rng, LogMode::Exact);
        assert_eq!(result, StepResult::Terminated(Outcome::Reflected));
        assert!(neutron.position.x > 0.1);
    }

    #[test]
    fn fictitious_collisions_keep_direction_and_skip_absorption() {
        // a region at a tenth of the majorant, with certain absorption
        let near = Volume::<3>::slab(0.0, 100.0).unwrap();
        let far = Volume::<3>::slab(100.0, 200.0).unwrap();
        let thin = Material::new(0.1, 1.0).unwrap();
        let thick = Material::new(1.0, 0.5).unwrap();
        let scene = Scene::new(&[thin, thick], &[&near, &far]).unwrap();

        let mut neutron = Neutron::<3>::at_source();
        neutron.fictitious = true;

        // every draw is 0.5, above the 0.1 chance of a real collision
        let mut rng = StepRng::new(1 << 63, 0);
        let result = delta_step(&scene, &mut neutron, &mut rng, LogMode::Exact);
        assert_eq!(result, StepResult::Fictitious);
        assert_eq!(neutron.direction, Vector3::new(1.0, 0.0, 0.0));
        assert!(neutron.fictitious);
    }

    #[test]
    fn absorption_is_tested_after_a_real_collision() {
        let near = Volume::<3>::slab(0.0, 100.0).unwrap();
        let scene = Scene::new(&[Material::new(1.0, 1.0).unwrap()], &[&near]).unwrap();
        let mut neutron = Neutron::<3>::at_source();

        let mut rng = StepRng::new(1 << 63, 0);
        let result = delta_step(&scene, &mut neutron, &mut rng, LogMode::Exact);
        assert_eq!(result, StepResult::Terminated(Outcome::Absorbed));
    }
}
