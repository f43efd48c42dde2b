//! Incremental delta-tracking for frame by frame consumers

// crate modules
use crate::config::TransportConfig;
use crate::error::{Error, Result};
use crate::results::{Outcome, SimulationResults};
use crate::scene::Scene;
use crate::trace::{emit, EventKind, Tracer};
use crate::woodcock::{delta_step, Neutron, StepResult};

// ntransport modules
use ntransport_geometry::{Vector, Volume};
use ntransport_material::Material;
use ntransport_sampling::{isotropic_direction, Isotropic, LogMode, Stream};

// external crates
use log::debug;
use rayon::prelude::*;

/// Resumable Woodcock simulation
///
/// Owns the state of every neutron between calls to [step()](Self::step),
/// so a driver such as an animation loop can look at positions after each
/// iteration. The physics is exactly that of
/// [run_woodcock()](crate::run_woodcock): each neutron draws from the same
/// random stream in both forms, so stepping to the end with the same seed
/// gives identical counts.
///
/// ```rust
/// # use ntransport_geometry::Volume;
/// # use ntransport_material::Material;
/// # use ntransport_transport::{run_woodcock, Simulation, TransportConfig};
/// let near = Volume::<2>::slab(0.0, 5.0).unwrap();
/// let far = Volume::<2>::slab(5.0, 10.0).unwrap();
/// let materials = [Material::graphite(), Material::water()];
/// let config = TransportConfig::new().with_seed(77);
///
/// let mut simulation = Simulation::new(1_000, &materials, &[&near, &far], &config).unwrap();
/// while !simulation.is_finished() {
///     simulation.step();
///     let _frame = simulation.positions();
/// }
///
/// let one_shot = run_woodcock(1_000, &materials, &[&near, &far], &config).unwrap();
/// assert_eq!(simulation.results(), one_shot);
/// ```
///
/// Stepping needs `&mut self`, so the borrow checker rules out two threads
/// stepping the same simulation. Within a step the neutrons are spread over
/// the rayon pool unless the configuration is sequential.
#[derive(Debug)]
pub struct Simulation<'a, const D: usize> {
    scene: Scene<'a, D>,
    neutrons: Vec<Neutron<D>>,
    alive: Vec<bool>,
    streams: Vec<Stream>,
    results: SimulationResults,
    steps_taken: u64,
    seed: u64,
    config: TransportConfig,
}

impl<'a, const D: usize> Simulation<'a, D>
where
    Vector<D>: Isotropic,
{
    /// Set up `particle_count` neutrons at the source
    ///
    /// `materials[i]` fills `volumes[i]`. The majorant is found once here.
    pub fn new(
        particle_count: usize,
        materials: &[Material],
        volumes: &[&'a Volume<D>],
        config: &TransportConfig,
    ) -> Result<Self> {
        config.validate()?;
        let scene = Scene::new(materials, volumes)?;
        let rng_streams = config.streams();

        let neutrons = vec![Neutron::<D>::at_source(); particle_count];
        let streams = (0..particle_count as u64)
            .map(|index| rng_streams.stream(index))
            .collect::<Vec<Stream>>();

        for (index, neutron) in neutrons.iter().enumerate() {
            emit(config.tracer(), index as u64, 0, EventKind::Born, neutron.position.as_slice());
        }

        debug!(
            "Incremental Woodcock: {particle_count} neutrons through {} regions",
            scene.regions().len()
        );

        Ok(Self {
            scene,
            neutrons,
            alive: vec![true; particle_count],
            streams,
            results: SimulationResults::default(),
            steps_taken: 0,
            seed: rng_streams.seed(),
            config: config.clone(),
        })
    }

    /// Point every neutron in a random direction instead of along +x
    ///
    /// Only allowed before the first step. The draws come from each
    /// neutron's own stream, so the run no longer matches the one-shot form.
    pub fn set_isotropic_initial_directions(&mut self) -> Result<()> {
        if self.steps_taken > 0 {
            return Err(Error::SimulationStarted);
        }
        for (neutron, rng) in self.neutrons.iter_mut().zip(self.streams.iter_mut()) {
            neutron.direction = isotropic_direction(rng);
        }
        Ok(())
    }

    /// Advance every live neutron through one tentative collision
    ///
    /// Does nothing once every neutron is dead. Neutrons still alive when
    /// the step limit is reached are tallied as timed out.
    pub fn step(&mut self) {
        if self.is_finished() {
            return;
        }
        self.steps_taken += 1;

        let step = self.steps_taken;
        let scene = &self.scene;
        let log_mode = self.config.log_mode;
        let tracer = self.config.tracer.as_deref();

        let tally: SimulationResults = if self.config.parallel {
            self.neutrons
                .par_iter_mut()
                .zip(self.alive.par_iter_mut())
                .zip(self.streams.par_iter_mut())
                .enumerate()
                .map(|(index, ((neutron, alive), rng))| {
                    advance(scene, index, neutron, alive, rng, step, log_mode, tracer)
                })
                .sum()
        } else {
            self.neutrons
                .iter_mut()
                .zip(self.alive.iter_mut())
                .zip(self.streams.iter_mut())
                .enumerate()
                .map(|(index, ((neutron, alive), rng))| {
                    advance(scene, index, neutron, alive, rng, step, log_mode, tracer)
                })
                .sum()
        };
        self.results += tally;

        if self.steps_taken >= self.config.step_limit() {
            for (index, (neutron, alive)) in self.neutrons.iter().zip(self.alive.iter_mut()).enumerate() {
                if *alive {
                    *alive = false;
                    self.results.record(Outcome::TimedOut);
                    emit(
                        tracer,
                        index as u64,
                        step,
                        EventKind::Terminated(Outcome::TimedOut),
                        neutron.position.as_slice(),
                    );
                }
            }
            self.results.warn_timeouts("Incremental Woodcock");
        }

        if self.is_finished() {
            debug!("Incremental Woodcock finished after {step} steps: {}", self.results);
        }
    }

    /// Step until every neutron is dead and return the final tallies
    pub fn run_to_completion(&mut self) -> SimulationResults {
        while !self.is_finished() {
            self.step();
        }
        self.results
    }

    /// Snapshot of every neutron position, dead ones stay where they died
    pub fn positions(&self) -> Vec<Vector<D>> {
        self.neutrons.iter().map(|n| n.position).collect()
    }

    /// Current direction of every neutron
    pub fn directions(&self) -> Vec<Vector<D>> {
        self.neutrons.iter().map(|n| n.direction).collect()
    }

    /// Whether each neutron is still alive
    pub fn alive_flags(&self) -> &[bool] {
        &self.alive
    }

    /// Number of neutrons still alive
    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    /// True once every neutron has been absorbed, reflected or timed out
    pub fn is_finished(&self) -> bool {
        !self.alive.contains(&true)
    }

    /// Tallies of the neutrons that have died so far
    pub fn results(&self) -> SimulationResults {
        self.results
    }

    /// Number of calls to [step()](Self::step) that did any work
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Master seed, fixed or drawn from entropy
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Scene the neutrons are moving through
    pub fn scene(&self) -> &Scene<'a, D> {
        &self.scene
    }
}

/// One tentative collision for a single neutron, if it is still alive
#[allow(clippy::too_many_arguments)]
fn advance<const D: usize>(
    scene: &Scene<D>,
    index: usize,
    neutron: &mut Neutron<D>,
    alive: &mut bool,
    rng: &mut Stream,
    step: u64,
    log_mode: LogMode,
    tracer: Option<&dyn Tracer>,
) -> SimulationResults
where
    Vector<D>: Isotropic,
{
    let mut tally = SimulationResults::default();
    if !*alive {
        return tally;
    }

    let kind = match delta_step(scene, neutron, rng, log_mode) {
        StepResult::Fictitious => EventKind::Fictitious,
        StepResult::Scatter => EventKind::Scatter,
        StepResult::Terminated(outcome) => {
            *alive = false;
            tally.record(outcome);
            EventKind::Terminated(outcome)
        }
    };
    emit(tracer, index as u64, step, kind, neutron.position.as_slice());
    tally
}
