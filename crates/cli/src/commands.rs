//! One function per subcommand

use std::time::Instant;

// crate modules
use crate::args::{MaterialArgs, RunArgs, Shape, SlabMaterials};
use crate::report::{Frame, Report};

// ntransport modules
use ntransport_geometry::{Vector, Volume};
use ntransport_material::Material;
use ntransport_sampling::Isotropic;
use ntransport_transport::{
    run_batch_slab, run_single_region, run_woodcock_pair, Simulation, SimulationResults,
    TransportConfig,
};

// external crates
use anyhow::{Context, Result};
use kdam::{BarBuilder, BarExt};
use log::{debug, warn};

/// Batch engine over `[0, width]`
pub fn slab(
    run: &RunArgs,
    config: &TransportConfig,
    width: f64,
    material: &MaterialArgs,
) -> Result<()> {
    let material = material.material()?;
    let start = Instant::now();
    let results = run_batch_slab(run.particles, &material, width, config)
        .context("batch slab run failed")?;

    let description = format!("{material}, x = [0, {width}]");
    Report::new("Batch slab", description, config.seed, results, start.elapsed()).print(run.json)
}

/// Single-region engine in 2D or 3D
pub fn volume(
    run: &RunArgs,
    config: &TransportConfig,
    shape: Shape,
    size: f64,
    dim: u8,
    material: &MaterialArgs,
) -> Result<()> {
    let material = material.material()?;
    match dim {
        2 => single_region::<2>(run, config, shape, size, &material),
        _ => single_region::<3>(run, config, shape, size, &material),
    }
}

fn single_region<const D: usize>(
    run: &RunArgs,
    config: &TransportConfig,
    shape: Shape,
    size: f64,
    material: &Material,
) -> Result<()>
where
    Vector<D>: Isotropic,
{
    let volume = match shape {
        Shape::Slab => Volume::<D>::slab(0.0, size),
        Shape::Sphere => Volume::<D>::sphere(size),
        Shape::Cuboid => Volume::<D>::cuboid(
            Vector::<D>::repeat(-size),
            Vector::<D>::repeat(size),
        ),
    }
    .context("invalid volume")?;

    let start = Instant::now();
    let results = run_single_region(run.particles, material, &volume, config)
        .context("single region run failed")?;

    let description = format!("{material}, {volume}");
    Report::new("Single region", description, config.seed, results, start.elapsed())
        .print(run.json)
}

/// Woodcock engine over two abutting slabs, `[0, split]` and `[split, width]`
pub fn woodcock(
    run: &RunArgs,
    config: &TransportConfig,
    slabs: &SlabMaterials,
    split: f64,
    width: f64,
    dim: u8,
) -> Result<()> {
    let (first, second) = slabs.materials()?;
    match dim {
        2 => two_slabs::<2>(run, config, &first, &second, split, width),
        _ => two_slabs::<3>(run, config, &first, &second, split, width),
    }
}

fn two_slabs<const D: usize>(
    run: &RunArgs,
    config: &TransportConfig,
    first: &Material,
    second: &Material,
    split: f64,
    width: f64,
) -> Result<()>
where
    Vector<D>: Isotropic,
{
    let near = Volume::<D>::slab(0.0, split).context("invalid first slab")?;
    let far = Volume::<D>::slab(split, width).context("invalid second slab")?;

    let start = Instant::now();
    let results = run_woodcock_pair(run.particles, first, second, &near, &far, config)
        .context("Woodcock run failed")?;

    let description = format!("{} | {}", first.kind(), second.kind());
    Report::new("Woodcock", description, config.seed, results, start.elapsed()).print(run.json)
}

/// Step the incremental engine through the demo scene, one line per frame
pub fn animate(
    run: &RunArgs,
    config: &TransportConfig,
    frames: Option<u64>,
    every: u64,
    isotropic: bool,
) -> Result<()> {
    let circle = Volume::<2>::circle(2.5)?;
    let graphite = Volume::<2>::slab(-10.0, 0.0)?;
    let water = Volume::<2>::slab(5.0, 10.0)?;
    let materials = [Material::lead(), Material::graphite(), Material::water()];

    let mut simulation = Simulation::new(
        run.particles as usize,
        &materials,
        &[&circle, &graphite, &water],
        config,
    )?;
    if isotropic {
        simulation.set_isotropic_initial_directions()?;
    }
    debug!("Animating with seed {}", simulation.seed());

    let mut bar = BarBuilder::default()
        .total(run.particles as usize)
        .unit(" neutrons")
        .disable(!run.progress)
        .bar_format("Animating: {count}/{total} finished [{rate:.2} neutrons/s]  ")
        .build()
        .map_err(anyhow::Error::msg)?;

    let mut finished = 0;
    while !simulation.is_finished() {
        if frames.is_some_and(|limit| simulation.steps_taken() >= limit) {
            warn!(
                "Stopped after {} frames with {} neutrons alive",
                simulation.steps_taken(),
                simulation.alive_count()
            );
            break;
        }

        simulation.step();

        let done = simulation.results().total() as usize;
        bar.update(done - finished)?;
        finished = done;

        let frame = simulation.steps_taken();
        if !run.progress && (frame % every == 0 || simulation.is_finished()) {
            Frame {
                frame,
                alive: simulation.alive_count(),
                results: simulation.results(),
            }
            .print(run.json)?;
        }
    }

    if run.progress {
        eprintln!();
    }
    Ok(())
}

/// Benchmark sequence: batch slab, two single-region runs, then Woodcock
pub fn demo(run: &RunArgs, config: &TransportConfig) -> Result<()> {
    let water = Material::water();
    let graphite = Material::graphite();
    let slab = Volume::<3>::slab(0.0, 10.0)?;
    let near = Volume::<3>::slab(0.0, 5.0)?;
    let far = Volume::<3>::slab(5.0, 10.0)?;

    let timed = |engine: &'static str, description: String, f: &dyn Fn() -> ntransport_transport::Result<SimulationResults>| -> Result<()> {
        let start = Instant::now();
        let results = f().with_context(|| format!("{engine} run failed"))?;
        Report::new(engine, description, config.seed, results, start.elapsed()).print(run.json)
    };

    timed("Batch slab", format!("{water}, x = [0, 10]"), &|| {
        run_batch_slab(run.particles, &water, 10.0, config)
    })?;
    timed("Single region", format!("{water}, {slab}"), &|| {
        run_single_region(run.particles, &water, &slab, config)
    })?;
    timed("Single region", format!("{graphite}, {slab}"), &|| {
        run_single_region(run.particles, &graphite, &slab, config)
    })?;
    timed("Woodcock", format!("{graphite} split at x = 5"), &|| {
        run_woodcock_pair(run.particles, &graphite, &graphite, &near, &far, config)
    })?;

    Ok(())
}
