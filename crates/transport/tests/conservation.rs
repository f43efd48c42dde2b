//! Every history ends in exactly one outcome, for every engine

use ntransport_geometry::{Vector2, Vector3, Volume};
use ntransport_material::Material;
use ntransport_sampling::LogMode;
use ntransport_transport::{
    run_batch_slab, run_single_region, run_woodcock, run_woodcock_pair, Error, Event, EventKind,
    Outcome, Simulation, TransportConfig,
};
use rstest::{fixture, rstest};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[fixture]
fn config() -> TransportConfig {
    TransportConfig::new().with_seed(20_240_601)
}

#[rstest]
#[case(Material::water(), 1.0)]
#[case(Material::lead(), 10.0)]
#[case(Material::graphite(), 0.5)]
#[case(Material::new(0.00642, 0.00642).unwrap(), 10.0)]
fn batch_slab_counts(config: TransportConfig, #[case] material: Material, #[case] width: f64) {
    let results = run_batch_slab(20_000, &material, width, &config).unwrap();
    assert_eq!(results.total(), 20_000);
    assert_eq!(results.timed_out, 0);
}

#[rstest]
#[case(Volume::slab(0.0, 10.0).unwrap())]
#[case(Volume::sphere(3.0).unwrap())]
#[case(Volume::cuboid(Vector3::new(-1.0, -2.0, -3.0), Vector3::new(1.0, 2.0, 3.0)).unwrap())]
fn single_region_counts_3d(config: TransportConfig, #[case] volume: Volume<3>) {
    let results = run_single_region(20_000, &Material::water(), &volume, &config).unwrap();
    assert_eq!(results.reflected + results.absorbed, 20_000);
    assert_eq!(results.transmitted, 0);
}

#[rstest]
#[case(Volume::circle(2.5).unwrap())]
#[case(Volume::rectangle(Vector2::new(-1.0, -1.0), Vector2::new(4.0, 1.0)).unwrap())]
fn single_region_counts_2d(config: TransportConfig, #[case] volume: Volume<2>) {
    let results = run_single_region(20_000, &Material::lead(), &volume, &config).unwrap();
    assert_eq!(results.reflected + results.absorbed, 20_000);
}

#[rstest]
fn woodcock_counts(config: TransportConfig) {
    let circle = Volume::<2>::circle(2.5).unwrap();
    let graphite = Volume::<2>::slab(-10.0, 0.0).unwrap();
    let water = Volume::<2>::slab(5.0, 10.0).unwrap();

    let results = run_woodcock(
        20_000,
        &[Material::lead(), Material::graphite(), Material::water()],
        &[&circle, &graphite, &water],
        &config,
    )
    .unwrap();

    assert_eq!(results.reflected + results.absorbed, 20_000);
    assert_eq!(results.transmitted, 0);
}

#[rstest]
fn vacuum_gaps_are_crossed(config: TransportConfig) {
    // the neutron has to cross a vacuum gap to reach the far slab
    let near = Volume::<3>::slab(0.0, 1.0).unwrap();
    let gap = Volume::<3>::slab(1.0, 2.0).unwrap();
    let far = Volume::<3>::slab(2.0, 3.0).unwrap();

    let in_far = Arc::new(AtomicU64::new(0));
    let in_gap = Arc::new(AtomicU64::new(0));
    let (far_count, gap_count) = (in_far.clone(), in_gap.clone());

    // real collisions only, fictitious ones happen everywhere
    let config = config.with_tracer(move |event: &Event| {
        let real = matches!(
            event.kind,
            EventKind::Scatter | EventKind::Terminated(Outcome::Absorbed)
        );
        let x = event.position[0];
        if real && x > 2.0 {
            far_count.fetch_add(1, Ordering::Relaxed);
        }
        if real && x > 1.0 && x < 2.0 {
            gap_count.fetch_add(1, Ordering::Relaxed);
        }
    });

    let results = run_woodcock(
        10_000,
        &[Material::water(), Material::vacuum(), Material::lead()],
        &[&near, &gap, &far],
        &config,
    )
    .unwrap();
    assert_eq!(results.total(), 10_000);
    assert!(in_far.load(Ordering::Relaxed) > 0, "nothing collided in the far slab");
    assert_eq!(in_gap.load(Ordering::Relaxed), 0);
}

#[rstest]
#[case(LogMode::Exact)]
#[case(LogMode::Fast)]
fn incremental_counts(config: TransportConfig, #[case] log_mode: LogMode) {
    let near = Volume::<2>::slab(0.0, 5.0).unwrap();
    let far = Volume::<2>::slab(5.0, 10.0).unwrap();
    let materials = [Material::graphite(), Material::water()];
    let config = config.with_log_mode(log_mode);

    let mut simulation = Simulation::new(5_000, &materials, &[&near, &far], &config).unwrap();
    let mut alive = simulation.alive_count();
    while !simulation.is_finished() {
        simulation.step();
        // nothing comes back to life, and the dead are tallied
        assert!(simulation.alive_count() <= alive);
        alive = simulation.alive_count();
        assert_eq!(simulation.results().total() as usize + alive, 5_000);
    }
    assert_eq!(simulation.alive_flags().len(), 5_000);
    assert_eq!(simulation.positions().len(), 5_000);
}

#[rstest]
fn zero_particles_are_allowed(config: TransportConfig) {
    let slab = Volume::<3>::slab(0.0, 1.0).unwrap();
    let results = run_single_region(0, &Material::water(), &slab, &config).unwrap();
    assert_eq!(results.total(), 0);
    assert_eq!(results.fraction(Outcome::Reflected), 0.0);
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
#[case(f64::INFINITY)]
#[case(f64::NAN)]
fn bad_slab_widths(config: TransportConfig, #[case] width: f64) {
    let result = run_batch_slab(10, &Material::water(), width, &config);
    assert!(matches!(result, Err(Error::InvalidSlabWidth(_))));
}

#[rstest]
fn zero_step_limit_is_rejected(config: TransportConfig) {
    let slab = Volume::<3>::slab(0.0, 1.0).unwrap();
    let config = config.with_max_steps(Some(0));
    let result = run_woodcock_pair(10, &Material::water(), &Material::lead(), &slab, &slab, &config);
    assert!(matches!(result, Err(Error::ZeroStepLimit)));
}
