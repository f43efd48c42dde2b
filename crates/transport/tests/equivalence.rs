//! Statistical and bitwise agreement between engines

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ntransport_geometry::Volume;
use ntransport_material::Material;
use ntransport_transport::{
    run_batch_slab, run_single_region, run_woodcock, run_woodcock_pair, Event, EventKind,
    Outcome, Simulation, SimulationResults, TransportConfig,
};
use rstest::rstest;

/// Number of combined standard errors allowed between two estimates
const TOLERANCE: f64 = 5.0;

fn assert_agree(a: &SimulationResults, b: &SimulationResults, outcome: Outcome) {
    let difference = (a.fraction(outcome) - b.fraction(outcome)).abs();
    let sigma = a.standard_error(outcome).hypot(b.standard_error(outcome));
    assert!(
        difference <= TOLERANCE * sigma,
        "{outcome}: {} vs {} (sigma {sigma})",
        a.fraction(outcome),
        b.fraction(outcome)
    );
}

#[test]
fn split_slab_matches_merged_slab() {
    let n = 100_000;
    let merged = Volume::<3>::slab(0.0, 10.0).unwrap();
    let near = Volume::<3>::slab(0.0, 5.0).unwrap();
    let far = Volume::<3>::slab(5.0, 10.0).unwrap();
    let graphite = Material::graphite();

    let reference = run_single_region(n, &graphite, &merged, &TransportConfig::new().with_seed(1)).unwrap();
    let woodcock = run_woodcock_pair(
        n,
        &graphite,
        &graphite,
        &near,
        &far,
        &TransportConfig::new().with_seed(2),
    )
    .unwrap();

    assert_agree(&reference, &woodcock, Outcome::Reflected);
    assert_agree(&reference, &woodcock, Outcome::Absorbed);
}

#[rstest]
#[case(true)]
#[case(false)]
fn incremental_matches_one_shot(#[case] parallel: bool) {
    let circle = Volume::<2>::circle(2.5).unwrap();
    let graphite = Volume::<2>::slab(-10.0, 0.0).unwrap();
    let water = Volume::<2>::slab(5.0, 10.0).unwrap();
    let materials = [Material::lead(), Material::graphite(), Material::water()];
    let volumes = [&circle, &graphite, &water];

    let mut config = TransportConfig::new().with_seed(99);
    config.parallel = parallel;

    let one_shot = run_woodcock(20_000, &materials, &volumes, &config).unwrap();
    let mut simulation = Simulation::new(20_000, &materials, &volumes, &config).unwrap();
    let stepped = simulation.run_to_completion();

    assert_eq!(stepped, one_shot);
}

#[test]
fn fixed_seed_is_reproducible() {
    let near = Volume::<3>::slab(0.0, 5.0).unwrap();
    let far = Volume::<3>::slab(5.0, 10.0).unwrap();
    let materials = [Material::water(), Material::lead()];
    let config = TransportConfig::new().with_seed(5);

    let mut a = Simulation::new(2_000, &materials, &[&near, &far], &config).unwrap();
    let mut b = Simulation::new(2_000, &materials, &[&near, &far], &config.clone().sequential()).unwrap();
    for _ in 0..25 {
        a.step();
        b.step();
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.alive_flags(), b.alive_flags());
    }

    let slab = Material::new(0.00642, 0.00642).unwrap();
    let first = run_batch_slab(50_000, &slab, 10.0, &config).unwrap();
    let second = run_batch_slab(50_000, &slab, 10.0, &config.clone().sequential()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn near_vacuum_absorbs_nothing() {
    let material = Material::new(1.0, 1e-9).unwrap();
    let everywhere = Volume::<3>::slab(f64::NEG_INFINITY, f64::INFINITY).unwrap();
    let config = TransportConfig::new().with_seed(6).with_max_steps(Some(1_000));

    let results = run_single_region(10_000, &material, &everywhere, &config).unwrap();
    assert!(results.absorbed <= 2, "absorbed {}", results.absorbed);
    assert_eq!(results.reflected, 0);
    assert_eq!(results.transmitted, 0);
    // nothing leaves an unbounded region, so every survivor hits the step limit
    assert_eq!(results.timed_out, 10_000 - results.absorbed);
}

#[test]
fn tracer_sees_every_history_end() {
    let ended = Arc::new(AtomicU64::new(0));
    let born = Arc::new(AtomicU64::new(0));
    let (ended_count, born_count) = (ended.clone(), born.clone());

    let config = TransportConfig::new()
        .with_seed(8)
        .with_tracer(move |event: &Event| match event.kind {
            EventKind::Born => {
                born_count.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::Terminated(_) => {
                ended_count.fetch_add(1, Ordering::Relaxed);
            }
            _ => (),
        });

    let near = Volume::<3>::slab(0.0, 5.0).unwrap();
    let far = Volume::<3>::slab(5.0, 10.0).unwrap();
    run_woodcock_pair(3_000, &Material::water(), &Material::graphite(), &near, &far, &config).unwrap();

    assert_eq!(born.load(Ordering::Relaxed), 3_000);
    assert_eq!(ended.load(Ordering::Relaxed), 3_000);
}
