//! Statistical checks on the sampling primitives

use ntransport_geometry::{Vector, Vector2, Vector3};
use ntransport_sampling::{
    free_flight_length, isotropic_cosine, isotropic_direction, Isotropic, LogMode, RngStreams,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

const SAMPLES: usize = 200_000;

/// Mean vector and per-axis second moments of many sampled directions
fn moments<const D: usize>(seed: u64) -> (Vector<D>, Vector<D>)
where
    Vector<D>: Isotropic,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut mean = Vector::<D>::zeros();
    let mut second = Vector::<D>::zeros();
    for _ in 0..SAMPLES {
        let direction: Vector<D> = isotropic_direction(&mut rng);
        mean += direction;
        second += direction.component_mul(&direction);
    }
    (mean / SAMPLES as f64, second / SAMPLES as f64)
}

#[rstest]
#[case(1)]
#[case(2)]
fn sphere_has_no_axis_bias(#[case] seed: u64) {
    let (mean, second) = moments::<3>(seed);

    // each component has variance 1/3, so the mean has sigma ~ 0.0013
    assert!(mean.norm() < 0.01, "mean {mean:?}");
    for m in second.iter() {
        assert!((m - 1.0 / 3.0).abs() < 0.01, "second moments {second:?}");
    }
}

#[rstest]
#[case(3)]
#[case(4)]
fn circle_has_no_axis_bias(#[case] seed: u64) {
    let (mean, second) = moments::<2>(seed);

    assert!(mean.norm() < 0.01, "mean {mean:?}");
    for m in second.iter() {
        assert!((m - 0.5).abs() < 0.01, "second moments {second:?}");
    }
}

#[test]
fn sampled_directions_are_unit_vectors() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..1000 {
        let planar: Vector2 = isotropic_direction(&mut rng);
        let spatial: Vector3 = isotropic_direction(&mut rng);
        assert!((planar.norm() - 1.0).abs() < 1e-12);
        assert!((spatial.norm() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn cosine_matches_sphere_x_component() {
    // both should be uniform on [-1, 1] with mean 0 and second moment 1/3
    let mut rng = StdRng::seed_from_u64(6);
    let (mut sum, mut sum_sq) = (0.0, 0.0);
    for _ in 0..SAMPLES {
        let mu = isotropic_cosine(&mut rng);
        assert!((-1.0..1.0).contains(&mu));
        sum += mu;
        sum_sq += mu * mu;
    }
    assert!((sum / SAMPLES as f64).abs() < 0.01);
    assert!((sum_sq / SAMPLES as f64 - 1.0 / 3.0).abs() < 0.01);
}

#[rstest]
#[case(LogMode::Exact, 0.01)]
#[case(LogMode::Fast, 0.03)]
fn flights_have_the_right_mean(#[case] mode: LogMode, #[case] tolerance: f64) {
    let mut rng = StdRng::seed_from_u64(8);
    let mean_free_path = 100.0 / 0.642;
    let mean = (0..SAMPLES)
        .map(|_| free_flight_length(mean_free_path, &mut rng, mode))
        .sum::<f64>()
        / SAMPLES as f64;
    let relative = (mean - mean_free_path).abs() / mean_free_path;
    assert!(relative < tolerance, "{mode}: mean {mean}");
}

#[test]
fn streams_replay_identically() {
    let streams = RngStreams::new(99);
    let mut a = streams.stream(3);
    let mut b = streams.stream(3);
    for _ in 0..100 {
        let x: Vector3 = isotropic_direction(&mut a);
        let y: Vector3 = isotropic_direction(&mut b);
        assert_eq!(x, y);
    }
}
