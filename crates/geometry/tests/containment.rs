//! Containment and construction checks across shapes and dimensions

use ntransport_geometry::{Error, Vector2, Vector3, Volume};
use rstest::{fixture, rstest};

#[fixture]
fn unit_cube() -> Volume<3> {
    Volume::cuboid(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0)).unwrap()
}

#[rstest]
#[case(Vector3::new(0.0, 0.0, 0.0), true)] // centre
#[case(Vector3::new(1.0, 1.0, 1.0), true)] // corner
#[case(Vector3::new(1.0, 0.0, 1.000001), false)] // just outside in z
#[case(Vector3::new(-1.5, 0.0, 0.0), false)] // outside in x
fn cube_containment(unit_cube: Volume<3>, #[case] point: Vector3, #[case] expected: bool) {
    assert_eq!(unit_cube.contains(&point), expected);
}

#[rstest]
#[case(Vector2::new(2.5, 0.0), true)]
#[case(Vector2::new(0.0, -2.5), true)]
#[case(Vector2::new(2.0, 2.0), false)]
fn circle_containment(#[case] point: Vector2, #[case] expected: bool) {
    let circle = Volume::circle(2.5).unwrap();
    assert_eq!(circle.contains(&point), expected);
}

#[rstest]
#[case(0.0, 0.0)]
#[case(5.0, -5.0)]
#[case(f64::NAN, 5.0)]
fn degenerate_slabs(#[case] x_min: f64, #[case] x_max: f64) {
    assert!(matches!(
        Volume::<3>::slab(x_min, x_max),
        Err(Error::DegenerateSlab { .. })
    ));
}

#[rstest]
#[case(0.0)]
#[case(-2.0)]
fn degenerate_spheres(#[case] radius: f64) {
    assert_eq!(
        Volume::<3>::sphere(radius),
        Err(Error::NonPositiveRadius(radius))
    );
}

#[test]
fn flat_rectangle_is_rejected() {
    let rect = Volume::rectangle(Vector2::new(0.0, 1.0), Vector2::new(4.0, 1.0));
    assert_eq!(
        rect,
        Err(Error::DegenerateCuboid {
            axis: 1,
            min: 1.0,
            max: 1.0
        })
    );
}
