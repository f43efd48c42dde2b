//! Isotropic direction sampling

use std::f64::consts::PI;

// ntransport modules
use ntransport_geometry::{Vector2, Vector3};

// external crates
use rand::Rng;

/// Directions that can be sampled uniformly over all angles
///
/// Implemented for [Vector2] (unit circle) and [Vector3] (unit sphere), which
/// lets the engines stay generic over the problem dimension.
pub trait Isotropic: Sized {
    /// Uniformly distributed unit vector
    fn isotropic<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl Isotropic for Vector2 {
    fn isotropic<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let theta = 2.0 * PI * rng.gen::<f64>();
        Vector2::new(theta.cos(), theta.sin())
    }
}

impl Isotropic for Vector3 {
    /// Standard uniform-sphere transform
    ///
    /// `phi` is uniform in azimuth and `cos(theta)` is uniform in [-1, 1],
    /// which gives equal probability per unit solid angle.
    fn isotropic<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let phi = 2.0 * PI * rng.gen::<f64>();
        let theta = (1.0 - 2.0 * rng.gen::<f64>()).acos();
        let sin_theta = theta.sin();
        Vector3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), theta.cos())
    }
}

/// Unit direction sampled uniformly over the circle or sphere
///
/// The dimension is picked by the requested type.
///
/// ```rust
/// # use ntransport_geometry::Vector3;
/// # use ntransport_sampling::isotropic_direction;
/// # use rand::{rngs::StdRng, SeedableRng};
/// let mut rng = StdRng::seed_from_u64(1);
/// let direction: Vector3 = isotropic_direction(&mut rng);
/// assert!((direction.norm() - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn isotropic_direction<V: Isotropic, R: Rng + ?Sized>(rng: &mut R) -> V {
    V::isotropic(rng)
}

/// Direction cosine to the x axis for an isotropic 3D direction
///
/// For a direction uniform on the sphere the x component is uniform in
/// [-1, 1], so one draw is enough for slab problems that only track x.
#[inline]
pub fn isotropic_cosine<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    2.0 * rng.gen::<f64>() - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn zero_draws_point_along_axes() {
        // every draw is exactly 0.0
        let mut rng = StepRng::new(0, 0);

        let planar: Vector2 = isotropic_direction(&mut rng);
        assert_eq!(planar, Vector2::new(1.0, 0.0));

        // theta = acos(1) = 0, straight up the z axis
        let spatial: Vector3 = isotropic_direction(&mut rng);
        assert_eq!(spatial, Vector3::new(0.0, 0.0, 1.0));

        assert_eq!(isotropic_cosine(&mut rng), -1.0);
    }
}
