//! Free flight sampling

// external crates
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Logarithm used when sampling free flights
///
/// The choice is part of the numerical contract of a run, so it is always
/// passed explicitly rather than switched globally.
///
/// - **Exact** - `f64::ln`
/// - **Fast** - [fast_ln], a bit-level approximation with an absolute error
///   below 0.04 that biases the tail of the flight distribution slightly
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogMode {
    #[default]
    Exact,
    Fast,
}

impl LogMode {
    /// Natural logarithm using the selected method
    #[inline]
    pub fn ln(self, x: f64) -> f64 {
        match self {
            Self::Exact => x.ln(),
            Self::Fast => fast_ln(x),
        }
    }
}

impl std::fmt::Display for LogMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Fast => write!(f, "fast"),
        }
    }
}

/// Approximate natural logarithm from the IEEE 754 bit pattern
///
/// Treats the exponent and mantissa bits as a fixed point value of `log2(x)`
/// and rescales (after Martin Ankerl's pow/log approximations). Only
/// meaningful for positive, finite `x`.
///
/// ```rust
/// # use ntransport_sampling::fast_ln;
/// assert!((fast_ln(0.5) - 0.5_f64.ln()).abs() < 0.04);
/// assert!((fast_ln(1e-6) - 1e-6_f64.ln()).abs() < 0.04);
/// ```
#[inline]
pub fn fast_ln(x: f64) -> f64 {
    const OFFSET: i64 = 4_606_931_270_219_946_880;
    const SCALE: f64 = 1.539_095_918_623_324e-16;
    (x.to_bits() as i64 - OFFSET) as f64 * SCALE
}

/// Uniform draw on (0, 1), resampling exact zeros
///
/// The standard `f64` distribution is [0, 1), and `ln(0)` would send a
/// particle to infinity.
#[inline]
pub fn uniform_nonzero<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.gen();
        if u > 0.0 {
            return u;
        }
    }
}

/// Distance to the next collision, `-mfp * ln(U)`
///
/// Inverse-CDF sampling of the exponential distribution with the given mean
/// free path. The result is always finite and non-negative for a finite mean
/// free path. Fast approximations that land just above zero for `U` close to
/// one are clamped to a zero length flight.
///
/// ```rust
/// # use ntransport_sampling::{free_flight_length, LogMode};
/// # use rand::{rngs::StdRng, SeedableRng};
/// let mut rng = StdRng::seed_from_u64(7);
/// let n = 100_000;
/// let mean = (0..n)
///     .map(|_| free_flight_length(2.5, &mut rng, LogMode::Exact))
///     .sum::<f64>() / n as f64;
/// assert!((mean - 2.5).abs() < 0.05);
/// ```
#[inline]
pub fn free_flight_length<R: Rng + ?Sized>(mean_free_path: f64, rng: &mut R, mode: LogMode) -> f64 {
    (-mean_free_path * mode.ln(uniform_nonzero(rng))).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn zero_draw_is_resampled() {
        // first draw is exactly 0.0, the second is 2^-53
        let mut rng = StepRng::new(0, 1 << 11);
        let u = uniform_nonzero(&mut rng);
        assert_eq!(u, 2f64.powi(-53));
    }

    #[test]
    fn resampled_flight_is_finite() {
        let mut rng = StepRng::new(0, 1 << 11);
        let flight = free_flight_length(1.0, &mut rng, LogMode::Exact);
        assert!(flight.is_finite());
        assert!((flight - 53.0 * 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn fast_log_error_is_bounded() {
        let max_error = (1..=100_000)
            .map(|i| i as f64 / 100_000.0)
            .map(|x| (fast_ln(x) - x.ln()).abs())
            .fold(0.0, f64::max);
        assert!(max_error < 0.04, "max error {max_error}");
    }

    #[test]
    fn fast_flights_are_never_negative() {
        // u64::MAX >> 11 gives the largest f64 below 1.0
        let mut rng = StepRng::new(u64::MAX, 0);
        assert_eq!(free_flight_length(1.0, &mut rng, LogMode::Fast), 0.0);
    }
}
