//! Aggregate tallies of particle fates

use std::iter::Sum;
use std::ops::{Add, AddAssign};

// ntransport modules
use ntransport_utils::ValueExt;

// external crates
use log::warn;
use serde::{Deserialize, Serialize};

/// Terminal state of a single history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Left the system, back through the source side or out of every region
    Reflected,
    /// Absorbed in a collision
    Absorbed,
    /// Left through the far side of a slab
    Transmitted,
    /// Still wandering when the step limit was reached
    TimedOut,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::Reflected => "Reflected",
            Self::Absorbed => "Absorbed",
            Self::Transmitted => "Transmitted",
            Self::TimedOut => "Timed out",
        };
        write!(f, "{s}")
    }
}

/// Counts of every [Outcome] for a run
///
/// Every history ends in exactly one outcome, so the counts always add up to
/// the number of particles simulated.
///
/// ```rust
/// # use ntransport_transport::{Outcome, SimulationResults};
/// let results: SimulationResults = [Outcome::Reflected, Outcome::Absorbed, Outcome::Reflected]
///     .into_iter()
///     .collect();
///
/// assert_eq!(results.reflected, 2);
/// assert_eq!(results.total(), 3);
/// assert_eq!(results.fraction(Outcome::Absorbed), 1.0 / 3.0);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResults {
    /// Histories that left back through the source side
    pub reflected: u64,
    /// Histories ending in absorption
    pub absorbed: u64,
    /// Histories that passed through the slab
    pub transmitted: u64,
    /// Histories cut off by the step limit
    pub timed_out: u64,
}

impl SimulationResults {
    /// Total number of histories
    pub fn total(&self) -> u64 {
        self.reflected + self.absorbed + self.transmitted + self.timed_out
    }

    /// Number of histories ending in `outcome`
    pub fn count(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Reflected => self.reflected,
            Outcome::Absorbed => self.absorbed,
            Outcome::Transmitted => self.transmitted,
            Outcome::TimedOut => self.timed_out,
        }
    }

    /// Tally one more history
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Reflected => self.reflected += 1,
            Outcome::Absorbed => self.absorbed += 1,
            Outcome::Transmitted => self.transmitted += 1,
            Outcome::TimedOut => self.timed_out += 1,
        }
    }

    /// Estimated probability of `outcome`, zero for an empty run
    pub fn fraction(&self, outcome: Outcome) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.count(outcome) as f64 / n as f64,
        }
    }

    /// One sigma binomial standard error on [fraction()](Self::fraction)
    pub fn standard_error(&self, outcome: Outcome) -> f64 {
        match self.total() {
            0 => 0.0,
            n => {
                let p = self.fraction(outcome);
                (p * (1.0 - p) / n as f64).sqrt()
            }
        }
    }

    /// Fraction and error formatted for reports, e.g. `3.107e-02 ± 5.483e-04`
    pub fn summary(&self, outcome: Outcome) -> String {
        format!(
            "{} ± {}",
            self.fraction(outcome).sci(3, 2),
            self.standard_error(outcome).sci(3, 2)
        )
    }

    /// Log a warning when histories hit the step limit
    pub(crate) fn warn_timeouts(&self, engine: &str) {
        if self.timed_out > 0 {
            warn!(
                "{engine}: {} of {} histories reached the step limit",
                self.timed_out,
                self.total()
            );
        }
    }
}

impl Add for SimulationResults {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for SimulationResults {
    fn add_assign(&mut self, rhs: Self) {
        self.reflected += rhs.reflected;
        self.absorbed += rhs.absorbed;
        self.transmitted += rhs.transmitted;
        self.timed_out += rhs.timed_out;
    }
}

impl Sum for SimulationResults {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl FromIterator<Outcome> for SimulationResults {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut results = Self::default();
        iter.into_iter().for_each(|o| results.record(o));
        results
    }
}

impl std::fmt::Display for SimulationResults {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Reflected: {}, Absorbed: {}, Transmitted: {}",
            self.reflected, self.absorbed, self.transmitted
        )?;
        if self.timed_out > 0 {
            write!(f, ", Timed out: {}", self.timed_out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_results_have_zero_fractions() {
        let results = SimulationResults::default();
        assert_eq!(results.fraction(Outcome::Reflected), 0.0);
        assert_eq!(results.standard_error(Outcome::Reflected), 0.0);
    }

    #[test]
    fn shards_sum() {
        let a = SimulationResults {
            reflected: 1,
            absorbed: 2,
            transmitted: 3,
            timed_out: 0,
        };
        let b = SimulationResults {
            reflected: 10,
            absorbed: 20,
            transmitted: 30,
            timed_out: 1,
        };
        let total: SimulationResults = [a, b].into_iter().sum();
        assert_eq!(total.total(), 67);
        assert_eq!(total.count(Outcome::Transmitted), 33);
        assert_eq!(total.timed_out, 1);
    }

    #[test]
    fn display_only_mentions_timeouts_when_present() {
        let mut results: SimulationResults = [Outcome::Absorbed].into_iter().collect();
        assert_eq!(
            results.to_string(),
            "Reflected: 0, Absorbed: 1, Transmitted: 0"
        );
        results.record(Outcome::TimedOut);
        assert!(results.to_string().ends_with("Timed out: 1"));
    }

    #[test]
    fn summary_uses_scientific_notation() {
        let results: SimulationResults = [Outcome::Absorbed, Outcome::Reflected, Outcome::Reflected, Outcome::Reflected]
            .into_iter()
            .collect();
        assert_eq!(results.summary(Outcome::Absorbed), "2.500e-01 ± 2.165e-01");
    }
}
