//! Printing results to stdout

use std::time::Duration;

// ntransport modules
use ntransport_transport::{Outcome, SimulationResults};

// external crates
use anyhow::Result;
use log::info;
use serde::Serialize;

/// Everything worth knowing about a finished run
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub engine: &'a str,
    pub description: String,
    pub seed: Option<u64>,
    pub results: SimulationResults,
    pub seconds: f64,
    pub kwalks_per_second: f64,
}

impl<'a> Report<'a> {
    pub fn new(
        engine: &'a str,
        description: String,
        seed: Option<u64>,
        results: SimulationResults,
        elapsed: Duration,
    ) -> Self {
        let seconds = elapsed.as_secs_f64();
        // thousands of histories per second
        let kwalks_per_second = match seconds > 0.0 {
            true => results.total() as f64 / seconds / 1000.0,
            false => 0.0,
        };

        Self {
            engine,
            description,
            seed,
            results,
            seconds,
            kwalks_per_second,
        }
    }

    /// Print as text, or as a single line of JSON
    pub fn print(&self, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string(self)?);
            return Ok(());
        }

        println!("{}: {}", self.engine, self.description);
        println!(
            "{}, kWalks/s: {:.1}",
            self.results, self.kwalks_per_second
        );

        info!("  reflected   {}", self.results.summary(Outcome::Reflected));
        info!("  absorbed    {}", self.results.summary(Outcome::Absorbed));
        info!("  transmitted {}", self.results.summary(Outcome::Transmitted));
        info!("  took {:.3} s", self.seconds);
        Ok(())
    }
}

/// Single animation frame
#[derive(Debug, Serialize)]
pub struct Frame {
    pub frame: u64,
    pub alive: usize,
    pub results: SimulationResults,
}

impl Frame {
    pub fn print(&self, json: bool) -> Result<()> {
        match json {
            true => println!("{}", serde_json::to_string(self)?),
            false => println!(
                "frame {:>6}: {:>8} alive | {}",
                self.frame, self.alive, self.results
            ),
        }
        Ok(())
    }
}
