//! Splitting an ensemble into blocks of work

use std::ops::Range;

// crate modules
use crate::config::TransportConfig;
use crate::error::{Error, Result};
use crate::results::SimulationResults;

// ntransport modules
use ntransport_utils::f;

// external crates
use kdam::{par_tqdm, Bar, BarBuilder, BarExt};
use rayon::prelude::*;

/// Number of histories handled together by one worker
pub(crate) const SHARD_SIZE: u64 = 4096;

/// Consecutive particle index ranges covering `0..count`
///
/// The layout only depends on `count`, never on the number of threads.
pub(crate) fn shards(count: u64) -> Vec<Range<u64>> {
    (0..count)
        .step_by(SHARD_SIZE as usize)
        .map(|start| start..(start + SHARD_SIZE).min(count))
        .collect()
}

/// Run `job` on every shard and add up the tallies
///
/// The job is given the shard index and the range of particle indices it
/// covers. Shards go to the rayon pool unless the configuration asks for a
/// sequential run.
pub(crate) fn run_sharded<F>(
    count: u64,
    config: &TransportConfig,
    label: &str,
    job: F,
) -> Result<SimulationResults>
where
    F: Fn(u64, Range<u64>) -> SimulationResults + Send + Sync,
{
    let shards = shards(count);

    if !config.parallel {
        let mut bar = progress_bar(shards.len(), label, !config.progress)?;
        let mut results = SimulationResults::default();
        for (index, range) in shards.into_iter().enumerate() {
            results += job(index as u64, range);
            bar.update(1)?;
        }
        if config.progress {
            eprintln!();
        }
        return Ok(results);
    }

    if config.progress {
        let partials: Vec<SimulationResults> = par_tqdm!(
            shards
                .into_par_iter()
                .enumerate()
                .map(|(index, range)| job(index as u64, range)),
            bar_format = f!("{label}: {{count}}/{{total}} shards [{{rate:.2}} shards/s]  ")
        )
        .collect();
        eprintln!();
        return Ok(partials.into_iter().sum());
    }

    Ok(shards
        .into_par_iter()
        .enumerate()
        .map(|(index, range)| job(index as u64, range))
        .sum())
}

/// Initialise a progress bar over `total` shards, if wanted
fn progress_bar(total: usize, label: &str, disable: bool) -> Result<Bar> {
    BarBuilder::default()
        .total(total)
        .unit(" shards")
        .disable(disable)
        .bar_format(f!("{label}: {{count}}/{{total}} shards [{{rate:.2}} shards/s]  "))
        .build()
        .map_err(|e| Error::ProgressBar(e.to_string()))
}
