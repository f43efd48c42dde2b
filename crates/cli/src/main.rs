//! `ntransport` command line driver
//!
//! Runs each of the transport engines from the terminal, printing the tallies
//! and throughput of every run.

mod args;
mod commands;
mod report;

// crate modules
use args::{Commands, RunArgs};

// external crates
use anyhow::Result;
use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(name = "ntransport", version)]
#[command(about = "Monte Carlo neutron random walks through slabs, volumes, and scenes")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    run: RunArgs,

    /// Verbose logging (-v, -vv)
    ///
    /// Use `-v` for engine summaries and `-vv` for everything, including
    /// events from `--trace`.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Supress all log output (overrules --verbose)
    #[arg(short, long, global = true)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;

    let config = cli.run.config();
    match cli.command {
        Commands::Slab { width, material } => {
            commands::slab(&cli.run, &config, width, &material)?
        }
        Commands::Volume {
            shape,
            size,
            dim,
            material,
        } => commands::volume(&cli.run, &config, shape, size, dim, &material)?,
        Commands::Woodcock {
            slabs,
            split,
            width,
            dim,
        } => commands::woodcock(&cli.run, &config, &slabs, split, width, dim)?,
        Commands::Animate {
            frames,
            every,
            isotropic,
        } => commands::animate(&cli.run, &config, frames, every, isotropic)?,
        Commands::Demo => commands::demo(&cli.run, &config)?,
    }

    Ok(())
}

/// Logs go to stderr so that results on stdout stay easy to pipe
fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    stderrlog::new()
        .modules(["ntransport", "ntransport_transport"])
        .quiet(quiet)
        .verbosity(verbose as usize + 2)
        .show_level(verbose > 0)
        .show_module_names(verbose > 1)
        .timestamp(stderrlog::Timestamp::Off)
        .init()?;
    Ok(())
}
