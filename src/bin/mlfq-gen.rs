//! `mlfq-gen`: writes a seeded random job list in the simulator's input format.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use u_mlfq::logging::init_tracing;
use u_mlfq::models::Tick;
use u_mlfq::workload::{write_jobs, WorkloadSpec};

/// Generate a random MLFQ job list.
#[derive(Debug, Parser)]
#[command(name = "mlfq-gen", version, about, long_about = None)]
struct Cli {
    /// Destination file.
    output: PathBuf,

    /// RNG seed; the same seed always yields the same list.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of jobs.
    #[arg(long, default_value_t = 50)]
    jobs: usize,

    /// Number of priority classes.
    #[arg(long, default_value_t = 2)]
    levels: usize,

    /// Latest arrival tick.
    #[arg(long, default_value_t = 200)]
    max_arrival: Tick,

    /// Enable debug logs.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let spec = WorkloadSpec::default()
        .with_num_jobs(cli.jobs)
        .with_num_levels(cli.levels)
        .with_max_arrival(cli.max_arrival);
    let jobs = spec.generate(cli.seed);

    let file = File::create(&cli.output)
        .with_context(|| format!("cannot create {}", cli.output.display()))?;
    write_jobs(&jobs, BufWriter::new(file))
        .with_context(|| format!("writing {}", cli.output.display()))?;

    info!(jobs = jobs.len(), seed = cli.seed, path = %cli.output.display(), "workload written");
    Ok(())
}
