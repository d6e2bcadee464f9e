//! `mlfq` command-line simulator.
//!
//! ```text
//! mlfq [OPTIONS] <INPUT> <OUTPUT>
//! ```
//!
//! Exit codes: 0 success, 2 usage or unopenable file, 3 malformed or
//! invalid job list, 1 anything else.

use std::io::Stderr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use u_mlfq::io::{load_jobs, TraceWriter, VerboseDump};
use u_mlfq::logging::init_tracing;
use u_mlfq::models::{MlfqConfig, Tick};
use u_mlfq::scheduler::{Dispatcher, SimulationKpi};
use u_mlfq::MlfqError;

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;
const EXIT_INPUT: u8 = 3;

/// Simulate a multi-level feedback queue scheduler over a job list.
#[derive(Debug, Parser)]
#[command(name = "mlfq", version, about, long_about = None)]
struct Cli {
    /// Job list: whitespace-separated `name priority arrival service` records.
    input: PathBuf,

    /// Trace file: one `tick job_id` line per tick, `-1` when idle.
    output: PathBuf,

    /// JSON file with the quantum table and demotion policy.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the first-dispatch quantum.
    #[arg(long, value_name = "TICKS")]
    base_allowance: Option<Tick>,

    /// Mirror every tick and queue to stderr and enable debug logs.
    #[arg(short, long)]
    verbose: bool,

    /// Print summary metrics as JSON to stdout.
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mlfq: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => MlfqConfig::load(path)?,
        None => MlfqConfig::default(),
    };
    if let Some(ticks) = cli.base_allowance {
        config.base_time_allowance = ticks;
    }

    // Both files must open before any simulation state exists.
    let writer = TraceWriter::create(&cli.output)?;
    let jobs = load_jobs(&cli.input)?;

    let mut dispatcher = Dispatcher::new(jobs, config)?;
    let dump: Option<VerboseDump<Stderr>> = cli
        .verbose
        .then(|| VerboseDump::new(std::io::stderr()));

    let mut sinks = (writer, dump);
    let trace = dispatcher
        .run(&mut sinks)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    info!(
        ticks = trace.len(),
        jobs = dispatcher.table().len(),
        "simulation complete"
    );

    if cli.stats {
        let kpi = SimulationKpi::calculate(dispatcher.table().jobs(), &trace);
        let json = serde_json::to_string_pretty(&kpi).context("serializing metrics")?;
        println!("{json}");
    }

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<MlfqError>() {
        Some(MlfqError::Io { .. } | MlfqError::Config(_)) => EXIT_USAGE,
        Some(e) if e.is_input_error() => EXIT_INPUT,
        _ => EXIT_FAILURE,
    }
}
