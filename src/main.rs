use std::{
    io::IsTerminal,
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::{ArgAction, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crs_routes::{
    error::Error,
    input::read_input,
    log::{write_run_log, RunSummary},
    manage::start,
    output::{render, write_output},
    route::search::Dijkstra,
};

/// Best routes by distance, time and cost between cities, plus a compromise
/// route picked by priority.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// File with the [CITIES], [ROADS] and [REQUESTS] sections
    #[clap(short, long, value_parser, default_value = "input.txt")]
    input: PathBuf,

    /// Where the route table is written
    #[clap(short, long, value_parser, default_value = "output.txt")]
    output: PathBuf,

    /// Directory for a timestamped run log
    #[clap(short, long, value_parser)]
    log_dir: Option<PathBuf>,

    /// More log output, repeatable. RUST_LOG takes precedence.
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), Error> {
    let started = Instant::now();

    let input = read_input(&args.input)?;
    info!(
        "{}: {} cities, {} roads, {} requests",
        args.input.display(),
        input.cities.len(),
        input.roads.len(),
        input.requests.len()
    );

    let outcome = start::<Dijkstra>(&input)?;
    write_output(&args.output, &render(&outcome.plans, &input.cities))?;
    info!("routes written to {}", args.output.display());

    if let Some(directory) = &args.log_dir {
        let summary = RunSummary {
            input: &args.input,
            output: &args.output,
            cities: input.cities.len(),
            roads: input.roads.len(),
            plans: &outcome.plans,
            stats: outcome.stats,
            duration: started.elapsed(),
        };
        let path = write_run_log(directory, &summary)?;
        info!("run log written to {}", path.display());
    }

    Ok(())
}
