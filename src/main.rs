use std::process::ExitCode;
use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use crate::cli::Args;
use crate::config::Config;
use crate::cycle::{Cycle, Outcome};
use crate::display::select_sink;
use crate::layout::{CellMetrics, Layout};
use crate::manager_forecast::{http_client, select_source};
use crate::snapshot::ChangeDetector;

mod cli;
mod config;
mod cycle;
mod display;
mod errors;
mod layout;
mod logging;
mod manager_forecast;
mod models;
mod snapshot;

fn main() -> ExitCode {
    let args = Args::parse();

    let (config, config_error) = config::load_or_default(&args.config);

    if let Err(e) = logging::setup_logger(&config.general) {
        eprintln!("unable to set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    info!("weatherink version: {}", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        warn!("unable to load {}, running with defaults: {}", args.config, e);
    }
    if config.app.debug {
        info!("running in debug mode");
    }

    match run(&config, &args) {
        Ok(outcome) => {
            info!("{}", outcome);
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!("display cycle aborted: {:#}", e);
            ExitCode::FAILURE
        },
    }
}

/// Sets up the collaborators from configuration and runs one display cycle
///
/// # Arguments
///
/// * 'config' - the configuration
/// * 'args' - command line arguments
fn run(config: &Config, args: &Args) -> Result<Outcome> {
    let client = http_client(config.http.timeout_secs)
        .context("unable to create http client")?;

    let source = select_source(config, client, args.scrape_only);
    let detector = ChangeDetector::new(&config.files.snapshot);
    let layout = Layout::new(&config.display, &CellMetrics, config.app.debug);
    let mut sink = select_sink(&config.display);

    let parts = Cycle {
        source: source.as_ref(),
        detector: &detector,
        layout: &layout,
        sink: sink.as_mut(),
    };

    let outcome = cycle::run(parts, config.location, config.warnings, args.force)
        .with_context(|| format!("cycle for {} failed", config.location))?;

    Ok(outcome)
}
