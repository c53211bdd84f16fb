use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use roi_core::{Currency, Wizard};
use roi_wizard::{
    SessionOutcome, config, logging, report,
    scenario_loader::{self, evaluate},
    run_session,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Estimates the return on investment of AI training for a team.
///
/// Without `--scenarios` it walks through the five wizard steps on the
/// terminal. With `--scenarios` it evaluates every row of a CSV file and
/// prints one summary per row.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML file with engine settings (training cost, working hours, rates).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Currency to start in, overriding the config file (EUR, USD, GBP, AUD).
    #[arg(long)]
    currency: Option<Currency>,

    /// CSV file of scenarios to evaluate non-interactively.
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `roi_core=trace`. Overrides `RUST_LOG`;
    /// without either, only warnings are shown.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

const DEFAULT_LOG_LEVEL: &str = "warn";

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(DEFAULT_LOG_LEVEL);
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let mut engine = config::load_config(cli.config.as_deref()).context("loading engine config")?;
    if let Some(currency) = cli.currency {
        engine.default_currency = currency;
    }
    debug!(?engine, "engine configured");

    if let Some(path) = &cli.scenarios {
        let scenarios = scenario_loader::load_from_file(path)
            .with_context(|| format!("loading scenarios from '{}'", path.display()))?;
        info!(count = scenarios.len(), "evaluating scenarios");

        let reports = evaluate(&scenarios, &engine);
        report::write_reports(&mut io::stdout().lock(), &reports)?;
        return Ok(());
    }

    let mut wizard = Wizard::new(engine)?;
    match run_session(&mut wizard, io::stdin().lock(), io::stdout().lock())? {
        SessionOutcome::Completed(_) => info!("estimate complete"),
        SessionOutcome::Quit => println!("No estimate produced."),
    }

    Ok(())
}
