//! Lakehouse Cost Estimator CLI
//!
//! A command-line front end for estimating monthly and projected spend
//! on job compute, S3 storage and SQL warehouses.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{costs, init, jobs, rates, storage, warehouses};
use estimator::calculator::Estimate;
use estimator::{EstimateLogger, RateCard, Tier};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Lakehouse Cost Estimator
#[derive(Parser)]
#[command(name = "lakecost")]
#[command(author, version, about = "Lakehouse Cost Estimator for job compute, S3 storage and SQL warehouse spend", long_about = None)]
pub struct Cli {
    /// Workload file (JSON, TOML or YAML); defaults to ~/.config/lakecost/workload.json
    #[arg(long, short, env = "LAKECOST_WORKLOAD")]
    pub workload: Option<PathBuf>,

    /// Override the monthly growth percentage for Databricks and S3 spend (0-100)
    #[arg(long, short)]
    pub growth: Option<f64>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show monthly totals, 12-month projection and cost distribution
    Estimate,

    /// Show job compute costs per tier
    Jobs {
        /// Only show one tier (bronze, silver, gold)
        #[arg(long, short)]
        tier: Option<Tier>,
    },

    /// Show S3 storage costs per zone
    Storage,

    /// Show SQL warehouse costs
    Warehouses,

    /// Show the month-by-month 12-month projection
    Projection,

    /// Show the rate tables used for pricing
    Rates,

    /// Write a workload template to start from
    Init {
        /// Output file path (defaults to ~/.config/lakecost/workload.json)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Job rows per tier
        #[arg(long, default_value_t = 1)]
        jobs: usize,

        /// Number of SQL warehouses
        #[arg(long, default_value_t = 1)]
        warehouses: usize,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let json = std::env::var_os("LAKECOST_LOG_JSON").is_some();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}

/// Load, validate and price the workload selected on the command line
fn compute_estimate(cli: &Cli, rates: &RateCard) -> Result<Estimate> {
    let source = config::resolve_source(cli.workload.as_deref())?;
    let logger = EstimateLogger::new(source.to_string());

    let mut workload = config::load_workload(&source)?;
    if let Some(growth) = cli.growth {
        debug!(growth_percent = growth, "Overriding growth from command line");
        workload.growth_percent = growth;
    }

    if let Err(err) = workload.validate() {
        logger.log_validation_failure(&err);
        return Err(err).with_context(|| format!("Invalid workload ({})", source));
    }
    logger.log_workload_loaded(&workload);

    let estimate = estimator::estimate(&workload, rates);
    logger.log_estimate(&estimate);

    Ok(estimate)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rate_card = RateCard::standard();

    // Execute command
    match &cli.command {
        Commands::Estimate => {
            costs::show_estimate(&compute_estimate(&cli, &rate_card)?, cli.format)?;
        }
        Commands::Jobs { tier } => {
            jobs::show_jobs(&compute_estimate(&cli, &rate_card)?, *tier, cli.format)?;
        }
        Commands::Storage => {
            storage::show_storage(&compute_estimate(&cli, &rate_card)?, cli.format)?;
        }
        Commands::Warehouses => {
            warehouses::show_warehouses(&compute_estimate(&cli, &rate_card)?, cli.format)?;
        }
        Commands::Projection => {
            costs::show_projection(&compute_estimate(&cli, &rate_card)?, cli.format)?;
        }
        Commands::Rates => {
            rates::show_rates(&rate_card, cli.format)?;
        }
        Commands::Init {
            output,
            jobs,
            warehouses,
            force,
        } => {
            init::init_workload(output.as_deref(), *jobs, *warehouses, *force, cli.format)?;
        }
    }

    Ok(())
}
