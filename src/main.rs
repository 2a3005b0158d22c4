//! CleanLink Optimizer - single-vehicle route planning for collection runs
//!
//! Reads an optimize request (JSON) from a file or stdin, builds the travel
//! matrix, solves the visiting order within the configured time budget and
//! prints the route + stop schedule as JSON on stdout.

mod cli;
mod config;
mod services;
mod types;

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use services::directions::LegProvider;
use types::OptimizeRequest;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the response JSON.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,cleanlink_optimizer=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::Cli::parse();

    let config = config::Config::from_env()?;
    info!(
        "Configuration loaded (directions {}, concurrency {}, budget {} ms)",
        if config.directions_enabled() { "enabled" } else { "disabled" },
        config.matrix_concurrency,
        config.solver_time_budget_ms
    );

    let raw = match &args.request {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read request from stdin")?;
            buffer
        }
    };

    let request: OptimizeRequest =
        serde_json::from_str(&raw).context("Failed to parse optimize request JSON")?;

    let provider = LegProvider::from_config(&config);

    let response = services::optimizer::optimize(&request, &provider, &config).await?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);

    Ok(())
}
