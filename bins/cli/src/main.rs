//! Pricewatch command line.
//!
//! Tracks product prices from shop pages and converts amounts between the
//! supported currencies.

mod commands;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use pricewatch_shared::Settings;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::Cli;

const DEFAULT_LOG_FILTER: &str =
    "pricewatch=info,pricewatch_core=info,pricewatch_fetch=info,pricewatch_store=info";

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry.with(fmt.json()).init();
    } else {
        registry.with(fmt).init();
    }

    let settings = Settings::load(&cli.settings)
        .with_context(|| format!("Failed to load settings from {}", cli.settings.display()))?;

    commands::run(cli.command, &settings, &cli.settings)
}
