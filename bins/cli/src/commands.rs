//! CLI commands and handlers

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use pricewatch_core::currency::CurrencyConverter;
use pricewatch_core::scrape::Asin;
use pricewatch_core::tracker::{Catalog, Product, TrackOutcome, Tracker};
use pricewatch_fetch::{HttpPageFetcher, HttpRateProvider};
use pricewatch_shared::{Currency, DEFAULT_SETTINGS_PATH, Money, Settings};
use pricewatch_store::JsonProductStore;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pricewatch", version)]
#[command(about = "Track product prices and convert between currencies")]
pub struct Cli {
    /// Settings file
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    pub settings: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start tracking products, or record a new price for tracked ones
    Track {
        /// Product page URLs
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Record today's price for every tracked product
    Refresh,

    /// List tracked products with their latest price
    List,

    /// Show the price history of a product
    History {
        /// Product ASIN
        asin: String,
    },

    /// Convert an amount between currencies at the current rate
    Convert {
        /// Amount in the settings' number format, e.g. 12,99
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Source currency, symbol or code
        from: String,

        /// Target currency, symbol or code
        to: String,
    },

    /// Write the effective settings to the settings file
    InitSettings,
}

/// Runs `command` with the loaded settings.
pub fn run(command: Commands, settings: &Settings, settings_path: &Path) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Track { urls } => track(settings, &urls),
        Commands::Refresh => refresh(settings),
        Commands::List => list(settings),
        Commands::History { asin } => history(settings, &asin),
        Commands::Convert { amount, from, to } => convert(settings, &amount, &from, &to),
        Commands::InitSettings => init_settings(settings, settings_path),
    }
}

fn tracker(
    settings: &Settings,
    catalog: Catalog,
) -> anyhow::Result<Tracker<HttpPageFetcher, HttpRateProvider>> {
    let pages = HttpPageFetcher::from_settings(settings)?;
    let rates = HttpRateProvider::from_settings(settings)?;
    Ok(Tracker::new(settings.clone(), catalog, pages, rates))
}

fn track(settings: &Settings, urls: &[String]) -> anyhow::Result<ExitCode> {
    let store = JsonProductStore::from_settings(settings);
    let mut tracker = tracker(settings, store.load()?)?;

    let mut failed = 0usize;
    for url in urls {
        match tracker.track(url) {
            Ok(outcome) => print_outcome(tracker.catalog(), &outcome),
            Err(err) => {
                failed += 1;
                eprintln!("{url}: {err}");
            }
        }
    }

    store.save(tracker.catalog())?;
    info!(requested = urls.len(), failed, "Tracking finished");
    Ok(exit_code(failed))
}

fn refresh(settings: &Settings) -> anyhow::Result<ExitCode> {
    let store = JsonProductStore::from_settings(settings);
    let mut tracker = tracker(settings, store.load()?)?;

    let results = tracker.refresh_all(Local::now().date_naive());
    let mut failed = 0usize;
    for (asin, result) in &results {
        match result {
            Ok(outcome) => print_outcome(tracker.catalog(), outcome),
            Err(err) => {
                failed += 1;
                eprintln!("{asin}: {err}");
            }
        }
    }

    store.save(tracker.catalog())?;
    info!(products = results.len(), failed, "Refresh finished");
    Ok(exit_code(failed))
}

fn list(settings: &Settings) -> anyhow::Result<ExitCode> {
    let catalog = JsonProductStore::from_settings(settings).load()?;
    if catalog.is_empty() {
        println!("No products tracked");
    }
    for product in catalog.iter() {
        println!(
            "{}  {:>12}  {}",
            product.asin,
            price_text(product.price.as_ref()),
            product.name
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn history(settings: &Settings, asin: &str) -> anyhow::Result<ExitCode> {
    let asin: Asin = asin.parse()?;
    let catalog = JsonProductStore::from_settings(settings).load()?;
    let product = catalog
        .get(&asin)
        .ok_or_else(|| anyhow!("{asin} is not tracked"))?;

    println!("{}  {}", product.asin, product.name);
    for point in &product.history {
        println!("{:<10}  {:>12}", point.date, price_text(point.price.as_ref()));
    }
    if let Ok(change) = product.price_change() {
        println!("{:<10}  {:>12}", "change", change.to_string());
    }
    Ok(ExitCode::SUCCESS)
}

fn convert(settings: &Settings, amount: &str, from: &str, to: &str) -> anyhow::Result<ExitCode> {
    let from: Currency = from.parse()?;
    let to: Currency = to.parse()?;
    let value = Money::parse(amount, from.symbol(), &settings.number_format)
        .with_context(|| format!("Cannot read amount {amount:?}"))?;

    let converter = CurrencyConverter::new(HttpRateProvider::from_settings(settings)?);
    let converted = converter.convert(value, to)?;

    println!("{value} = {}", converted.round());
    Ok(ExitCode::SUCCESS)
}

fn init_settings(settings: &Settings, path: &Path) -> anyhow::Result<ExitCode> {
    settings.save(path)?;
    println!("Wrote settings to {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn print_outcome(catalog: &Catalog, outcome: &TrackOutcome) {
    let verb = match outcome {
        TrackOutcome::Added(_) => "added",
        TrackOutcome::Updated(_) => "updated",
    };
    match catalog.get(outcome.asin()) {
        Some(product) => println!("{verb:<8} {}", describe(product)),
        None => println!("{verb:<8} {}", outcome.asin()),
    }
}

fn describe(product: &Product) -> String {
    format!(
        "{}  {:>12}  {}",
        product.asin,
        price_text(product.price.as_ref()),
        product.name
    )
}

fn price_text(price: Option<&Money>) -> String {
    price.map_or_else(|| "-".to_string(), ToString::to_string)
}

fn exit_code(failed: usize) -> ExitCode {
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
