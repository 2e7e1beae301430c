//! Tracker service: fetch a product page and update the catalog.

use std::fmt::Write as _;

use chrono::{Local, NaiveDate};
use pricewatch_shared::{Money, Settings};
use tracing::{debug, info, warn};

use super::product::{Catalog, Product};
use crate::currency::{CurrencyConverter, RateProvider};
use crate::scrape::{Asin, ProductPage, ScrapeError};

/// Source of product page HTML.
///
/// Implemented over HTTP by `pricewatch-fetch`; tests serve fixed pages.
pub trait PageFetcher {
    /// Downloads the page at `url`.
    fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

impl<F: PageFetcher + ?Sized> PageFetcher for &F {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        (**self).fetch(url)
    }
}

/// What a successful track did to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    /// First observation of this product.
    Added(Asin),
    /// New price point for an already tracked product.
    Updated(Asin),
}

impl TrackOutcome {
    /// The affected product.
    #[must_use]
    pub fn asin(&self) -> &Asin {
        match self {
            Self::Added(asin) | Self::Updated(asin) => asin,
        }
    }
}

/// Scrapes product pages into a [`Catalog`].
pub struct Tracker<F, P> {
    settings: Settings,
    catalog: Catalog,
    fetcher: F,
    converter: CurrencyConverter<P>,
}

impl<F: PageFetcher, P: RateProvider> Tracker<F, P> {
    /// Creates a tracker over an existing catalog.
    #[must_use]
    pub fn new(settings: Settings, catalog: Catalog, fetcher: F, rates: P) -> Self {
        Self {
            settings,
            catalog,
            fetcher,
            converter: CurrencyConverter::new(rates),
        }
    }

    /// Current catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Gives the catalog back, e.g. for saving.
    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Adds a product or updates its price, dated today.
    pub fn track(&mut self, url: &str) -> Result<TrackOutcome, ScrapeError> {
        self.track_on(url, Local::now().date_naive())
    }

    /// Adds a product or updates its price, dated `today`.
    ///
    /// # Errors
    ///
    /// Fails if the URL has no ASIN, the page cannot be fetched, or
    /// `date_format` is invalid. A price that cannot be read or converted is
    /// not an error: it is recorded as missing.
    pub fn track_on(&mut self, url: &str, today: NaiveDate) -> Result<TrackOutcome, ScrapeError> {
        let asin = Asin::from_url(url)?;
        let date = self.date_key(today)?;

        let html = self.fetcher.fetch(url).inspect_err(|err| {
            warn!(%asin, url, error = %err, "Could not get product information");
        })?;
        let page = ProductPage::parse(&html);
        let price = self.resolve_price(&page);

        if let Some(product) = self.catalog.get_mut(&asin) {
            product.record_price(&date, price);
            info!(%asin, date = %date, price = ?price.map(|p| p.to_string()), "Updated product price");
            return Ok(TrackOutcome::Updated(asin));
        }

        let product = Product::new(asin.clone(), page.name(), page.seller(), price, date);
        info!(%asin, name = %product.name, "Added product");
        self.catalog.insert(product);
        Ok(TrackOutcome::Added(asin))
    }

    /// Re-tracks every product in the catalog through its canonical URL.
    ///
    /// Failures are collected per product; one bad page does not stop the rest.
    pub fn refresh_all(&mut self, today: NaiveDate) -> Vec<(Asin, Result<TrackOutcome, ScrapeError>)> {
        self.catalog
            .asins()
            .into_iter()
            .map(|asin| {
                let url = asin.product_url(&self.settings);
                let outcome = self.track_on(&url, today);
                (asin, outcome)
            })
            .collect()
    }

    /// Reads the page price in the tracking currency.
    ///
    /// Any failure is logged and yields `None`.
    pub fn resolve_price(&self, page: &ProductPage) -> Option<Money> {
        match self.extract_price(page) {
            Ok(price) => Some(price),
            Err(err) => {
                warn!(error = %err, "Price extraction failed");
                None
            }
        }
    }

    fn extract_price(&self, page: &ProductPage) -> Result<Money, ScrapeError> {
        let label = page.price_label()?;
        let price = label.to_money(&self.settings.number_format)?;
        debug!(%price, target = %self.settings.currency, "Extracted price");
        Ok(self.converter.convert(price, self.settings.currency)?)
    }

    fn date_key(&self, today: NaiveDate) -> Result<String, ScrapeError> {
        let mut key = String::new();
        write!(key, "{}", today.format(&self.settings.date_format))
            .map_err(|_| ScrapeError::DateFormat(self.settings.date_format.clone()))?;
        Ok(key)
    }
}
