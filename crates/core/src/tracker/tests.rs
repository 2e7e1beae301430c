//! Tracker tests against in-memory pages and fixed rates.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::NaiveDate;
use pricewatch_shared::{Currency, Money, NumberFormat, Settings};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::{PageFetcher, TrackOutcome, Tracker};
use super::product::Catalog;
use crate::currency::{ConversionError, RateProvider};
use crate::scrape::{Asin, ScrapeError};

const URL: &str = "https://www.amazon.de/Echo-Dot/dp/B07XJ8C8F5/ref=sr_1_1";

#[derive(Default)]
struct Pages {
    pages: RefCell<HashMap<String, String>>,
    requested: RefCell<Vec<String>>,
}

impl Pages {
    fn serve(&self, url: &str, html: String) {
        self.pages.borrow_mut().insert(url.to_string(), html);
    }
}

impl PageFetcher for Pages {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        self.requested.borrow_mut().push(url.to_string());
        self.pages
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::fetch(url, "404 Not Found"))
    }
}

struct Rates {
    rate: Option<Decimal>,
    calls: Cell<u32>,
}

impl Rates {
    fn fixed(rate: Decimal) -> Self {
        Self {
            rate: Some(rate),
            calls: Cell::new(0),
        }
    }

    fn unavailable() -> Self {
        Self {
            rate: None,
            calls: Cell::new(0),
        }
    }
}

impl RateProvider for Rates {
    fn lookup_rate(&self, base: Currency, target: Currency) -> Result<Decimal, ConversionError> {
        self.calls.set(self.calls.get() + 1);
        self.rate
            .ok_or_else(|| ConversionError::rate_unavailable(base.code(), target.code()))
    }
}

fn page(price: &str) -> String {
    format!(
        r#"<html><body>
        <span id="productTitle"> Echo Dot </span>
        <a id="bylineInfo">Amazon</a>
        <span id="priceblock_ourprice">{price}</span>
        </body></html>"#
    )
}

fn settings(currency: Currency) -> Settings {
    Settings {
        currency,
        number_format: NumberFormat::COMMA_DECIMAL,
        ..Settings::default()
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn asin() -> Asin {
    "B07XJ8C8F5".parse().unwrap()
}

#[test]
fn test_track_adds_product() {
    let pages = Pages::default();
    pages.serve(URL, page("49,99 €"));
    let rates = Rates::fixed(dec!(2));
    let mut tracker = Tracker::new(settings(Currency::Eur), Catalog::new(), &pages, &rates);

    let outcome = tracker.track_on(URL, day(1)).unwrap();

    assert_eq!(outcome, TrackOutcome::Added(asin()));
    let product = tracker.catalog().get(&asin()).unwrap();
    assert_eq!(product.name, "Echo Dot");
    assert_eq!(product.seller, "Amazon");
    assert_eq!(product.price.unwrap().to_string(), "49.99€");
    assert_eq!(product.history[0].date, "01/03/24");
    assert_eq!(rates.calls.get(), 0);
}

#[test]
fn test_track_updates_history() {
    let pages = Pages::default();
    pages.serve(URL, page("49,99 €"));
    let rates = Rates::fixed(dec!(2));
    let mut tracker = Tracker::new(settings(Currency::Eur), Catalog::new(), &pages, &rates);
    tracker.track_on(URL, day(1)).unwrap();

    pages.serve(URL, page("44,99 €"));
    let outcome = tracker.track_on(URL, day(2)).unwrap();

    assert_eq!(outcome, TrackOutcome::Updated(asin()));
    let product = tracker.catalog().get(&asin()).unwrap();
    assert_eq!(product.history.len(), 2);
    assert_eq!(product.price_change().unwrap().amount(), dec!(-5.00));
}

#[test]
fn test_track_converts_to_settings_currency() {
    let pages = Pages::default();
    pages.serve(URL, page("10,00 €"));
    let rates = Rates::fixed(dec!(1.0841));
    let mut tracker = Tracker::new(settings(Currency::Usd), Catalog::new(), &pages, &rates);

    tracker.track_on(URL, day(1)).unwrap();

    let price = tracker.catalog().get(&asin()).unwrap().price.unwrap();
    assert_eq!(price.currency(), Currency::Usd);
    assert_eq!(price.amount(), dec!(10.841));
    assert_eq!(price.to_string(), "10.84$");
    assert_eq!(rates.calls.get(), 1);
}

#[test]
fn test_failed_conversion_records_missing_price() {
    let pages = Pages::default();
    pages.serve(URL, page("10,00 €"));
    let rates = Rates::unavailable();
    let mut tracker = Tracker::new(settings(Currency::Usd), Catalog::new(), &pages, &rates);

    tracker.track_on(URL, day(1)).unwrap();

    let product = tracker.catalog().get(&asin()).unwrap();
    assert_eq!(product.price, None);
    assert_eq!(product.history[0].price, None);
}

#[test]
fn test_unreadable_price_records_missing_price() {
    let pages = Pages::default();
    pages.serve(URL, page("currently unavailable"));
    let mut tracker = Tracker::new(
        settings(Currency::Eur),
        Catalog::new(),
        &pages,
        Rates::fixed(dec!(1)),
    );

    tracker.track_on(URL, day(1)).unwrap();

    assert_eq!(tracker.catalog().get(&asin()).unwrap().price, None);
}

#[test]
fn test_fetch_failure_leaves_catalog_untouched() {
    let pages = Pages::default();
    let mut tracker = Tracker::new(
        settings(Currency::Eur),
        Catalog::new(),
        &pages,
        Rates::fixed(dec!(1)),
    );

    let err = tracker.track_on(URL, day(1)).unwrap_err();

    assert!(matches!(err, ScrapeError::Fetch { .. }));
    assert!(tracker.catalog().is_empty());
}

#[test]
fn test_url_without_asin_is_not_fetched() {
    let pages = Pages::default();
    let mut tracker = Tracker::new(
        settings(Currency::Eur),
        Catalog::new(),
        &pages,
        Rates::fixed(dec!(1)),
    );

    let err = tracker.track_on("https://www.amazon.de/s?k=echo", day(1)).unwrap_err();

    assert!(matches!(err, ScrapeError::MissingAsin(_)));
    assert!(pages.requested.borrow().is_empty());
}

#[test]
fn test_invalid_date_format() {
    let pages = Pages::default();
    pages.serve(URL, page("1,00 €"));
    let settings = Settings {
        date_format: "%Q".to_string(),
        ..settings(Currency::Eur)
    };
    let mut tracker = Tracker::new(settings, Catalog::new(), &pages, Rates::fixed(dec!(1)));

    assert!(matches!(
        tracker.track_on(URL, day(1)),
        Err(ScrapeError::DateFormat(_))
    ));
}

#[test]
fn test_refresh_all_uses_canonical_urls() {
    let pages = Pages::default();
    pages.serve(URL, page("49,99 €"));
    let canonical = "https://www.amazon.de/dp/B07XJ8C8F5";
    pages.serve(canonical, page("39,99 €"));
    let mut tracker = Tracker::new(
        settings(Currency::Eur),
        Catalog::new(),
        &pages,
        Rates::fixed(dec!(1)),
    );
    tracker.track_on(URL, day(1)).unwrap();

    let results = tracker.refresh_all(day(2));

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, asin());
    assert!(matches!(results[0].1, Ok(TrackOutcome::Updated(_))));
    assert_eq!(pages.requested.borrow().last().unwrap(), canonical);
    let product = tracker.into_catalog().get(&asin()).cloned().unwrap();
    assert_eq!(
        product.price,
        Some(Money::new(dec!(39.99), Currency::Eur))
    );
}
