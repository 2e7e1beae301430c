//! Tracked products and their price histories.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use pricewatch_shared::{Money, MoneyError, MoneyResult};
use serde::{Deserialize, Serialize};

use crate::scrape::Asin;

/// Price observed on a given date. `None` records a failed extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Date key formatted with the `date_format` setting.
    pub date: String,
    /// Observed price.
    pub price: Option<Money>,
}

/// A tracked product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub asin: Asin,
    /// Product title.
    pub name: String,
    /// Latest observed price.
    pub price: Option<Money>,
    /// Seller byline.
    pub seller: String,
    /// Price history, oldest first, at most one point per date.
    #[serde(default)]
    pub history: Vec<PricePoint>,
}

impl Product {
    /// Creates a product with its first observation.
    #[must_use]
    pub fn new(
        asin: Asin,
        name: String,
        seller: String,
        price: Option<Money>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            asin,
            name,
            price,
            seller,
            history: vec![PricePoint {
                date: date.into(),
                price,
            }],
        }
    }

    /// Records the current price for `date`.
    ///
    /// A second observation on the same date replaces the first.
    pub fn record_price(&mut self, date: &str, price: Option<Money>) {
        self.price = price;
        match self.history.iter_mut().find(|p| p.date == date) {
            Some(point) => point.price = price,
            None => self.history.push(PricePoint {
                date: date.to_string(),
                price,
            }),
        }
    }

    fn last_two(&self) -> MoneyResult<(Option<&Money>, Option<&Money>)> {
        match self.history.as_slice() {
            [.., previous, latest] => Ok((previous.price.as_ref(), latest.price.as_ref())),
            _ => Err(MoneyError::incomparable("no previous price")),
        }
    }

    /// Direction of the latest move: `Less` when the price dropped.
    ///
    /// # Errors
    ///
    /// `IncomparableType` when there is no earlier point or either of the
    /// last two observations has no price.
    pub fn price_trend(&self) -> MoneyResult<Ordering> {
        let (previous, latest) = self.last_two()?;
        Money::compare_recorded(latest, previous)
    }

    /// Latest price minus the previous one, in the latest price's currency.
    ///
    /// # Errors
    ///
    /// Same as [`Product::price_trend`], plus `CurrencyMismatch` when the
    /// tracking currency changed between the two observations.
    pub fn price_change(&self) -> MoneyResult<Money> {
        match self.last_two()? {
            (Some(previous), Some(latest)) => latest.checked_sub(previous),
            _ => Err(MoneyError::incomparable("missing price")),
        }
    }

    /// Lowest recorded price.
    #[must_use]
    pub fn lowest_price(&self) -> Option<Money> {
        self.history.iter().filter_map(|p| p.price).min()
    }
}

/// All tracked products keyed by ASIN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: BTreeMap<Asin, Product>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a product.
    #[must_use]
    pub fn get(&self, asin: &Asin) -> Option<&Product> {
        self.products.get(asin)
    }

    /// Looks up a product for updating.
    pub fn get_mut(&mut self, asin: &Asin) -> Option<&mut Product> {
        self.products.get_mut(asin)
    }

    /// Returns true if `asin` is tracked.
    #[must_use]
    pub fn contains(&self, asin: &Asin) -> bool {
        self.products.contains_key(asin)
    }

    /// Adds or replaces a product.
    pub fn insert(&mut self, product: Product) -> Option<Product> {
        self.products.insert(product.asin.clone(), product)
    }

    /// Number of tracked products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Tracked products ordered by ASIN.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Tracked ASINs in order.
    #[must_use]
    pub fn asins(&self) -> Vec<Asin> {
        self.products.keys().cloned().collect()
    }
}
