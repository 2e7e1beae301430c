//! Field extraction from a product page.
//!
//! Fields are looked up by fixed element ids. A missing name or seller reads
//! as an empty string; a missing price is an error the tracker turns into "no
//! price recorded".

use once_cell::sync::Lazy;
use pricewatch_shared::{Money, MoneyResult, NumberFormat};
use scraper::{Html, Selector};

use super::error::ScrapeError;

/// Element id of the product title.
pub const ID_PRODUCT_NAME: &str = "productTitle";
/// Element id of the price label.
pub const ID_PRODUCT_PRICE: &str = "priceblock_ourprice";
/// Element id of the seller byline.
pub const ID_PRODUCT_SELLER: &str = "bylineInfo";

static NAME: Lazy<Selector> = Lazy::new(|| id_selector(ID_PRODUCT_NAME));
static PRICE: Lazy<Selector> = Lazy::new(|| id_selector(ID_PRODUCT_PRICE));
static SELLER: Lazy<Selector> = Lazy::new(|| id_selector(ID_PRODUCT_SELLER));

fn id_selector(id: &str) -> Selector {
    Selector::parse(&format!("#{id}")).expect("Invalid selector")
}

/// Parsed product page.
pub struct ProductPage {
    document: Html,
}

impl ProductPage {
    /// Parses a full HTML document.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    fn text_of(&self, selector: &Selector) -> Option<String> {
        self.document
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    /// Product title, or an empty string.
    #[must_use]
    pub fn name(&self) -> String {
        self.text_of(&NAME).unwrap_or_default()
    }

    /// Seller byline, or an empty string.
    #[must_use]
    pub fn seller(&self) -> String {
        self.text_of(&SELLER).unwrap_or_default()
    }

    /// Raw, trimmed price text such as `"12,99 €"`.
    #[must_use]
    pub fn price_text(&self) -> Option<String> {
        self.text_of(&PRICE).filter(|t| !t.is_empty())
    }

    /// Price text split into amount and symbol.
    pub fn price_label(&self) -> Result<PriceLabel, ScrapeError> {
        let text = self.price_text().ok_or(ScrapeError::MissingPrice)?;
        PriceLabel::split(&text).ok_or(ScrapeError::UnrecognizedPrice(text))
    }
}

/// Amount and currency symbol as printed on a price label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLabel {
    /// Localized amount text, e.g. `12,99`.
    pub amount: String,
    /// Currency symbol, e.g. `€`.
    pub symbol: String,
}

impl PriceLabel {
    /// Splits `"12,99 €"`, `"€ 12,99"`, `"€12.99"` or `"12.99€"`.
    ///
    /// Returns `None` for empty text, ranges and anything with more than two
    /// whitespace separated parts.
    #[must_use]
    pub fn split(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let (amount, symbol) = match parts.as_slice() {
            [first, second] if has_digit(first) => (*first, *second),
            [first, second] if has_digit(second) => (*second, *first),
            [token] => split_token(token)?,
            _ => return None,
        };
        Some(Self {
            amount: amount.to_string(),
            symbol: symbol.to_string(),
        })
    }

    /// Builds money from this label.
    pub fn to_money(&self, format: &NumberFormat) -> MoneyResult<Money> {
        Money::parse(&self.amount, &self.symbol, format)
    }
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

fn is_numeric(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+')
}

fn split_token(token: &str) -> Option<(&str, &str)> {
    let first_other = token.find(|c: char| !is_numeric(c))?;
    if first_other > 0 {
        // amount first: "12.99€"
        let (amount, symbol) = token.split_at(first_other);
        return Some((amount, symbol));
    }
    // symbol first: "€12.99"
    let first_numeric = token.find(is_numeric)?;
    let (symbol, amount) = token.split_at(first_numeric);
    Some((amount, symbol))
}
