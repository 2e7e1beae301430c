//! Scraper settings management.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::types::{Currency, NumberFormat};

/// Settings file read when no other path is given.
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Prefix of environment overrides, e.g. `PRICEWATCH__TLD=fr`.
pub const ENV_PREFIX: &str = "PRICEWATCH";

/// General settings of the scraper.
///
/// Missing keys fall back to defaults and unknown keys are ignored, so older
/// settings files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Settings format version.
    pub version: String,
    /// `strftime` pattern of the date keys in price histories.
    pub date_format: String,
    /// Currency every tracked price is converted to.
    pub currency: Currency,
    /// Directory holding the product database.
    pub db_path: PathBuf,
    /// File name of the product database.
    pub db_name: String,
    /// Headers sent with every product page request.
    pub headers: BTreeMap<String, String>,
    /// Shop URL up to the top-level domain, e.g. `https://www.amazon.`.
    pub base_url: String,
    /// Top-level domain appended to `base_url`.
    pub tld: String,
    /// Exchange-rate endpoint queried with `base` and `symbols`.
    pub rates_url: String,
    /// Separators used on the shop's price labels.
    pub number_format: NumberFormat,
    /// Request timeout; `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

fn default_headers() -> BTreeMap<String, String> {
    let user_agent = format!(
        "pricewatch/{} (Language=Rust; Platform={})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );
    BTreeMap::from([("User-Agent".to_string(), user_agent)])
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            date_format: "%d/%m/%y".to_string(),
            currency: Currency::Usd,
            db_path: PathBuf::from("data"),
            db_name: "products.json".to_string(),
            headers: default_headers(),
            base_url: "https://www.amazon.".to_string(),
            tld: "de".to_string(),
            rates_url: "https://api.frankfurter.app/latest".to_string(),
            number_format: NumberFormat::default(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Loads settings from the JSON file at `path` and the environment.
    ///
    /// A missing file is not an error: defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or a value has the wrong type.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let config = config::Config::builder()
            .add_source(
                config::File::from(path.as_ref())
                    .format(config::FileFormat::Json)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Writes these settings as pretty-printed JSON to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Full path of the product database file.
    #[must_use]
    pub fn db_file(&self) -> PathBuf {
        self.db_path.join(&self.db_name)
    }
}
