//! Catalog stored as a single JSON file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pricewatch_core::tracker::Catalog;
use pricewatch_shared::Settings;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::StoreError;

/// Reads and writes the catalog at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonProductStore {
    path: PathBuf,
}

impl JsonProductStore {
    /// Store at an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `settings.db_path / settings.db_name`.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.db_file())
    }

    /// Database file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog. A missing file is an empty catalog.
    ///
    /// # Errors
    ///
    /// `Corrupt` if the file exists but does not parse. The file is left
    /// untouched so nothing tracked so far is overwritten by the next save.
    pub fn load(&self) -> Result<Catalog, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No product database yet, starting empty");
                return Ok(Catalog::new());
            }
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        let catalog: Catalog =
            serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), products = catalog.len(), "Loaded product database");
        Ok(catalog)
    }

    /// Writes the catalog, creating the directory if needed.
    ///
    /// The file is replaced atomically: readers see either the old or the new
    /// catalog, never a partial write.
    pub fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let json = serde_json::to_string_pretty(catalog)? + "\n";
        let mut file = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| StoreError::io(file.path(), e))?;
        file.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), products = catalog.len(), "Saved product database");
        Ok(())
    }
}
