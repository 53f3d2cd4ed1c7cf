use crate::constants::{
    DEFAULT_API_URL, DEFAULT_CONFIG_PATH, DEFAULT_CSV_PATH, DEFAULT_HEADER_ROWS,
    DEFAULT_TIMEOUT_SECS,
};
use crate::error::{ImporterError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_CSV_PATH: &str = "TOUR_IMPORT_CSV";
pub const ENV_API_URL: &str = "TOUR_IMPORT_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "TOUR_IMPORT_TIMEOUT_SECS";
pub const ENV_HEADER_ROWS: &str = "TOUR_IMPORT_HEADER_ROWS";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImportConfig {
    pub csv_path: PathBuf,
    pub api_url: String,
    pub timeout_seconds: u64,
    pub header_rows: usize,
    /// Field delimiter of the export, a single ASCII character
    pub delimiter: char,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            header_rows: DEFAULT_HEADER_ROWS,
            delimiter: ',',
        }
    }
}

impl ImportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ImporterError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )))
        }
    }
}

impl Config {
    /// Loads the config file, then applies environment overrides.
    ///
    /// An explicit path must exist. Without one, `tour_importer.toml` is read
    /// if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ImporterError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Applies overrides from a variable lookup (the process environment in production).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(csv) = lookup(ENV_CSV_PATH).filter(|v| !v.trim().is_empty()) {
            self.import.csv_path = PathBuf::from(csv.trim());
        }
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.import.api_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.import.timeout_seconds = raw.trim().parse().map_err(|_| {
                ImporterError::Config(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?;
        }
        if let Some(raw) = lookup(ENV_HEADER_ROWS) {
            self.import.header_rows = raw.trim().parse().map_err(|_| {
                ImporterError::Config(format!("{} must be a row count, got '{}'", ENV_HEADER_ROWS, raw))
            })?;
        }
        Ok(())
    }
}
