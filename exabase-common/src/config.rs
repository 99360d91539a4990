//! Configuration loading for the Exabase importers
//!
//! Resolution priority:
//! 1. Path named by the `EXABASE_CONFIG` environment variable
//! 2. `exabase.toml` in the working directory
//! 3. Compiled defaults
//!
//! The defaults reproduce the fixed paths the original import runs used,
//! so a bare `exabase-im` invocation behaves like the legacy scripts.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_ENV_VAR: &str = "EXABASE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "exabase.toml";

/// Importer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Collection data CSV (no header row)
    pub collection_csv: PathBuf,
    /// Records data CSV (one header row)
    pub records_csv: PathBuf,
    /// Molecular data CSV (no header row)
    pub molecular_csv: PathBuf,
    /// Base URL of the GBIF species API
    pub gbif_base_url: String,
    /// institutionID written to specimen records created from collection rows
    pub institution_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("example.db"),
            collection_csv: PathBuf::from("collection_example_data.csv"),
            records_csv: PathBuf::from("records_example_data.csv"),
            molecular_csv: PathBuf::from("molecular_example_data.csv"),
            gbif_base_url: "https://api.gbif.org/v1".to_string(),
            institution_id: "coll. Poloni".to_string(),
        }
    }
}

impl Config {
    /// Load configuration following the ENV -> file -> defaults priority
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }

        tracing::debug!("No config file found, using compiled defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read config {} failed: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse config {} failed: {}", path.display(), e)))?;
        Ok(config)
    }
}
