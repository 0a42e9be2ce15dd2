//! Configuration file support for aibom.
//!
//! Provides YAML-based configuration through `aibom.config.yml` files,
//! including data structures, file loading, and validation. The effective
//! `AppConfig` is built once in `main` and passed into constructors; no
//! component reads the process environment on its own.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use aibom::adapters::outbound::network::DEFAULT_HUB_BASE_URL;
use aibom::analysis::DEFAULT_NUM_BINS;
use aibom::shared::Result;

const CONFIG_FILENAME: &str = "aibom.config.yml";

/// Directory for catalog documents when the config does not set one.
const DEFAULT_CATALOG_DIR: &str = ".aibom";

/// Hours a built percentile distribution is served before a rebuild.
const DEFAULT_CDF_TTL_HOURS: u64 = 5;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub catalog_dir: Option<PathBuf>,
    pub hub_base_url: Option<String>,
    pub scanner_command: Option<PathBuf>,
    pub num_bins: Option<usize>,
    pub cdf_ttl_hours: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Effective application configuration after merging file values with
/// defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the JSON catalog documents.
    pub catalog_dir: PathBuf,
    /// Base URL of the model hub used for remote scans.
    pub hub_base_url: String,
    /// External deserialization scanner; code-bearing files are recorded
    /// without artifacts when unset.
    pub scanner_command: Option<PathBuf>,
    /// Histogram resolution of the percentile distributions.
    pub num_bins: usize,
    /// Lifetime of a built percentile distribution, in hours.
    pub cdf_ttl_hours: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from(DEFAULT_CATALOG_DIR),
            hub_base_url: DEFAULT_HUB_BASE_URL.to_string(),
            scanner_command: None,
            num_bins: DEFAULT_NUM_BINS,
            cdf_ttl_hours: DEFAULT_CDF_TTL_HOURS,
        }
    }
}

impl AppConfig {
    /// Merges an optional config file over the defaults.
    pub fn from_file(file: Option<ConfigFile>) -> Self {
        let mut config = Self::default();
        if let Some(file) = file {
            if let Some(catalog_dir) = file.catalog_dir {
                config.catalog_dir = catalog_dir;
            }
            if let Some(hub_base_url) = file.hub_base_url {
                config.hub_base_url = hub_base_url;
            }
            if let Some(scanner_command) = file.scanner_command {
                config.scanner_command = Some(scanner_command);
            }
            if let Some(num_bins) = file.num_bins {
                config.num_bins = num_bins;
            }
            if let Some(cdf_ttl_hours) = file.cdf_ttl_hours {
                config.cdf_ttl_hours = cdf_ttl_hours;
            }
        }
        config
    }

    /// The percentile-cache TTL as a duration.
    pub fn cdf_ttl(&self) -> Duration {
        Duration::from_secs(self.cdf_ttl_hours * 60 * 60)
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    eprintln!(
        "📖 Auto-discovered config file: {}",
        config_path.display()
    );
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(num_bins) = config.num_bins {
        if num_bins < 2 {
            bail!(
                "Invalid config: num_bins must be at least 2 (got {}).\n\n\
                 💡 Hint: the percentile distribution needs at least two histogram bins.",
                num_bins
            );
        }
    }
    if let Some(hours) = config.cdf_ttl_hours {
        if hours < 1 {
            bail!(
                "Invalid config: cdf_ttl_hours must be at least 1 (got {}).\n\n\
                 💡 Hint: sub-hour cache lifetimes rebuild the distribution on nearly every query.",
                hours
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
