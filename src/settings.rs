use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, ConfigError};
use serde::Deserialize;

use crate::options::CitationOptions;

pub const CONFIG_FILE: &str = "record_sourcer.toml";

/// Where the CLI and harness find fixtures and put results. Read from built-in
/// defaults, then `record_sourcer.toml`, then `SOURCER_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub fixtures_dir: PathBuf,
    pub results_dir: PathBuf,
    #[serde(default)]
    pub options_file: Option<PathBuf>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("fixtures_dir", "tests/fixtures")?
            .set_default("results_dir", "target/regression")?
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("SOURCER"))
            .build()?
            .try_deserialize()
    }

    /// Citation options from the configured options file (if any) with
    /// `overrides` layered on top.
    pub fn citation_options(&self, overrides: &[(String, String)]) -> Result<CitationOptions> {
        let mut options = CitationOptions::default();
        if let Some(path) = &self.options_file {
            options = options.with_overrides(read_option_file(path)?)?;
        }
        Ok(options.with_overrides(overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())))?)
    }
}

/// A JSON object of option overrides, e.g. `{"citation_fmp_dataStyle": "list"}`.
pub fn read_option_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading options file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing options file {}", path.display()))
}
