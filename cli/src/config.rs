//! Tool configuration.
//!
//! Every section falls back to its defaults, so an empty file (or no file
//! at all) reproduces the stock behavior.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! build:
//!   duplicate_allowlist: [thinspace, monobold]
//!   variant_bypass: [setuppapersize]
//! topics:
//!   product_name: ConTeXt
//!   product_version: iv
//!   source_base_url: https://source.contextgarden.net/tex/context/base/mkiv/
//!   source_path_prefix: tex/texmf-context/tex/context/base/mkiv/
//!   review_window_days: [120, 240]
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::LazyLock;

use interface_dita_builder::BuildConfig;
use interface_dita_synth::TopicConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_VERSION: &str = "1.0";

static LANGUAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("static regex must compile"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid language tag '{0}'")]
    InvalidLanguage(String),

    #[error("unsupported config version '{0}'")]
    UnsupportedVersion(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DitaConfig {
    pub version: String,
    pub build: BuildConfig,
    pub topics: TopicConfig,
}

impl Default for DitaConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            build: BuildConfig::default(),
            topics: TopicConfig::default(),
        }
    }
}

impl DitaConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if parsing fails and
    /// [`ConfigError::UnsupportedVersion`] for a foreign major version.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        if !config.version.starts_with("1.") {
            return Err(ConfigError::UnsupportedVersion(config.version));
        }
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Checks a BCP 47 style language tag such as `en` or `pt-BR`.
pub fn validate_language(lang: &str) -> Result<()> {
    if LANGUAGE_TAG.is_match(lang) {
        Ok(())
    } else {
        Err(ConfigError::InvalidLanguage(lang.to_string()))
    }
}
