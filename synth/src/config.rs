//! Topic rendering configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! product_name: ConTeXt
//! product_version: iv
//! source_base_url: https://source.contextgarden.net/tex/context/base/mkiv/
//! source_path_prefix: tex/texmf-context/tex/context/base/mkiv/
//! review_window_days: [120, 240]
//! ```

use serde::{Deserialize, Serialize};

/// Product and source-location metadata written into every topic.
///
/// # Examples
///
/// ```
/// use interface_dita_synth::TopicConfig;
///
/// let config = TopicConfig::default();
/// assert_eq!(config.product_name, "ConTeXt");
/// assert_eq!(config.source_url("core-env.mkiv"),
///     "https://source.contextgarden.net/tex/context/base/mkiv/core-env.mkiv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicConfig {
    pub product_name: String,
    pub product_version: String,
    /// Prefix of the online source link in related links.
    pub source_base_url: String,
    /// Prefix of the `source` path in the prolog.
    pub source_path_prefix: String,
    /// Inclusive lower and exclusive upper bound, in days, of the review
    /// expiry offset.
    pub review_window_days: (u32, u32),
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            product_name: "ConTeXt".to_string(),
            product_version: "iv".to_string(),
            source_base_url: "https://source.contextgarden.net/tex/context/base/mkiv/"
                .to_string(),
            source_path_prefix: "tex/texmf-context/tex/context/base/mkiv/".to_string(),
            review_window_days: (120, 240),
        }
    }
}

impl TopicConfig {
    pub fn source_url(&self, file: &str) -> String {
        format!("{}{file}", self.source_base_url)
    }

    pub fn source_path(&self, file: &str) -> String {
        format!("{}{file}", self.source_path_prefix)
    }
}
