//! Model-building configuration.
//!
//! Both lists are snapshot data tied to one revision of the upstream
//! interface files, so they live in configuration rather than in code.
//!
//! # Example YAML
//!
//! ```yaml
//! duplicate_allowlist:
//!   - thinspace
//!   - monobold
//! variant_bypass:
//!   - setuppapersize
//! ```

use serde::{Deserialize, Serialize};

/// Stanza names declared more than once upstream that cannot be told apart.
pub const DEFAULT_DUPLICATE_ALLOWLIST: &[&str] = &[
    "thinspace",
    "monobold",
    "xmlregisterns",
    "defineinterlinespace",
    "setupinterlinespace",
    "setuplocalinterlinespace",
    "switchtointerlinespace",
    "dosetupcheckedinterlinespace",
    "useinterlinespaceparameter",
    "definelinefiller",
    "setuplinefiller",
    "setuplinefillers",
    "startlinefiller",
    "stoplinefiller",
    "setlinefiller",
    "starttexcode",
    "stoptexcode",
];

/// Stanzas whose variant marker is ignored during classification.
pub const DEFAULT_VARIANT_BYPASS: &[&str] = &["setuppapersize"];

/// Settings for one interface build.
///
/// # Examples
///
/// ```
/// use interface_dita_builder::BuildConfig;
///
/// let config = BuildConfig::default();
/// assert!(config.allows_duplicate("thinspace"));
/// assert!(!config.allows_duplicate("setupfoo"));
/// assert!(config.bypasses_variant("setuppapersize"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Names whose repeated declarations are dropped without a warning.
    pub duplicate_allowlist: Vec<String>,
    /// Names classified as if they carried no variant marker.
    pub variant_bypass: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            duplicate_allowlist: DEFAULT_DUPLICATE_ALLOWLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
            variant_bypass: DEFAULT_VARIANT_BYPASS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl BuildConfig {
    /// Returns `true` if repeated declarations of `name` are expected.
    pub fn allows_duplicate(&self, name: &str) -> bool {
        self.duplicate_allowlist.iter().any(|n| n == name)
    }

    /// Returns `true` if the variant marker of `name` is ignored.
    pub fn bypasses_variant(&self, name: &str) -> bool {
        self.variant_bypass.iter().any(|n| n == name)
    }
}
