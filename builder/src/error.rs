//! Error types for interface loading and stanza classification.

use std::path::PathBuf;

use interface_dita_core::xml::XmlError;
use thiserror::Error;

/// Errors that abort loading an interface description.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The interface file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The interface file is not well-formed XML.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// The root element is not `cd:interface`.
    #[error("root element <{0}> is not an interface description")]
    NotInterface(String),
}

/// Reasons a stanza cannot be named.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StanzaError {
    /// The stanza has no `name` attribute.
    #[error("stanza has no name")]
    MissingName,

    /// The name is empty once non-ASCII characters are dropped.
    #[error("stanza name {raw:?} is empty after cleanup")]
    EmptyName { raw: String },
}

/// Convenience alias for results with [`BuildError`].
pub type Result<T> = std::result::Result<T, BuildError>;
