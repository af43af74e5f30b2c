//! Error types for topic synthesis and publishing.

use std::path::PathBuf;

use interface_dita_core::xml::XmlError;
use thiserror::Error;

/// Errors that abort rendering or writing one document.
#[derive(Debug, Error)]
pub enum SynthError {
    /// A command inherits from a name missing from the command table.
    #[error("{command}: inherits from unknown command {donor}")]
    DanglingDonor { command: String, donor: String },

    /// Serialization of a document failed.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// Writing, creating or copying a file failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the override tree failed.
    #[error("cannot walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The worker pool could not be created.
    #[error("failed to create thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl SynthError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Convenience alias for results with [`SynthError`].
pub type Result<T> = std::result::Result<T, SynthError>;
