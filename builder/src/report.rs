//! Structured build diagnostics.
//!
//! Every recoverable problem met while building the model becomes a
//! [`Diagnostic`]. The build keeps going; the CLI prints or saves the
//! collected [`BuildReport`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of one diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

/// One recoverable finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Stanza without a usable name; skipped.
    UnnamedStanza { position: usize, reason: String },
    /// Variant stanza; reported but not modeled.
    Variant { name: String, variant: String },
    /// Argument tag outside the known set; kind left unresolved.
    UnknownArgument { command: String, tag: String },
    /// Entry tag not valid in its set; entry skipped.
    UnknownEntry { command: String, tag: String },
    /// Entry lacking an attribute it cannot do without; entry skipped.
    MissingAttribute {
        command: String,
        tag: String,
        attribute: String,
    },
    /// Known duplicate declaration; dropped.
    AllowedDuplicate { name: String },
    /// Unexpected duplicate declaration; the first occurrence was kept.
    Clobber { name: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Variant { .. } | Self::AllowedDuplicate { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnnamedStanza { position, reason } => {
                write!(f, "stanza #{position} skipped: {reason}")
            }
            Self::Variant { name, variant } => {
                write!(f, "{name}: variant \"{variant}\" not documented")
            }
            Self::UnknownArgument { command, tag } => {
                write!(f, "{command}: unknown argument <{tag}>")
            }
            Self::UnknownEntry { command, tag } => {
                write!(f, "{command}: unexpected entry <{tag}> skipped")
            }
            Self::MissingAttribute {
                command,
                tag,
                attribute,
            } => write!(f, "{command}: <{tag}> without {attribute} skipped"),
            Self::AllowedDuplicate { name } => write!(f, "{name}: known duplicate dropped"),
            Self::Clobber { name } => {
                write!(f, "{name}: duplicate declaration, first occurrence kept")
            }
        }
    }
}

/// Summary of one model build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub stanzas: usize,
    pub commands: usize,
    pub classes: usize,
    pub environments: usize,
    pub variants: usize,
    pub donors: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    /// Diagnostics at [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
    }

    /// Number of clobbered declarations.
    pub fn clobbers(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::Clobber { .. }))
            .count()
    }
}
