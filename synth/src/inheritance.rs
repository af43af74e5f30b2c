//! Inheritance reference resolution.
//!
//! An inherited entry transcludes rows from the donor's own topic. The shape
//! of the reference depends on how many entries the donor's first option-set
//! or assignment-set holds: one entry is addressed by a single id, several by
//! a start/stop id range.

use interface_dita_core::xml::Element;
use interface_dita_core::{CommandTable, DonorSet, EntryGroup, Inheritance};
use serde::Serialize;
use tracing::warn;

use crate::error::{Result, SynthError};

/// Key of a donor command topic.
pub fn command_key(name: &str) -> String {
    format!("command_{name}")
}

/// A resolved transclusion into a donor topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// `command_<donor>/<group>_entry`
    Point { donor: String, group: EntryGroup },
    /// `command_<donor>/<group>_start` through `default.dita#default/<group>_stop`
    Range { donor: String, group: EntryGroup },
}

impl Reference {
    pub fn donor(&self) -> &str {
        match self {
            Self::Point { donor, .. } | Self::Range { donor, .. } => donor,
        }
    }

    /// Value of the `conkeyref` attribute.
    pub fn conkeyref(&self) -> String {
        match self {
            Self::Point { donor, group } => format!("{}/{}_entry", command_key(donor), group.id()),
            Self::Range { donor, group } => format!("{}/{}_start", command_key(donor), group.id()),
        }
    }

    /// Value of the `conrefend` attribute; ranges only.
    pub fn conrefend(&self) -> Option<String> {
        match self {
            Self::Point { .. } => None,
            Self::Range { group, .. } => Some(format!("default.dita#default/{}_stop", group.id())),
        }
    }

    /// Applies `conkeyref` and, for ranges, `conrefend`.
    pub fn apply(&self, element: &mut Element) {
        element.set_attr("conkeyref", self.conkeyref());
        if let Some(end) = self.conrefend() {
            element.set_attr("conrefend", end);
        }
    }
}

/// Non-fatal problems found while rendering one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SynthWarning {
    /// The donor exists but has no entries in the inherited group; the row
    /// was left out.
    MissingDonorCount {
        command: String,
        donor: String,
        group: EntryGroup,
    },
}

impl std::fmt::Display for SynthWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDonorCount {
                command,
                donor,
                group,
            } => write!(f, "{command}: {donor} has no {} entries to inherit", group.id()),
        }
    }
}

/// Resolves inherited entries for one command topic.
///
/// Collects every donor it resolves and every non-fatal problem it meets.
pub struct Resolver<'a> {
    table: &'a CommandTable,
    command: &'a str,
    donors: DonorSet,
    warnings: Vec<SynthWarning>,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a CommandTable, command: &'a str) -> Self {
        Self {
            table,
            command,
            donors: DonorSet::new(),
            warnings: Vec::new(),
        }
    }

    pub fn command(&self) -> &str {
        self.command
    }

    /// Resolves one inheritance.
    ///
    /// Returns `Ok(None)` when the donor has nothing to inherit; the caller
    /// skips the row.
    pub fn resolve(&mut self, inheritance: &Inheritance) -> Result<Option<Reference>> {
        let donor = inheritance.donor.as_str();
        if !self.table.contains(donor) {
            return Err(SynthError::DanglingDonor {
                command: self.command.to_string(),
                donor: donor.to_string(),
            });
        }
        self.donors.insert(donor);

        match self.table.donor_count(donor, inheritance.group) {
            Some(1) => Ok(Some(Reference::Point {
                donor: donor.to_string(),
                group: inheritance.group,
            })),
            Some(count) if count > 1 => Ok(Some(Reference::Range {
                donor: donor.to_string(),
                group: inheritance.group,
            })),
            _ => {
                warn!(
                    command = %self.command,
                    donor = %donor,
                    group = %inheritance.group,
                    "Donor has no entries to inherit, skipping row"
                );
                self.warnings.push(SynthWarning::MissingDonorCount {
                    command: self.command.to_string(),
                    donor: donor.to_string(),
                    group: inheritance.group,
                });
                Ok(None)
            }
        }
    }

    /// Records a donor referenced outside a transclusion, e.g. in the
    /// short-options row.
    pub fn touch(&mut self, inheritance: &Inheritance) -> Result<()> {
        if !self.table.contains(&inheritance.donor) {
            return Err(SynthError::DanglingDonor {
                command: self.command.to_string(),
                donor: inheritance.donor.clone(),
            });
        }
        self.donors.insert(&inheritance.donor);
        Ok(())
    }

    pub fn finish(self) -> (DonorSet, Vec<SynthWarning>) {
        (self.donors, self.warnings)
    }
}
