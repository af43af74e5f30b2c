//! Command table validation.
//!
//! Checks the cross-command conditions that rendering relies on: every
//! inherited donor exists, and every donor has the argument group it is
//! inherited from. Problems are collected rather than returned on the first
//! hit so a full report can be printed.
//!
//! # Examples
//!
//! ```
//! use interface_dita_core::*;
//!
//! let mut table = CommandTable::new();
//! let mut command = Command::new("setupfoo");
//! command.arguments.push(
//!     Argument::new(ArgumentKind::Options, Delimiters::Brackets)
//!         .named("options1")
//!         .with_body(ArgumentBody::Options(vec![Entry::Inherit(Inheritance::new(
//!             "location",
//!             EntryGroup::Options,
//!         ))])),
//! );
//! table.insert(command, |_| false);
//!
//! let errors = validate_table(&table);
//! assert!(matches!(errors[0], ValidationError::DanglingDonor { .. }));
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{Command, CommandTable, EntryGroup};

/// Command table validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// A command inherits from a name that is not in the table.
    #[error("{command}: inherits from unknown command {donor}")]
    DanglingDonor { command: String, donor: String },
    /// The donor exists but its inherited group is absent or empty.
    #[error("{command}: donor {donor} has no {group} entries")]
    MissingDonorGroup {
        command: String,
        donor: String,
        group: EntryGroup,
    },
    /// Two arguments of one command share a synthetic name.
    #[error("{command}: duplicate argument name {name}")]
    DuplicateArgumentName { command: String, name: String },
}

/// Validates every command of the table.
pub fn validate_table(table: &CommandTable) -> Vec<ValidationError> {
    table
        .iter()
        .flat_map(|command| validate_command(command, table))
        .collect()
}

/// Validates one command against the table it lives in.
pub fn validate_command(command: &Command, table: &CommandTable) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if command.name.trim().is_empty() {
        errors.push(ValidationError::EmptyCommandName);
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for name in command.arguments.iter().filter_map(|a| a.name.as_deref()) {
        let synthetic = name.starts_with("options") || name.starts_with("settings");
        if synthetic && !seen.insert(name) {
            errors.push(ValidationError::DuplicateArgumentName {
                command: command.name.clone(),
                name: name.to_string(),
            });
        }
    }

    let mut checked = HashSet::new();
    for inheritance in command.inheritances() {
        if !checked.insert((inheritance.donor.as_str(), inheritance.group)) {
            continue;
        }
        match table.get(&inheritance.donor) {
            None => errors.push(ValidationError::DanglingDonor {
                command: command.name.clone(),
                donor: inheritance.donor.clone(),
            }),
            Some(donor) if matches!(donor.entry_count(inheritance.group), None | Some(0)) => {
                errors.push(ValidationError::MissingDonorGroup {
                    command: command.name.clone(),
                    donor: inheritance.donor.clone(),
                    group: inheritance.group,
                });
            }
            Some(_) => {}
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use crate::{Argument, ArgumentBody, ArgumentKind, Delimiters, Entry, Inheritance, Setting};

    use super::*;

    fn inheriting(name: &str, donor: &str, group: EntryGroup) -> Command {
        let mut command = Command::new(name);
        command.arguments.push(
            Argument::new(ArgumentKind::Settings, Delimiters::Brackets)
                .named("settings1")
                .with_body(ArgumentBody::Settings(vec![Setting::Inherit(
                    Inheritance::new(donor, group),
                )])),
        );
        command
    }

    #[test]
    fn test_validate_accepts_resolved_donor() {
        let mut table = CommandTable::new();
        table.insert(inheriting("setupfoo", "setupbar", EntryGroup::Settings), |_| false);
        table.insert(inheriting("setupbar", "setupfoo", EntryGroup::Settings), |_| false);

        assert!(validate_table(&table).is_empty());
    }

    #[test]
    fn test_validate_reports_missing_group() {
        let mut table = CommandTable::new();
        table.insert(inheriting("setupfoo", "location", EntryGroup::Options), |_| false);
        table.insert(Command::new("location"), |_| false);

        let errors = validate_table(&table);
        assert_eq!(
            errors,
            vec![ValidationError::MissingDonorGroup {
                command: "setupfoo".to_string(),
                donor: "location".to_string(),
                group: EntryGroup::Options,
            }]
        );
    }

    #[test]
    fn test_validate_reports_empty_donor_group() {
        let mut location = Command::new("location");
        location.arguments.push(
            Argument::new(ArgumentKind::Options, Delimiters::Brackets)
                .named("options1")
                .with_body(ArgumentBody::Options(Vec::new())),
        );
        let mut table = CommandTable::new();
        table.insert(inheriting("setupfoo", "location", EntryGroup::Options), |_| false);
        table.insert(location, |_| false);

        let errors = validate_table(&table);
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::MissingDonorGroup { donor, group: EntryGroup::Options, .. }] if donor == "location"
        ));
    }

    #[test]
    fn test_validate_reports_each_donor_once() {
        let mut command = inheriting("setupfoo", "ghost", EntryGroup::Settings);
        command.arguments.push(
            Argument::new(ArgumentKind::Options, Delimiters::Brackets)
                .named("options1")
                .with_body(ArgumentBody::Options(vec![
                    Entry::Inherit(Inheritance::new("ghost", EntryGroup::Settings)),
                ])),
        );
        let mut table = CommandTable::new();
        table.insert(command, |_| false);

        assert_eq!(validate_table(&table).len(), 1);
    }

    #[test]
    fn test_validate_rejects_duplicate_synthetic_names() {
        let mut command = Command::new("setupfoo");
        for _ in 0..2 {
            command.arguments.push(
                Argument::new(ArgumentKind::Options, Delimiters::Brackets).named("options1"),
            );
        }
        let table = CommandTable::new();
        let errors = validate_command(&command, &table);
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::DuplicateArgumentName { .. }]
        ));
    }
}
