//! Name-keyed command table.
//!
//! Commands are kept in declaration order so dumps and index maps are
//! stable across runs. On a name collision the first occurrence wins.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Command, EntryGroup};

/// Outcome of [`CommandTable::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The name was new.
    Inserted,
    /// The name was taken and is a known, harmless duplicate.
    AllowedDuplicate,
    /// The name was taken and is not on the allow-list.
    Clobbered,
}

/// Commands keyed by name, in insertion order.
///
/// # Examples
///
/// ```
/// use interface_dita_core::{Command, CommandTable, Insertion};
///
/// let mut table = CommandTable::new();
/// assert_eq!(table.insert(Command::new("thinspace"), |_| true), Insertion::Inserted);
///
/// let mut second = Command::new("thinspace");
/// second.is_system = true;
/// assert_eq!(table.insert(second, |name| name == "thinspace"), Insertion::AllowedDuplicate);
/// assert!(!table.get("thinspace").unwrap().is_system);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTable {
    commands: IndexMap<String, Command>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a command unless its name is already taken.
    ///
    /// `known_duplicate` is only consulted on a collision and decides how
    /// the collision is reported. The stored command is never replaced.
    pub fn insert(&mut self, command: Command, known_duplicate: impl Fn(&str) -> bool) -> Insertion {
        if self.commands.contains_key(&command.name) {
            if known_duplicate(&command.name) {
                return Insertion::AllowedDuplicate;
            }
            return Insertion::Clobbered;
        }
        self.commands.insert(command.name.clone(), command);
        Insertion::Inserted
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Command names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Entry count of `donor`'s first argument of `group`.
    ///
    /// Returns `None` when the donor is unknown or has no such argument.
    pub fn donor_count(&self, donor: &str, group: EntryGroup) -> Option<usize> {
        self.get(donor)?.entry_count(group)
    }
}

impl<'a> IntoIterator for &'a CommandTable {
    type Item = &'a Command;
    type IntoIter = indexmap::map::Values<'a, String, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clobber_keeps_first_model() {
        let mut table = CommandTable::new();
        let mut first = Command::new("setupfoo");
        first.category = Some("layout".into());
        table.insert(first.clone(), |_| false);

        let outcome = table.insert(Command::new("setupfoo"), |_| false);
        assert_eq!(outcome, Insertion::Clobbered);
        assert_eq!(table.get("setupfoo"), Some(&first));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let mut table = CommandTable::new();
        for name in ["zeta", "alpha", "mid"] {
            table.insert(Command::new(name), |_| false);
        }
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_donor_count_unknown_donor() {
        let table = CommandTable::new();
        assert_eq!(table.donor_count("location", EntryGroup::Options), None);
    }
}
