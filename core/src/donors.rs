//! Donor bookkeeping for the inheritance map.
//!
//! Every command whose entries are inherited by another command is a donor.
//! The inheritance map keys each donor exactly once, so the set is
//! idempotent. Stages return their own [`DonorSet`] and callers merge them,
//! which keeps parallel synthesis free of shared mutable state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Sorted, deduplicated set of donor command names.
///
/// # Examples
///
/// ```
/// use interface_dita_core::DonorSet;
///
/// let mut donors = DonorSet::new();
/// assert!(donors.insert("setupframed"));
/// assert!(!donors.insert("setupframed"));
///
/// let mut other = DonorSet::new();
/// other.insert("setupalign");
/// donors.merge(other);
///
/// assert_eq!(donors.iter().collect::<Vec<_>>(), vec!["setupalign", "setupframed"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonorSet(BTreeSet<String>);

impl DonorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a donor. Returns `false` if it was already present.
    pub fn insert(&mut self, donor: &str) -> bool {
        if self.0.contains(donor) {
            return false;
        }
        self.0.insert(donor.to_string())
    }

    /// Moves every donor of `other` into this set.
    pub fn merge(&mut self, other: DonorSet) {
        self.0.extend(other.0);
    }

    pub fn contains(&self, donor: &str) -> bool {
        self.0.contains(donor)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Donor names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for DonorSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<DonorSet> for DonorSet {
    fn extend<I: IntoIterator<Item = DonorSet>>(&mut self, iter: I) {
        for other in iter {
            self.merge(other);
        }
    }
}
