//! Option-set and assignment-set entry walking.
//!
//! Option-sets hold constants and inheritances. Assignment-sets hold
//! parameters (each with its own constants and inheritances) and whole-set
//! inheritances, so settings nest one level deeper than options.

use interface_dita_core::xml::Element;
use interface_dita_core::{
    Entry, EntryGroup, INTERFACE_NAMESPACE, Inheritance, Setting, placeholder_name,
};
use tracing::warn;

use crate::command::Findings;
use crate::report::Diagnostic;

/// Tag of one child of an option-set or assignment-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryTag {
    Constant,
    Inherit,
    Parameter,
    Unknown(String),
}

impl EntryTag {
    pub fn of(element: &Element) -> Self {
        if element.namespace.as_deref() != Some(INTERFACE_NAMESPACE) {
            return Self::Unknown(element.name.clone());
        }
        match element.name.as_str() {
            "constant" => Self::Constant,
            "inherit" => Self::Inherit,
            "parameter" => Self::Parameter,
            other => Self::Unknown(other.to_string()),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Constant => "constant",
            Self::Inherit => "inherit",
            Self::Parameter => "parameter",
            Self::Unknown(name) => name,
        }
    }
}

/// Walks the children of a `keywords` element.
pub fn build_options(set: &Element, findings: &mut Findings) -> Vec<Entry> {
    set.elements()
        .filter_map(|child| keyed_entry(child, findings))
        .collect()
}

/// Walks the children of an `assignments` element.
pub fn build_settings(set: &Element, findings: &mut Findings) -> Vec<Setting> {
    let mut settings = Vec::new();
    for child in set.elements() {
        let tag = EntryTag::of(child);
        let setting = match tag {
            EntryTag::Inherit => {
                inheritance(child, EntryGroup::Settings, findings).map(Setting::Inherit)
            }
            EntryTag::Parameter => match child.attr("name") {
                Some(name) => Some(Setting::Parameter {
                    name: name.to_string(),
                    keys: child
                        .elements()
                        .filter_map(|key| keyed_entry(key, findings))
                        .collect(),
                }),
                None => {
                    missing_attribute(&tag, "name", findings);
                    None
                }
            },
            _ => {
                unknown_entry(&tag, findings);
                None
            }
        };
        settings.extend(setting);
    }
    settings
}

/// An option entry or a parameter key: a constant or an options inheritance.
fn keyed_entry(element: &Element, findings: &mut Findings) -> Option<Entry> {
    let tag = EntryTag::of(element);
    match tag {
        EntryTag::Constant => {
            let Some(value_type) = element.attr("type") else {
                missing_attribute(&tag, "type", findings);
                return None;
            };
            let default = element.attr("default") == Some("yes");
            Some(match placeholder_name(value_type) {
                Some(name) => Entry::Placeholder { name, default },
                None => Entry::Keyword {
                    text: value_type.to_string(),
                    default,
                },
            })
        }
        EntryTag::Inherit => inheritance(element, EntryGroup::Options, findings).map(Entry::Inherit),
        _ => {
            unknown_entry(&tag, findings);
            None
        }
    }
}

fn inheritance(element: &Element, group: EntryGroup, findings: &mut Findings) -> Option<Inheritance> {
    let Some(donor) = element.attr("name") else {
        missing_attribute(&EntryTag::Inherit, "name", findings);
        return None;
    };
    findings.donors.insert(donor);
    Some(Inheritance::new(donor, group))
}

fn unknown_entry(tag: &EntryTag, findings: &mut Findings) {
    warn!(command = %findings.command, tag = tag.name(), "skipping unexpected entry");
    findings.diagnostics.push(Diagnostic::UnknownEntry {
        command: findings.command.clone(),
        tag: tag.name().to_string(),
    });
}

fn missing_attribute(tag: &EntryTag, attribute: &str, findings: &mut Findings) {
    warn!(command = %findings.command, tag = tag.name(), attribute, "skipping incomplete entry");
    findings.diagnostics.push(Diagnostic::MissingAttribute {
        command: findings.command.clone(),
        tag: tag.name().to_string(),
        attribute: attribute.to_string(),
    });
}
