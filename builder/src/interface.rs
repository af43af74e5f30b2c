//! Whole-interface model building.
//!
//! The build runs in two passes. The first classifies every stanza in
//! declaration order and expands it into pending commands and relations.
//! The second inserts the pending commands into the [`CommandTable`], where
//! the first occurrence of a name wins. A stanza whose commands were all
//! dropped contributes neither its relation nor its donors.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexSet;
use interface_dita_core::xml::{Element, Node};
use interface_dita_core::{
    Class, Command, CommandTable, DonorSet, Environment, INTERFACE_NAMESPACE, Insertion, Relation,
    Shape,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classify::classify_stanza;
use crate::config::BuildConfig;
use crate::error::{BuildError, Result};
use crate::expand::{Expansion, expand_class, expand_environment};
use crate::report::{BuildReport, Diagnostic};

/// A stanza that was classified as an unsupported variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub name: String,
    pub variant: String,
}

/// Everything built from one interface description.
#[derive(Debug, Default)]
pub struct InterfaceModel {
    pub commands: CommandTable,
    /// Class and environment memberships in declaration order.
    pub relations: Vec<Relation>,
    pub variants: Vec<VariantRecord>,
    /// Donors referenced by any built command.
    pub donors: DonorSet,
    pub report: BuildReport,
}

impl InterfaceModel {
    /// Class relations in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.relations.iter().filter_map(|relation| match relation {
            Relation::Class(class) => Some(class),
            Relation::Environment(_) => None,
        })
    }

    /// Plain environment relations in declaration order.
    pub fn environments(&self) -> impl Iterator<Item = &Environment> {
        self.relations.iter().filter_map(|relation| match relation {
            Relation::Environment(environment) => Some(environment),
            Relation::Class(_) => None,
        })
    }

    /// Distinct class names in declaration order.
    pub fn class_names(&self) -> IndexSet<&str> {
        self.classes().map(|class| class.name.as_str()).collect()
    }

    /// Distinct environment stems in declaration order.
    pub fn environment_names(&self) -> IndexSet<&str> {
        self.environments().map(|env| env.stem.as_str()).collect()
    }
}

/// Reads and parses an interface file.
///
/// # Errors
///
/// Returns [`BuildError::Io`] if the file cannot be read,
/// [`BuildError::Xml`] if it is not well-formed and
/// [`BuildError::NotInterface`] if its root is not `cd:interface`.
pub fn load_interface(path: impl AsRef<Path>) -> Result<Element> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_interface(&input)
}

/// Parses interface XML held in memory.
pub fn parse_interface(input: &str) -> Result<Element> {
    let root = Element::parse(input)?;
    if !root.is(INTERFACE_NAMESPACE, "interface") {
        return Err(BuildError::NotInterface(root.name));
    }
    Ok(root)
}

/// Takes every `command` stanza out of the tree, descending into nested
/// `interface` elements.
fn take_stanzas(root: Element, stanzas: &mut Vec<Element>) {
    for node in root.children {
        let Node::Element(child) = node else {
            continue;
        };
        if child.is(INTERFACE_NAMESPACE, "command") {
            stanzas.push(child);
        } else if child.is(INTERFACE_NAMESPACE, "interface") {
            take_stanzas(child, stanzas);
        }
    }
}

/// Commands, relation and donors of one classified stanza, awaiting insertion.
struct PendingStanza {
    commands: Vec<Command>,
    relation: Option<Relation>,
    donors: DonorSet,
}

/// Builds the command model from a parsed interface description.
///
/// # Examples
///
/// ```
/// use interface_dita_builder::{BuildConfig, build_interface, parse_interface};
///
/// let root = parse_interface(
///     r#"<cd:interface xmlns:cd="http://www.pragma-ade.com/commands">
///          <cd:interface>
///            <cd:command name="section" type="environment"/>
///          </cd:interface>
///        </cd:interface>"#,
/// ).unwrap();
///
/// let model = build_interface(root, &BuildConfig::default());
/// assert!(model.commands.contains("startsection"));
/// assert!(model.commands.contains("stopsection"));
/// assert_eq!(model.relations.len(), 1);
/// ```
pub fn build_interface(root: Element, config: &BuildConfig) -> InterfaceModel {
    let mut stanzas = Vec::new();
    take_stanzas(root, &mut stanzas);

    let mut model = InterfaceModel::default();
    let mut diagnostics = Vec::new();
    let mut pending: Vec<PendingStanza> = Vec::new();
    let mut planned: HashSet<String> = HashSet::new();

    model.report.stanzas = stanzas.len();

    for (position, stanza) in stanzas.into_iter().enumerate() {
        let classification = match classify_stanza(&stanza, &config.variant_bypass) {
            Ok(classification) => classification,
            Err(err) => {
                debug!(position, error = %err, "skipping stanza");
                diagnostics.push(Diagnostic::UnnamedStanza {
                    position,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        let name = classification.name.as_str();

        let environment_start = format!("start{name}");
        if let Some(duplicate) = [name, environment_start.as_str()]
            .into_iter()
            .find(|candidate| config.allows_duplicate(candidate) && planned.contains(*candidate))
        {
            debug!(command = %duplicate, "dropping known duplicate stanza");
            diagnostics.push(Diagnostic::AllowedDuplicate {
                name: duplicate.to_string(),
            });
            continue;
        }

        let stanza = Arc::new(stanza);
        let expansion = match classification.shape {
            Shape::Class => expand_class(&classification, &stanza),
            Shape::Environment => expand_environment(&classification, &stanza),
            Shape::Command => Expansion::single(name, &stanza),
            Shape::Variant => {
                let variant = classification.variant.clone().unwrap_or_default();
                debug!(command = %name, variant = %variant, "noting variant");
                diagnostics.push(Diagnostic::Variant {
                    name: name.to_string(),
                    variant: variant.clone(),
                });
                model.variants.push(VariantRecord {
                    name: name.to_string(),
                    variant,
                });
                continue;
            }
        };

        planned.extend(expansion.commands.iter().map(|c| c.name.clone()));
        diagnostics.extend(expansion.findings.diagnostics);
        pending.push(PendingStanza {
            commands: expansion.commands,
            relation: expansion.relation,
            donors: expansion.findings.donors,
        });
    }

    // Relations and donors only count for stanzas that kept a command.
    for stanza in pending {
        let mut kept = false;
        for command in stanza.commands {
            let name = command.name.clone();
            match model
                .commands
                .insert(command, |n| config.allows_duplicate(n))
            {
                Insertion::Inserted => kept = true,
                Insertion::AllowedDuplicate => {
                    debug!(command = %name, "dropping known duplicate");
                    diagnostics.push(Diagnostic::AllowedDuplicate { name });
                }
                Insertion::Clobbered => {
                    warn!(command = %name, "duplicate declaration, keeping the first");
                    diagnostics.push(Diagnostic::Clobber { name });
                }
            }
        }
        if kept {
            model.relations.extend(stanza.relation);
            model.donors.merge(stanza.donors);
        }
    }

    model.report.commands = model.commands.len();
    model.report.classes = model.class_names().len();
    model.report.environments = model.environment_names().len();
    model.report.variants = model.variants.len();
    model.report.donors = model.donors.len();
    model.report.diagnostics = diagnostics;

    info!(
        stanzas = model.report.stanzas,
        commands = model.report.commands,
        classes = model.report.classes,
        environments = model.report.environments,
        variants = model.report.variants,
        "interface model built"
    );

    model
}
