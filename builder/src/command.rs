//! Command model assembly.

use std::sync::Arc;

use interface_dita_core::xml::Element;
use interface_dita_core::{Command, DonorSet, INTERFACE_NAMESPACE, InstanceOf};
use tracing::debug;

use crate::arguments::{Ordinals, build_argument};
use crate::report::Diagnostic;

/// Diagnostics and donors collected while building one command.
#[derive(Debug, Default)]
pub struct Findings {
    /// Command the findings belong to.
    pub command: String,
    pub diagnostics: Vec<Diagnostic>,
    pub donors: DonorSet,
}

impl Findings {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    /// Moves the diagnostics and donors of `other` into `self`.
    pub fn merge(&mut self, other: Findings) {
        self.diagnostics.extend(other.diagnostics);
        self.donors.merge(other.donors);
    }
}

/// Builds one command from a stanza.
///
/// With `with_arguments` unset the command gets an empty argument list, as
/// the closing command of an environment does.
pub fn build_command(
    name: &str,
    stanza: &Arc<Element>,
    with_arguments: bool,
    instance_of: Option<InstanceOf>,
) -> (Command, Findings) {
    debug!(command = %name, with_arguments, "building command");

    let mut findings = Findings::new(name);
    let mut command = Command::new(name);

    command.level = stanza.attr("level").map(str::to_string);
    command.is_system = command.level.as_deref() == Some("system");
    command.category = stanza.attr("category").map(str::to_string);
    command.keywords = command
        .category
        .as_deref()
        .map(|category| category.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    command.source_file = stanza.attr("file").map(str::to_string);
    command.variant = stanza.attr("variant").map(str::to_string);
    command.instance_of = instance_of;
    command.stanza = Some(Arc::clone(stanza));

    if with_arguments {
        let mut ordinals = Ordinals::default();
        for tree in stanza.children_named(INTERFACE_NAMESPACE, "arguments") {
            for element in tree.elements() {
                command
                    .arguments
                    .push(build_argument(element, &mut ordinals, &mut findings));
            }
        }
    }

    (command, findings)
}
