//! Argument classification.

use interface_dita_core::xml::Element;
use interface_dita_core::{
    Argument, ArgumentBody, ArgumentKind, Delimiters, INTERFACE_NAMESPACE, placeholder_name,
};
use tracing::warn;

use crate::command::Findings;
use crate::entries::{build_options, build_settings};
use crate::report::Diagnostic;

/// Tag of one argument element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentTag {
    Keywords,
    Assignments,
    Csname,
    Content,
    Delimiter,
    Dimension,
    Triplet,
    Position,
    Literal,
    Angles,
    Template,
    Apply,
    Text,
    Index,
    Unknown(String),
}

impl ArgumentTag {
    pub fn of(element: &Element) -> Self {
        if element.namespace.as_deref() != Some(INTERFACE_NAMESPACE) {
            return Self::Unknown(element.name.clone());
        }
        match element.name.as_str() {
            "keywords" => Self::Keywords,
            "assignments" => Self::Assignments,
            "csname" => Self::Csname,
            "content" => Self::Content,
            "delimiter" => Self::Delimiter,
            "dimension" => Self::Dimension,
            "triplet" => Self::Triplet,
            "position" => Self::Position,
            "string" => Self::Literal,
            "angles" => Self::Angles,
            "template" => Self::Template,
            "apply" => Self::Apply,
            "text" => Self::Text,
            "index" => Self::Index,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Per-command counters for synthetic argument names.
#[derive(Debug, Default)]
pub struct Ordinals {
    options: usize,
    settings: usize,
}

impl Ordinals {
    fn next_options(&mut self) -> String {
        self.options += 1;
        format!("options{}", self.options)
    }

    fn next_settings(&mut self) -> String {
        self.settings += 1;
        format!("settings{}", self.settings)
    }
}

/// Builds one argument from its element.
///
/// Option-sets and assignment-sets are named from `ordinals` and get their
/// entries walked immediately.
pub fn build_argument(element: &Element, ordinals: &mut Ordinals, findings: &mut Findings) -> Argument {
    let tag = ArgumentTag::of(element);
    let declared = Delimiters::from_attr(element.attr("delimiters"));

    let mut argument = match tag {
        ArgumentTag::Keywords => match single_placeholder(element) {
            Some(token) => Argument::new(ArgumentKind::Placeholder(token), declared),
            None => Argument::new(ArgumentKind::Options, declared)
                .named(ordinals.next_options())
                .with_body(ArgumentBody::Options(build_options(element, findings))),
        },
        ArgumentTag::Assignments => Argument::new(ArgumentKind::Settings, declared)
            .named(ordinals.next_settings())
            .with_body(ArgumentBody::Settings(build_settings(element, findings))),
        ArgumentTag::Content => Argument::new(ArgumentKind::Scope, Delimiters::Braces),
        ArgumentTag::Delimiter => {
            let argument = Argument::new(ArgumentKind::Delimiter, Delimiters::Bare);
            match element.attr("name") {
                Some(name) => argument.named(name),
                None => argument,
            }
        }
        ArgumentTag::Csname => Argument::new(ArgumentKind::Command, declared),
        ArgumentTag::Dimension => Argument::new(ArgumentKind::Dimension, declared),
        ArgumentTag::Triplet => Argument::new(ArgumentKind::Triplet, declared),
        ArgumentTag::Position => Argument::new(ArgumentKind::Position, declared),
        ArgumentTag::Literal => Argument::new(ArgumentKind::LiteralString, declared),
        ArgumentTag::Angles => Argument::new(ArgumentKind::Angles, declared),
        ArgumentTag::Template => Argument::new(ArgumentKind::Template, declared),
        ArgumentTag::Apply => Argument::new(ArgumentKind::Apply, declared),
        ArgumentTag::Text => Argument::new(ArgumentKind::Text, declared),
        ArgumentTag::Index => Argument::new(ArgumentKind::Index, declared),
        ArgumentTag::Unknown(name) => {
            warn!(command = %findings.command, tag = %name, "unknown argument type");
            findings.diagnostics.push(Diagnostic::UnknownArgument {
                command: findings.command.clone(),
                tag: name,
            });
            Argument::new(ArgumentKind::Unresolved, declared)
        }
    };

    argument.optional = element.attr("optional") == Some("yes");
    argument
}

/// Token of a keyword set whose only child is a `cd:`-typed constant.
fn single_placeholder(keywords: &Element) -> Option<String> {
    let mut children = keywords.elements();
    match (children.next(), children.next()) {
        (Some(only), None) => only.attr("type").and_then(placeholder_name),
        _ => None,
    }
}
