//! Class and environment expansion.
//!
//! Classes and environments are declared once but document several
//! commands. Expansion derives the concrete names, builds one command per
//! name from the shared stanza and records the membership relation.

use std::sync::Arc;

use interface_dita_core::xml::Element;
use interface_dita_core::{
    Class, ClassInstance, Command, Environment, INTERFACE_NAMESPACE, InstanceOf, MemberRole,
    Relation, Shape, ascii_only,
};
use tracing::debug;

use crate::classify::Classification;
use crate::command::{Findings, build_command};

/// Commands and relation derived from one stanza.
#[derive(Debug, Default)]
pub struct Expansion {
    pub commands: Vec<Command>,
    pub relation: Option<Relation>,
    pub findings: Findings,
}

impl Expansion {
    /// Expansion of a plain command stanza.
    pub fn single(name: &str, stanza: &Arc<Element>) -> Self {
        let (command, findings) = build_command(name, stanza, true, None);
        Self {
            commands: vec![command],
            relation: None,
            findings,
        }
    }

    fn push(&mut self, (command, findings): (Command, Findings)) {
        self.commands.push(command);
        self.findings.merge(findings);
    }
}

/// Begin and end markers of an environment stanza.
struct Markers {
    begin: String,
    end: String,
}

impl Markers {
    fn of(stanza: &Element) -> Self {
        Self {
            begin: stanza.attr("begin").unwrap_or("start").to_string(),
            end: stanza
                .attr("end")
                .map(ascii_only)
                .unwrap_or_else(|| "stop".to_string()),
        }
    }

    /// Builds the begin command (full signature) and end command (none).
    fn pair(
        &self,
        instance: &str,
        shape: Shape,
        stem: &str,
        stanza: &Arc<Element>,
        expansion: &mut Expansion,
    ) -> Environment {
        let environment = Environment {
            stem: instance.to_string(),
            begin: format!("{}{instance}", self.begin),
            end: format!("{}{instance}", self.end),
        };
        let member = |role| {
            Some(InstanceOf {
                shape,
                stem: stem.to_string(),
                role,
            })
        };
        expansion.push(build_command(
            &environment.begin,
            stanza,
            true,
            member(MemberRole::Begin),
        ));
        expansion.push(build_command(
            &environment.end,
            stanza,
            false,
            member(MemberRole::End),
        ));
        environment
    }
}

/// Expands a plain environment into its begin/end pair.
pub fn expand_environment(classification: &Classification, stanza: &Arc<Element>) -> Expansion {
    let mut expansion = Expansion::default();
    let environment = Markers::of(stanza).pair(
        &classification.name,
        Shape::Environment,
        &classification.name,
        stanza,
        &mut expansion,
    );
    debug!(
        environment = %classification.name,
        begin = %environment.begin,
        end = %environment.end,
        "expanded environment"
    );
    expansion.findings.command = classification.name.clone();
    expansion.relation = Some(Relation::Environment(environment));
    expansion
}

/// Naming template of a class: `prefix + instance + suffix`.
#[derive(Debug, Default, PartialEq, Eq)]
struct Sequence {
    prefix: String,
    suffix: String,
}

impl Sequence {
    fn of(stanza: &Element) -> Self {
        let mut sequence = Self::default();
        let mut stem_seen = false;
        for element in stanza
            .children_named(INTERFACE_NAMESPACE, "sequence")
            .flat_map(Element::elements)
        {
            if !element.is(INTERFACE_NAMESPACE, "string") {
                stem_seen |= element.is(INTERFACE_NAMESPACE, "instance");
                continue;
            }
            let value = element.attr("value").unwrap_or_default().to_string();
            if stem_seen {
                sequence.suffix = value;
            } else {
                sequence.prefix = value;
            }
        }
        sequence
    }

    fn apply(&self, instance: &str) -> String {
        format!("{}{instance}{}", self.prefix, self.suffix)
    }
}

/// Expands a class into one command, or one begin/end pair, per instance.
pub fn expand_class(classification: &Classification, stanza: &Arc<Element>) -> Expansion {
    let sequence = Sequence::of(stanza);
    let environment_typed = stanza.attr("type") == Some("environment");
    let markers = Markers::of(stanza);
    let stem = classification.name.as_str();

    let mut expansion = Expansion::default();
    let mut instances = Vec::new();

    let values = stanza
        .children_named(INTERFACE_NAMESPACE, "instances")
        .flat_map(|list| list.children_named(INTERFACE_NAMESPACE, "constant"))
        .filter_map(|constant| constant.attr("value"));

    for value in values {
        let instance = sequence.apply(value);
        if environment_typed {
            let environment = markers.pair(&instance, Shape::Class, stem, stanza, &mut expansion);
            instances.push(ClassInstance::Environment(environment));
        } else {
            let member = InstanceOf {
                shape: Shape::Class,
                stem: stem.to_string(),
                role: MemberRole::Instance,
            };
            expansion.push(build_command(&instance, stanza, true, Some(member)));
            instances.push(ClassInstance::Command(instance));
        }
    }

    debug!(
        class = %stem,
        instances = instances.len(),
        environment = environment_typed,
        "expanded class"
    );

    expansion.findings.command = stem.to_string();
    expansion.relation = Some(Relation::Class(Class {
        name: stem.to_string(),
        environment: environment_typed,
        instances,
    }));
    expansion
}

#[cfg(test)]
mod tests {
    use interface_dita_core::ArgumentKind;

    use super::*;
    use crate::classify::classify_stanza;

    fn expand(xml: &str) -> Expansion {
        let stanza = Arc::new(Element::parse(xml).unwrap());
        let classification = classify_stanza(&stanza, &[]).unwrap();
        match classification.shape {
            Shape::Class => expand_class(&classification, &stanza),
            Shape::Environment => expand_environment(&classification, &stanza),
            other => panic!("unexpected shape {other}"),
        }
    }

    fn names(expansion: &Expansion) -> Vec<&str> {
        expansion.commands.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_environment_defaults_to_start_stop() {
        let expansion = expand(
            r#"<cd:command xmlns:cd="http://www.pragma-ade.com/commands" name="section" type="environment">
                 <cd:arguments><cd:keywords><cd:constant type="a"/></cd:keywords></cd:arguments>
               </cd:command>"#,
        );
        assert_eq!(names(&expansion), vec!["startsection", "stopsection"]);
        assert_eq!(expansion.commands[0].arguments.len(), 1);
        assert!(expansion.commands[1].arguments.is_empty());
        assert_eq!(
            expansion.commands[1].instance_of.as_ref().map(|i| i.role),
            Some(MemberRole::End)
        );
        assert_eq!(
            expansion.relation.unwrap().members(),
            vec!["startsection", "stopsection"]
        );
    }

    #[test]
    fn test_environment_end_marker_is_ascii_cleaned() {
        let expansion = expand(
            r#"<cd:command xmlns:cd="http://www.pragma-ade.com/commands" name="texcode" type="environment"
                 begin="begin" end="end&#160;"/>"#,
        );
        assert_eq!(names(&expansion), vec!["begintexcode", "endtexcode"]);
    }

    #[test]
    fn test_class_applies_prefix_and_suffix() {
        let expansion = expand(
            r#"<cd:command xmlns:cd="http://www.pragma-ade.com/commands" name="framedfloat" variant="instance">
                 <cd:sequence><cd:string value="place"/><cd:instance value="float"/><cd:string value="s"/></cd:sequence>
                 <cd:arguments><cd:content/></cd:arguments>
                 <cd:instances><cd:constant value="figure"/><cd:constant value="table"/></cd:instances>
               </cd:command>"#,
        );
        assert_eq!(names(&expansion), vec!["placefigures", "placetables"]);
        assert!(
            expansion
                .commands
                .iter()
                .all(|c| c.arguments[0].kind == ArgumentKind::Scope)
        );
        let Some(Relation::Class(class)) = expansion.relation else {
            panic!("expected class relation");
        };
        assert!(!class.environment);
        assert_eq!(class.member_names(), vec!["placefigures", "placetables"]);
    }

    #[test]
    fn test_environment_class_pairs_per_instance() {
        let expansion = expand(
            r#"<cd:command xmlns:cd="http://www.pragma-ade.com/commands" name="framedtext"
                   type="environment" variant="instance">
                 <cd:sequence><cd:instance value="framedtext"/></cd:sequence>
                 <cd:arguments><cd:keywords><cd:constant type="a"/></cd:keywords></cd:arguments>
                 <cd:instances><cd:constant value="framedtext"/><cd:constant value="boxedtext"/></cd:instances>
               </cd:command>"#,
        );
        assert_eq!(
            names(&expansion),
            vec!["startframedtext", "stopframedtext", "startboxedtext", "stopboxedtext"]
        );
        assert!(expansion.commands[3].arguments.is_empty());
        let Some(Relation::Class(class)) = expansion.relation else {
            panic!("expected class relation");
        };
        assert!(class.environment);
        assert_eq!(class.instances.len(), 2);
    }

    #[test]
    fn test_sequence_without_strings() {
        let stanza = Element::parse(
            r#"<cd:command xmlns:cd="http://www.pragma-ade.com/commands" name="x">
                 <cd:sequence><cd:instance value="x"/></cd:sequence></cd:command>"#,
        )
        .unwrap();
        assert_eq!(Sequence::of(&stanza), Sequence::default());
    }
}
