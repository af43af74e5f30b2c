//! DITA maps: inheritance keys, relationship table and topic indexes.

use interface_dita_core::xml::{Document, Element};
use interface_dita_core::{ClassInstance, DonorSet, Relation, shard_of};

use crate::document::MAP_DOCTYPE;
use crate::inheritance::command_key;

const INHERITANCE_COMMENT: &str = "Conrefs for commands that use settings that other commands inherit. \
     They are only ever updated in one place, and every dependent command follows.";

const RELATIONS_COMMENT: &str = "Reltable for related commands: each row has as many cells as needed \
     for all of the commands related to that particular class or environment.";

/// Relative path of a command topic inside the language directory.
pub fn command_href(name: &str) -> String {
    format!("commands/{}/r_command_{name}.dita", shard_of(name))
}

fn map(title: &str, lang: &str) -> Element {
    Element::new("map")
        .with_attr("xml:lang", lang)
        .with_child(Element::new("title").with_text(title))
}

/// One `keydef` per donor so inheriting topics can resolve `command_<donor>`.
pub fn inheritance_map(donors: &DonorSet, lang: &str) -> Document {
    let mut root = map("Command Inheritance", lang).with_comment(INHERITANCE_COMMENT);
    for donor in donors.iter() {
        root.push(
            Element::new("keydef")
                .with_attr("keys", command_key(donor))
                .with_attr("href", command_href(donor)),
        );
    }
    Document::new(root, Some(MAP_DOCTYPE))
}

/// Number of columns in the relationship table: the largest class plus
/// room for the umbrella topics.
pub fn reltable_width(relations: &[Relation]) -> usize {
    let longest = relations
        .iter()
        .filter_map(|relation| match relation {
            Relation::Class(class) => Some(class.instances.len()),
            Relation::Environment(_) => None,
        })
        .fold(1, usize::max);
    longest + 2
}

/// Relationship table with one row per class or environment.
pub fn relations_map(relations: &[Relation], lang: &str) -> Document {
    let width = reltable_width(relations);

    let mut header = Element::new("relheader");
    for _ in 0..width {
        header.push(Element::new("relcolspec").with_attr("type", "reference"));
    }
    let mut reltable = Element::new("reltable").with_child(header);

    for relation in relations {
        let mut row = Element::new("relrow");
        match relation {
            Relation::Environment(environment) => {
                let umbrella = format!("environment_{}", environment.stem);
                let members = environment.members().map(command_key);
                row.push(family_cell(std::iter::once(umbrella).chain(members)));
            }
            Relation::Class(class) => {
                for instance in &class.instances {
                    let cell = match instance {
                        ClassInstance::Command(name) => Element::new("relcell")
                            .with_child(Element::new("topicref").with_attr("keyref", command_key(name))),
                        ClassInstance::Environment(environment) => {
                            family_cell(environment.members().map(command_key))
                        }
                    };
                    row.push(cell);
                }
            }
        }
        while row.element_count() < width {
            row.push(Element::new("relcell"));
        }
        reltable.push(row);
    }

    let root = map("Command Relationships", lang)
        .with_comment(RELATIONS_COMMENT)
        .with_child(reltable);
    Document::new(root, Some(MAP_DOCTYPE))
}

fn family_cell(keys: impl IntoIterator<Item = String>) -> Element {
    let mut cell = Element::new("relcell").with_attr("collection-type", "family");
    for key in keys {
        cell.push(Element::new("topicref").with_attr("keyref", key));
    }
    cell
}

pub fn environments_map<'a>(stems: impl IntoIterator<Item = &'a str>, lang: &str) -> Document {
    index_map("Environments", stems, lang, |stem| {
        (format!("environment_{stem}"), format!("environments/c_environment_{stem}.dita"))
    })
}

pub fn classes_map<'a>(names: impl IntoIterator<Item = &'a str>, lang: &str) -> Document {
    index_map("Classes", names, lang, |name| {
        (format!("class_{name}"), format!("classes/c_class_{name}.dita"))
    })
}

/// Index of command topics, e.g. "Full Commands" or "System Commands".
pub fn commands_map<'a>(title: &str, names: impl IntoIterator<Item = &'a str>, lang: &str) -> Document {
    index_map(title, names, lang, |name| (command_key(name), command_href(name)))
}

fn index_map<'a>(
    title: &str,
    names: impl IntoIterator<Item = &'a str>,
    lang: &str,
    target: impl Fn(&str) -> (String, String),
) -> Document {
    let mut names: Vec<&str> = names.into_iter().collect();
    names.sort_unstable();
    names.dedup();

    let mut root = map(title, lang);
    for name in names {
        let (keys, href) = target(name);
        root.push(
            Element::new("topicref")
                .with_attr("keys", keys)
                .with_attr("href", href),
        );
    }
    Document::new(root, Some(MAP_DOCTYPE))
}
