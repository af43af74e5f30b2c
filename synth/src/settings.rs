//! Assignment-set detail sections.
//!
//! Every setting gets its own `tgroup` inside one table: a parameter renders
//! its accepted keys, a whole inherited setting group transcludes the donor's
//! `tgroup`s.

use std::collections::BTreeSet;

use interface_dita_core::xml::Element;
use interface_dita_core::{Argument, Entry, Inheritance, Setting};

use crate::error::Result;
use crate::inheritance::{Resolver, command_key};
use crate::options::{entry_row, inherits_note, mark_span, table, with_columns};

pub fn settings_section(argument: &Argument, resolver: &mut Resolver<'_>) -> Result<Element> {
    let name = argument.name.as_deref().unwrap_or_default();
    let mut settings_donors = BTreeSet::new();
    let mut options_donors = BTreeSet::new();

    let mut table = table();
    for setting in argument.settings() {
        let group = match setting {
            Setting::Parameter { name, keys } => {
                options_donors.extend(keys.iter().filter_map(Entry::inheritance).map(|i| i.donor.as_str()));
                Some(parameter_group(name, keys, resolver)?)
            }
            Setting::Inherit(inheritance) => {
                settings_donors.insert(inheritance.donor.as_str());
                inherited_group(inheritance, resolver)?
            }
        };
        if let Some(group) = group {
            table.push(group);
        }
    }
    mark_span(&mut table, name);

    let mut section = Element::new("section")
        .with_attr("id", name)
        .with_child(Element::new("title").with_text("Settings"))
        .with_child(table);
    for donor in settings_donors {
        section.push(inherits_note("Inherits settings from ", donor));
    }
    for donor in options_donors {
        section.push(inherits_note("Inherits options from ", donor));
    }
    Ok(section)
}

fn parameter_group(name: &str, keys: &[Entry], resolver: &mut Resolver<'_>) -> Result<Element> {
    let mut title = Element::new("entry")
        .with_attr("namest", "value_name")
        .with_attr("nameend", "value_desc")
        .with_text(name);
    if let Some(inheritance) = keys.iter().find_map(Entry::inheritance) {
        title.push(
            Element::new("ph").with_text(" (Inherits from ").with_child(
                Element::new("xref")
                    .with_attr("keyref", command_key(&inheritance.donor))
                    .with_tail(")"),
            ),
        );
    }

    let mut body = Element::new("tbody");
    for key in keys {
        if let Some(row) = entry_row(key, resolver)? {
            body.push(row);
        }
    }

    Ok(with_columns(Element::new("tgroup").with_attr("cols", "2"))
        .with_child(
            Element::new("thead")
                .with_child(Element::new("row").with_child(title))
                .with_child(
                    Element::new("row")
                        .with_child(Element::new("entry").with_text("Value"))
                        .with_child(Element::new("entry").with_text("Description")),
                ),
        )
        .with_child(body))
}

fn inherited_group(inheritance: &Inheritance, resolver: &mut Resolver<'_>) -> Result<Option<Element>> {
    let Some(reference) = resolver.resolve(inheritance)? else {
        return Ok(None);
    };
    let mut group = Element::new("tgroup");
    reference.apply(&mut group);
    group.set_attr("cols", "2");
    Ok(Some(
        group
            .with_child(Element::new("colspec"))
            .with_child(Element::new("colspec"))
            .with_child(Element::new("thead").with_child(Element::new("row").with_child(Element::new("entry"))))
            .with_child(Element::new("tbody").with_child(Element::new("row").with_child(Element::new("entry")))),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use interface_dita_core::{ArgumentBody, ArgumentKind, Command, CommandTable, Delimiters, EntryGroup};

    fn assignments(settings: Vec<Setting>) -> Argument {
        Argument::new(ArgumentKind::Settings, Delimiters::Brackets)
            .named("settings1")
            .with_body(ArgumentBody::Settings(settings))
    }

    fn donor_table() -> CommandTable {
        let mut align = Command::new("setupalign");
        align.arguments.push(
            Argument::new(ArgumentKind::Options, Delimiters::Brackets)
                .named("options1")
                .with_body(ArgumentBody::Options(vec![Entry::Keyword {
                    text: "flushleft".into(),
                    default: false,
                }])),
        );
        let mut framed = Command::new("setupframed");
        framed.arguments.push(assignments(vec![
            Setting::Parameter { name: "width".into(), keys: Vec::new() },
            Setting::Parameter { name: "height".into(), keys: Vec::new() },
        ]));

        let mut table = CommandTable::new();
        table.insert(align, |_| false);
        table.insert(framed, |_| false);
        table
    }

    fn groups(section: &Element) -> Vec<&Element> {
        section
            .find(&|e| e.name == "table")
            .map(|t| t.elements().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_parameter_groups_with_inherited_key() {
        let table = donor_table();
        let mut resolver = Resolver::new(&table, "setupframed");
        let argument = assignments(vec![
            Setting::Parameter {
                name: "width".into(),
                keys: vec![Entry::Keyword { text: "fit".into(), default: true }],
            },
            Setting::Parameter {
                name: "align".into(),
                keys: vec![Entry::Inherit(Inheritance::new("setupalign", EntryGroup::Options))],
            },
        ]);

        let section = settings_section(&argument, &mut resolver).unwrap();
        let groups = groups(&section);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].attr("id"), Some("settings1_start"));
        assert_eq!(groups[1].attr("id"), Some("settings1_stop"));

        let heading = groups[1]
            .find(&|e| e.attr("namest") == Some("value_name"))
            .unwrap();
        assert_eq!(heading.text_content(), "align (Inherits from )");

        let row = groups[1].find(&|e| e.name == "tbody").unwrap().elements().next().unwrap();
        assert_eq!(row.attr("conkeyref"), Some("command_setupalign/options1_entry"));

        let notes: Vec<_> = section.elements().filter(|e| e.name == "note").map(Element::text_content).collect();
        assert_eq!(notes, vec!["Inherits options from ."]);
    }

    #[test]
    fn test_whole_setting_inheritance() {
        let table = donor_table();
        let mut resolver = Resolver::new(&table, "setupfoo");
        let argument = assignments(vec![Setting::Inherit(Inheritance::new("setupframed", EntryGroup::Settings))]);

        let section = settings_section(&argument, &mut resolver).unwrap();
        let group = groups(&section)[0];
        assert_eq!(group.attr("conkeyref"), Some("command_setupframed/settings1_start"));
        assert_eq!(group.attr("conrefend"), Some("default.dita#default/settings1_stop"));
        assert_eq!(group.attr("cols"), Some("2"));
        assert_eq!(group.attr("id"), Some("settings1_entry"));
        assert_eq!(group.element_count(), 4);

        let note = section.elements().find(|e| e.name == "note").unwrap();
        assert_eq!(note.text.as_deref(), Some("Inherits settings from "));
    }
}
