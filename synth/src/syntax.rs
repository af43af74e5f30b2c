//! Syntax line and argument summary table.

use interface_dita_core::xml::Element;
use interface_dita_core::{Argument, ArgumentKind, Command, Entry};

use crate::error::Result;
use crate::inheritance::{Resolver, command_key};

const ENTRY_SEPARATOR: &str = ", ";

/// Builds the `refsyn` section: the call signature followed, when the
/// command takes arguments, by the summary table.
pub fn syntax_section(command: &Command, resolver: &mut Resolver<'_>) -> Result<Element> {
    let mut refsyn = Element::new("refsyn")
        .with_attr("id", "syntax")
        .with_child(Element::new("title").with_text("Syntax"))
        .with_child(syntax_line(command));

    if !command.arguments.is_empty() {
        refsyn.push(summary_table(command, resolver)?);
    }
    Ok(refsyn)
}

/// `\name [OPTIONS] {SCOPE} ...` as a `synph`.
pub fn syntax_line(command: &Command) -> Element {
    let mut synph = Element::new("synph").with_text(format!("\\{} ", command.name));

    for argument in &command.arguments {
        let pair = argument.delimiters.pair();
        if let Some((left, _)) = pair {
            synph.push(Element::new("delim").with_text(left));
        }
        synph.push(syntax_var(argument));
        if let Some((_, right)) = pair {
            synph.push(Element::new("delim").with_text(right));
        }
    }
    synph
}

fn syntax_var(argument: &Argument) -> Element {
    let mut var = Element::new("var");
    if argument.optional {
        var.set_attr("importance", "optional");
    }
    match (&argument.kind, argument.name.as_deref()) {
        (ArgumentKind::Delimiter, Some(name)) => var.with_text(format!("\\{name}")),
        (ArgumentKind::Options | ArgumentKind::Settings, Some(name)) => var
            .with_attr("id", format!("synvar_{name}"))
            .with_text(argument.kind.token()),
        (kind, _) => var.with_text(kind.token()),
    }
}

fn summary_table(command: &Command, resolver: &mut Resolver<'_>) -> Result<Element> {
    let mut table = Element::new("simpletable").with_child(
        Element::new("sthead")
            .with_child(Element::new("stentry").with_text("Name"))
            .with_child(Element::new("stentry").with_text("Description"))
            .with_child(Element::new("stentry").with_text("Values")),
    );
    for argument in &command.arguments {
        table.push(summary_row(argument, resolver)?);
    }
    Ok(table)
}

fn summary_row(argument: &Argument, resolver: &mut Resolver<'_>) -> Result<Element> {
    let token = argument.kind.token();
    let name = argument.name.as_deref().unwrap_or_default();

    if argument.kind == ArgumentKind::Options {
        if let Some(inheritance) = argument.options().iter().find_map(Entry::inheritance) {
            resolver.touch(inheritance)?;
            return Ok(Element::new("strow")
                .with_attr("conkeyref", format!("{}/short_options1", command_key(&inheritance.donor)))
                .with_attr("id", format!("short_{name}"))
                .with_child(Element::new("stentry"))
                .with_child(Element::new("stentry"))
                .with_child(Element::new("stentry")));
        }
    }

    let mut row = Element::new("strow")
        .with_child(
            Element::new("stentry").with_child(
                Element::new("xref")
                    .with_attr("keyref", token)
                    .with_attr("type", "reference"),
            ),
        )
        .with_child(
            Element::new("stentry")
                .with_child(Element::new("ph").with_attr("conkeyref", format!("{token}/argument_desc"))),
        );

    let value = match &argument.kind {
        ArgumentKind::Options => {
            row.set_attr("id", format!("short_{name}"));
            options_preview(argument.options(), name)
        }
        ArgumentKind::Settings => Element::new("stentry").with_child(
            Element::new("xref")
                .with_attr("href", format!("#./{name}"))
                .with_text(" (See settings table for details.)"),
        ),
        ArgumentKind::Delimiter => Element::new("stentry").with_text(format!("\\{name}")),
        _ => Element::new("stentry")
            .with_child(Element::new("ph").with_attr("conkeyref", format!("{token}/argument_value"))),
    };
    row.push(value);
    Ok(row)
}

/// Comma-separated preview of an option-set, linking to its detail table.
///
/// The separator goes after every entry at the current insertion point and
/// the last one is trimmed, so `K` entries carry `K - 1` separators.
pub fn options_preview(entries: &[Entry], name: &str) -> Element {
    let mut cell = Element::new("stentry");

    for entry in entries {
        match entry {
            Entry::Keyword { text, default: true } => {
                cell.push(
                    Element::new("ph")
                        .with_attr("importance", "default")
                        .with_text(text.as_str()),
                );
            }
            Entry::Keyword { text, default: false } => cell.append_text(text),
            Entry::Placeholder { name, default } => {
                let xref = Element::new("xref")
                    .with_attr("keyref", name.as_str())
                    .with_attr("type", "reference");
                if *default {
                    cell.push(
                        Element::new("ph")
                            .with_attr("importance", "default")
                            .with_child(xref),
                    );
                } else {
                    cell.push(xref);
                }
            }
            Entry::Inherit(_) => continue,
        }
        cell.append_text(ENTRY_SEPARATOR);
    }
    cell.trim_trailing(ENTRY_SEPARATOR);

    cell.push(
        Element::new("xref")
            .with_attr("href", format!("#./{name}"))
            .with_text(" (See options table for details.)"),
    );
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use interface_dita_core::{ArgumentBody, CommandTable, Delimiters, EntryGroup, Inheritance};

    fn keyword(text: &str, default: bool) -> Entry {
        Entry::Keyword {
            text: text.to_string(),
            default,
        }
    }

    #[test]
    fn test_syntax_line_delimiters_and_vars() {
        let mut command = Command::new("setupfoo");
        command.arguments = vec![
            Argument::new(ArgumentKind::Options, Delimiters::Brackets)
                .optional()
                .named("options1"),
            Argument::new(ArgumentKind::Delimiter, Delimiters::Bare).named("to"),
            Argument::new(ArgumentKind::Scope, Delimiters::Braces),
            Argument::new(ArgumentKind::Unresolved, Delimiters::Other("angled".into())),
        ];

        let synph = syntax_line(&command);
        assert_eq!(synph.text.as_deref(), Some("\\setupfoo "));
        assert_eq!(synph.text_content(), "\\setupfoo [OPTIONS]\\to{SCOPE}?UNKNOWN?");

        let vars: Vec<_> = synph.elements().filter(|e| e.name == "var").collect();
        assert_eq!(vars[0].attr("importance"), Some("optional"));
        assert_eq!(vars[0].attr("id"), Some("synvar_options1"));
        assert_eq!(vars[1].attr("importance"), None);
    }

    #[test]
    fn test_preview_separators() {
        let entries = vec![
            keyword("left", false),
            keyword("middle", true),
            Entry::Placeholder {
                name: "DIMENSION".to_string(),
                default: false,
            },
            keyword("right", false),
        ];
        let cell = options_preview(&entries, "options1");

        assert_eq!(
            cell.text_content(),
            "left, middle, , right (See options table for details.)"
        );
        assert_eq!(cell.elements().nth(1).and_then(|e| e.attr("keyref")), Some("DIMENSION"));
        assert_eq!(cell.text_content().matches(ENTRY_SEPARATOR).count(), entries.len() - 1);
    }

    #[test]
    fn test_preview_single_entry_has_no_separator() {
        let cell = options_preview(&[keyword("yes", false)], "options2");
        assert_eq!(cell.text.as_deref(), Some("yes"));
        assert_eq!(cell.element_count(), 1);
    }

    #[test]
    fn test_inherited_options_row_transcludes_donor() {
        let mut table = CommandTable::new();
        table.insert(Command::new("location"), |_| false);
        let argument = Argument::new(ArgumentKind::Options, Delimiters::Brackets)
            .named("options1")
            .with_body(ArgumentBody::Options(vec![Entry::Inherit(Inheritance::new(
                "location",
                EntryGroup::Options,
            ))]));

        let mut resolver = Resolver::new(&table, "placefigure");
        let row = summary_row(&argument, &mut resolver).unwrap();

        assert_eq!(row.attr("conkeyref"), Some("command_location/short_options1"));
        assert_eq!(row.attr("id"), Some("short_options1"));
        assert_eq!(row.element_count(), 3);
        assert!(resolver.finish().0.contains("location"));
    }

    #[test]
    fn test_no_table_without_arguments() {
        let table = CommandTable::new();
        let command = Command::new("thinspace");
        let mut resolver = Resolver::new(&table, "thinspace");
        let refsyn = syntax_section(&command, &mut resolver).unwrap();
        assert!(refsyn.find(&|e| e.name == "simpletable").is_none());
    }
}
