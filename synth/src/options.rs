//! Option-set detail sections.

use std::collections::BTreeSet;

use interface_dita_core::xml::Element;
use interface_dita_core::{Argument, Entry};

use crate::error::Result;
use crate::inheritance::{Resolver, command_key};

/// `section` with the keyword table of one option-set argument.
pub fn options_section(argument: &Argument, resolver: &mut Resolver<'_>) -> Result<Element> {
    let name = argument.name.as_deref().unwrap_or_default();
    let mut donors = BTreeSet::new();

    let mut body = Element::new("tbody");
    for entry in argument.options() {
        if let Some(inheritance) = entry.inheritance() {
            donors.insert(inheritance.donor.as_str());
        }
        if let Some(row) = entry_row(entry, resolver)? {
            body.push(row);
        }
    }
    mark_span(&mut body, name);

    let group = with_columns(Element::new("tgroup").with_attr("cols", "2"))
        .with_child(
            Element::new("thead").with_child(
                Element::new("row")
                    .with_child(Element::new("entry").with_text("Keyword"))
                    .with_child(Element::new("entry").with_text("Description")),
            ),
        )
        .with_child(body);

    let mut section = Element::new("section")
        .with_attr("id", name)
        .with_child(Element::new("title").with_text("Options"))
        .with_child(
            table()
                .with_attr("id", format!("{name}_table"))
                .with_child(group),
        );
    for donor in donors {
        section.push(inherits_note("Inherits options from ", donor));
    }
    Ok(section)
}

/// One table row for an option entry or a parameter key.
///
/// Inherited entries become a transclusion row; `None` means the donor had
/// nothing to transclude.
pub(crate) fn entry_row(entry: &Entry, resolver: &mut Resolver<'_>) -> Result<Option<Element>> {
    let mut row = match entry {
        Entry::Inherit(inheritance) => match resolver.resolve(inheritance)? {
            Some(reference) => {
                let mut row = Element::new("row").with_child(Element::new("entry"));
                reference.apply(&mut row);
                row
            }
            None => return Ok(None),
        },
        Entry::Placeholder { name, .. } => Element::new("row")
            .with_child(
                Element::new("entry").with_child(
                    Element::new("xref")
                        .with_attr("keyref", name.as_str())
                        .with_attr("type", "reference"),
                ),
            )
            .with_child(
                Element::new("entry")
                    .with_child(Element::new("ph").with_attr("conkeyref", format!("{name}/argument_desc"))),
            ),
        Entry::Keyword { text, .. } => Element::new("row")
            .with_child(Element::new("entry").with_text(text.as_str()))
            .with_child(Element::new("entry").with_attr("rev", "0")),
    };
    if entry.is_default() {
        row.set_attr("importance", "default");
    }
    Ok(Some(row))
}

/// Gives the first and last child element `<name>_start` / `<name>_stop`
/// ids, or a lone child `<name>_entry`, so donors can be transcluded.
pub(crate) fn mark_span(parent: &mut Element, name: &str) {
    let mut children: Vec<&mut Element> = parent.elements_mut().collect();
    match children.as_mut_slice() {
        [] => {}
        [only] => only.set_attr("id", format!("{name}_entry")),
        [first, .., last] => {
            first.set_attr("id", format!("{name}_start"));
            last.set_attr("id", format!("{name}_stop"));
        }
    }
}

pub(crate) fn table() -> Element {
    Element::new("table")
        .with_attr("frame", "all")
        .with_attr("rowsep", "1")
        .with_attr("colsep", "1")
}

pub(crate) fn with_columns(group: Element) -> Element {
    group
        .with_child(
            Element::new("colspec")
                .with_attr("colname", "value_name")
                .with_attr("colnum", "1")
                .with_attr("colwidth", "1*"),
        )
        .with_child(
            Element::new("colspec")
                .with_attr("colname", "value_desc")
                .with_attr("colnum", "2")
                .with_attr("colwidth", "1*"),
        )
}

pub(crate) fn inherits_note(lead: &str, donor: &str) -> Element {
    Element::new("note").with_text(lead).with_child(
        Element::new("xref")
            .with_attr("keyref", command_key(donor))
            .with_tail("."),
    )
}
