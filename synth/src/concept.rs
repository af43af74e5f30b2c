//! Concept topics for classes and environments.

use interface_dita_core::xml::{Document, Element};

use crate::document::CONCEPT_DOCTYPE;

pub fn class_topic(name: &str, lang: &str) -> Document {
    concept(format!("c_class_{name}"), name, "Class", "class", lang)
}

pub fn environment_topic(stem: &str, lang: &str) -> Document {
    concept(format!("c_environment_{stem}"), stem, "Environment", "environment", lang)
}

fn concept(id: String, name: &str, title: &str, noun: &str, lang: &str) -> Document {
    let root = Element::new("concept")
        .with_attr("id", id)
        .with_attr("xml:lang", lang)
        .with_child(
            Element::new("title")
                .with_text("The ")
                .with_child(Element::new("keyword").with_text(name).with_tail(format!(" {title}"))),
        )
        .with_child(
            Element::new("shortdesc")
                .with_attr("rev", "0")
                .with_text("The ")
                .with_child(Element::new("keyword").with_text(name).with_tail(format!(" {noun}..."))),
        )
        .with_child(
            Element::new("conbody").with_child(Element::new("section").with_child(Element::new("p"))),
        );
    Document::new(root, Some(CONCEPT_DOCTYPE))
}
