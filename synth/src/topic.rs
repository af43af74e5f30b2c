//! DITA reference topics for single commands.

use chrono::NaiveDate;
use interface_dita_core::xml::{Document, Element};
use interface_dita_core::{ArgumentKind, Command, CommandTable, DonorSet};
use tracing::debug;

use crate::config::TopicConfig;
use crate::document::REFERENCE_DOCTYPE;
use crate::error::Result;
use crate::inheritance::{Resolver, SynthWarning};
use crate::options::options_section;
use crate::prolog::prolog;
use crate::settings::settings_section;
use crate::syntax::syntax_section;

const NOTES_PLACEHOLDER: &str = r#"<section id="notes">
      <title>Notes</title>
      <p></p>
    </section>"#;

const SECOND_EXAMPLE_PLACEHOLDER: &str = r#"<example id="example_02" rev="0" otherprops="no_output">
      <title>Descriptive Example Title</title>
      <codeblock outputclass="normalize-space">
\starttext



\stoptext
      </codeblock>
    </example>"#;

const EMPTY_EXAMPLE: &str = "\n\\starttext\n\n\n\n\\stoptext\n";

/// Everything a topic needs besides the command and the table.
#[derive(Debug, Clone)]
pub struct TopicContext {
    pub config: TopicConfig,
    pub lang: String,
    /// Date written as `created` in every prolog.
    pub today: NaiveDate,
}

impl TopicContext {
    pub fn new(config: TopicConfig, lang: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            config,
            lang: lang.into(),
            today,
        }
    }
}

/// A rendered command topic and what rendering it found.
#[derive(Debug)]
pub struct RenderedTopic {
    pub document: Document,
    /// Donors this topic transcludes from.
    pub donors: DonorSet,
    pub warnings: Vec<SynthWarning>,
}

/// Renders the reference topic of one command.
///
/// Reads the table only to resolve inheritance; the same table can be
/// shared by any number of concurrent renders.
pub fn render_command(
    command: &Command,
    table: &CommandTable,
    context: &TopicContext,
) -> Result<RenderedTopic> {
    let mut resolver = Resolver::new(table, &command.name);
    let body = refbody(command, &mut resolver)?;
    let (donors, warnings) = resolver.finish();

    let root = Element::new("reference")
        .with_attr("id", format!("r_command_{}", command.name))
        .with_attr("xml:lang", context.lang.as_str())
        .with_child(Element::new("title").with_text(format!("\\{}", command.name)))
        .with_child(
            Element::new("shortdesc")
                .with_attr("rev", "0")
                .with_text("The ")
                .with_child(
                    Element::new("cmdname")
                        .with_text(format!("\\{}", command.name))
                        .with_tail(" command..."),
                ),
        )
        .with_child(prolog(command, &context.config, context.today))
        .with_child(body)
        .with_child(related_links(command, &context.config));

    debug!(command = %command.name, donors = donors.len(), "Rendered command topic");
    Ok(RenderedTopic {
        document: Document::new(root, Some(REFERENCE_DOCTYPE)),
        donors,
        warnings,
    })
}

fn refbody(command: &Command, resolver: &mut Resolver<'_>) -> Result<Element> {
    let mut refbody = Element::new("refbody").with_child(syntax_section(command, resolver)?);

    for argument in &command.arguments {
        match argument.kind {
            ArgumentKind::Options => refbody.push(options_section(argument, resolver)?),
            ArgumentKind::Settings => refbody.push(settings_section(argument, resolver)?),
            _ => {}
        }
    }

    refbody.push_comment(NOTES_PLACEHOLDER);
    refbody.push(
        Element::new("example")
            .with_attr("id", "mwe")
            .with_attr("rev", "0")
            .with_attr("otherprops", "no_output")
            .with_child(Element::new("title").with_text("Minimal Working Example"))
            .with_child(
                Element::new("codeblock")
                    .with_attr("outputclass", "normalize-space")
                    .with_text(EMPTY_EXAMPLE),
            ),
    );
    refbody.push_comment(SECOND_EXAMPLE_PLACEHOLDER);
    Ok(refbody)
}

fn related_links(command: &Command, config: &TopicConfig) -> Element {
    let file = command.source_file.as_deref().unwrap_or_default();
    Element::new("related-links").with_child(
        Element::new("link")
            .with_attr("href", config.source_url(file))
            .with_attr("scope", "external")
            .with_attr("format", "html")
            .with_child(
                Element::new("linktext")
                    .with_text("Command definition in the ")
                    .with_child(
                        Element::new("ph")
                            .with_attr("conkeyref", "definitions/product_name")
                            .with_tail(" source file "),
                    )
                    .with_child(Element::new("filepath").with_text(file)),
            ),
    )
}
