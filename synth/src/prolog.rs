//! Topic prolog: source path, review dates, audience and product metadata.

use chrono::{Days, NaiveDate};
use interface_dita_core::Command;
use interface_dita_core::xml::Element;
use sha2::{Digest, Sha256};

use crate::config::TopicConfig;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days until the review of `name` expires.
///
/// Spread across the configured window so reviews of a freshly generated
/// corpus do not all fall due on the same day. Stable for a given name.
pub fn review_offset(name: &str, window: (u32, u32)) -> u32 {
    let (low, high) = window;
    if high <= low {
        return low;
    }
    let digest = Sha256::digest(name.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    low + (u64::from_be_bytes(bytes) % u64::from(high - low)) as u32
}

pub fn prolog(command: &Command, config: &TopicConfig, today: NaiveDate) -> Element {
    let file = command.source_file.as_deref().unwrap_or_default();
    let offset = review_offset(&command.name, config.review_window_days);
    let expiry = today
        .checked_add_days(Days::new(u64::from(offset)))
        .unwrap_or(today);

    let critdates = Element::new("critdates")
        .with_child(
            Element::new("created")
                .with_attr("date", today.format(DATE_FORMAT).to_string())
                .with_attr("expiry", expiry.format(DATE_FORMAT).to_string()),
        )
        .with_comment(r#"<revised date="YYYY-MM-DD" expiry="YYYY-MM-DD"/>"#);

    let audience = if command.is_system { "internal" } else { "user" };
    let mut keywords = Element::new("keywords");
    for keyword in &command.keywords {
        keywords.push(Element::new("keyword").with_text(keyword.as_str()));
    }

    let metadata = Element::new("metadata")
        .with_child(Element::new("audience").with_attr("type", audience))
        .with_child(Element::new("category").with_text(command.level.as_deref().unwrap_or_default()))
        .with_child(keywords)
        .with_child(
            Element::new("prodinfo")
                .with_child(Element::new("prodname").with_text(config.product_name.as_str()))
                .with_child(
                    Element::new("vrmlist").with_child(
                        Element::new("vrm")
                            .with_attr("version", config.product_version.as_str())
                            .with_attr("release", "production")
                            .with_attr("modification", ""),
                    ),
                ),
        );

    Element::new("prolog")
        .with_child(Element::new("source").with_text(config.source_path(file)))
        .with_child(critdates)
        .with_child(metadata)
}
