//! Stanza classification.
//!
//! One stanza can carry several shape markers at once (`type="environment"`
//! together with `variant="instance"`, for instance). The decision order in
//! [`classify_stanza`] resolves every such overlap: class, then environment,
//! then plain command, then unsupported variant.

use interface_dita_core::xml::Element;
use interface_dita_core::{INTERFACE_NAMESPACE, Shape, ascii_only};

use crate::error::StanzaError;

/// Result of classifying one stanza.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// ASCII-cleaned stanza name.
    pub name: String,
    pub shape: Shape,
    /// Raw `variant` marker, even when bypassed.
    pub variant: Option<String>,
    /// Raw `begin` marker.
    pub begin: Option<String>,
}

/// Classifies one top-level stanza.
///
/// Names listed in `variant_bypass` are classified as if they had no
/// variant marker.
///
/// # Errors
///
/// [`StanzaError::MissingName`] when the stanza has no `name`, and
/// [`StanzaError::EmptyName`] when nothing is left of it after dropping
/// non-ASCII characters.
///
/// # Examples
///
/// ```
/// use interface_dita_builder::classify_stanza;
/// use interface_dita_core::Shape;
/// use interface_dita_core::xml::Element;
///
/// let stanza = Element::parse(
///     r#"<cd:command xmlns:cd="http://www.pragma-ade.com/commands"
///            name="section" type="environment"/>"#,
/// ).unwrap();
///
/// let classification = classify_stanza(&stanza, &[]).unwrap();
/// assert_eq!(classification.shape, Shape::Environment);
/// ```
pub fn classify_stanza(
    stanza: &Element,
    variant_bypass: &[String],
) -> Result<Classification, StanzaError> {
    let raw = stanza.attr("name").ok_or(StanzaError::MissingName)?;
    let name = ascii_only(raw);
    if name.is_empty() {
        return Err(StanzaError::EmptyName {
            raw: raw.to_string(),
        });
    }

    let variant = stanza.attr("variant").map(str::to_string);
    let begin = stanza.attr("begin").map(str::to_string);

    let marker = if variant_bypass.iter().any(|n| *n == name) {
        None
    } else {
        variant.as_deref()
    };

    let has_instances = stanza
        .children_named(INTERFACE_NAMESPACE, "instances")
        .any(|instances| {
            instances
                .children_named(INTERFACE_NAMESPACE, "constant")
                .next()
                .is_some()
        });

    let shape = match (marker, stanza.attr("type")) {
        (Some("instance"), _) if has_instances => Shape::Class,
        (None, Some("environment")) => Shape::Environment,
        (None, _) => Shape::Command,
        (Some(_), _) => Shape::Variant,
    };

    Ok(Classification {
        name,
        shape,
        variant,
        begin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stanza(attrs: &str, body: &str) -> Element {
        let xml = format!(
            r#"<cd:command xmlns:cd="http://www.pragma-ade.com/commands" {attrs}>{body}</cd:command>"#
        );
        Element::parse(&xml).unwrap()
    }

    const INSTANCES: &str =
        r#"<cd:instances><cd:constant value="figure"/><cd:constant value="table"/></cd:instances>"#;

    #[test]
    fn test_missing_and_empty_names_are_distinct() {
        assert_eq!(
            classify_stanza(&stanza(r#"level="style""#, ""), &[]),
            Err(StanzaError::MissingName)
        );
        assert_eq!(
            classify_stanza(&stanza(r#"name="&#160;""#, ""), &[]),
            Err(StanzaError::EmptyName {
                raw: "\u{a0}".to_string()
            })
        );
    }

    #[test]
    fn test_class_wins_over_environment() {
        let stanza = stanza(r#"name="placefloat" type="environment" variant="instance""#, INSTANCES);
        let classification = classify_stanza(&stanza, &[]).unwrap();
        assert_eq!(classification.shape, Shape::Class);
        assert_eq!(classification.variant.as_deref(), Some("instance"));
    }

    #[test]
    fn test_instance_variant_without_constants_is_variant() {
        let stanza = stanza(r#"name="placefloat" variant="instance""#, "<cd:instances/>");
        assert_eq!(classify_stanza(&stanza, &[]).unwrap().shape, Shape::Variant);
    }

    #[test]
    fn test_environment_with_variant_is_variant() {
        let stanza = stanza(r#"name="section" type="environment" variant="example""#, "");
        assert_eq!(classify_stanza(&stanza, &[]).unwrap().shape, Shape::Variant);
    }

    #[test]
    fn test_plain_command_and_begin_marker() {
        let classification =
            classify_stanza(&stanza(r#"name="setupfoo" begin="begin""#, ""), &[]).unwrap();
        assert_eq!(classification.shape, Shape::Command);
        assert_eq!(classification.begin.as_deref(), Some("begin"));
    }

    #[test]
    fn test_name_is_ascii_cleaned() {
        let classification = classify_stanza(&stanza(r#"name="foo&#160;""#, ""), &[]).unwrap();
        assert_eq!(classification.name, "foo");
    }

    #[test]
    fn test_variant_bypass_keeps_raw_marker() {
        let stanza = stanza(r#"name="setuppapersize" variant="name""#, "");
        let bypass = vec!["setuppapersize".to_string()];

        assert_eq!(classify_stanza(&stanza, &[]).unwrap().shape, Shape::Variant);

        let classification = classify_stanza(&stanza, &bypass).unwrap();
        assert_eq!(classification.shape, Shape::Command);
        assert_eq!(classification.variant.as_deref(), Some("name"));
    }

    #[test]
    fn test_every_named_stanza_gets_exactly_one_shape() {
        let variants = [None, Some("instance"), Some("example")];
        let types = [None, Some("environment")];
        for variant in variants {
            for kind in types {
                for body in ["", INSTANCES] {
                    let mut attrs = String::from(r#"name="x""#);
                    if let Some(v) = variant {
                        attrs.push_str(&format!(r#" variant="{v}""#));
                    }
                    if let Some(t) = kind {
                        attrs.push_str(&format!(r#" type="{t}""#));
                    }
                    let result = classify_stanza(&stanza(&attrs, body), &[]);
                    assert!(result.is_ok(), "{attrs} {body}");
                }
            }
        }
    }
}
