//! Owned XML element tree.
//!
//! The same tree type is used to read interface files (namespace-resolved,
//! via [`quick_xml::NsReader`]) and to build DITA documents. Character data
//! follows the lxml convention: an element's `text` is the content before its
//! first child, and each child's `tail` is the content that follows it inside
//! the parent. That makes it possible to grow mixed content one node at a
//! time and still edit "whatever text was written last".
//!
//! # Examples
//!
//! ```
//! use interface_dita_core::xml::Element;
//!
//! let mut cell = Element::new("stentry");
//! cell.append_text("left, ");
//! cell.push(Element::new("ph").with_text("middle"));
//! cell.append_text(", ");
//! assert!(cell.trim_trailing(", "));
//! assert_eq!(cell.text_content(), "left, middle");
//! ```

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use thiserror::Error;

const INDENT: &str = "  ";

/// Errors raised while reading or writing XML.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Malformed markup or an unresolvable entity.
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// Malformed attribute.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Failure writing serialized output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized output was not valid UTF-8.
    #[error("invalid UTF-8 in serialized document: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The input contained no element at all.
    #[error("document has no root element")]
    NoRoot,

    /// An end tag without a matching start tag.
    #[error("unbalanced end tag </{0}>")]
    Unbalanced(String),
}

/// One child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Comment(String),
}

/// An XML element with lxml-style `text` and `tail`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Resolved namespace URI (parsed input only).
    pub namespace: Option<String>,
    /// Local name for parsed input, qualified name for generated output.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Character data before the first child.
    pub text: Option<String>,
    /// Character data after this element's end tag, inside the parent.
    pub tail: Option<String>,
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element with no namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Sets the leading text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the trailing text.
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    /// Appends a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    /// Appends a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.push_comment(comment);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn push_comment(&mut self, comment: impl Into<String>) {
        self.children.push(Node::Comment(comment.into()));
    }

    /// Returns an attribute value by key, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces an existing attribute or appends a new one.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Returns `true` if this element has the given namespace and local name.
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.name == local && self.namespace.as_deref() == Some(namespace)
    }

    /// Iterates over child elements, skipping comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Comment(_) => None,
        })
    }

    /// Mutable variant of [`elements`](Self::elements).
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Comment(_) => None,
        })
    }

    /// Iterates over child elements with the given namespace and local name.
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |e| e.is(namespace, local))
    }

    /// Returns the first child element with the given namespace and local name.
    pub fn first_child_named(&self, namespace: &str, local: &str) -> Option<&Element> {
        self.elements().find(|e| e.is(namespace, local))
    }

    /// Number of child elements.
    pub fn element_count(&self) -> usize {
        self.elements().count()
    }

    /// Appends character data at the current insertion point: the leading
    /// text while the element has no child elements, otherwise the tail of
    /// the last child element.
    pub fn append_text(&mut self, text: &str) {
        let slot = match self.elements_mut().last() {
            Some(last) => &mut last.tail,
            None => &mut self.text,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    /// Removes `suffix` once from the current insertion point.
    ///
    /// Returns `false` when the insertion point does not end with `suffix`.
    pub fn trim_trailing(&mut self, suffix: &str) -> bool {
        let slot = match self.elements_mut().last() {
            Some(last) => &mut last.tail,
            None => &mut self.text,
        };
        match slot {
            Some(text) if text.ends_with(suffix) => {
                text.truncate(text.len() - suffix.len());
                true
            }
            _ => false,
        }
    }

    /// Concatenated character data of this element and its descendants,
    /// excluding this element's own tail.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in self.elements() {
            child.collect_text(out);
            if let Some(tail) = &child.tail {
                out.push_str(tail);
            }
        }
    }

    /// Depth-first search over this element and its descendants.
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.elements().find_map(|child| child.find(predicate))
    }

    /// Depth-first search for an element carrying `id="<id>"`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|e| e.attr("id") == Some(id))
    }

    /// Parses a namespace-aware document and returns its root element.
    ///
    /// Namespace declarations are resolved onto [`Element::namespace`] and
    /// are not kept as attributes. Attribute keys are stored by local name.
    pub fn parse(input: &str) -> Result<Element, XmlError> {
        let mut reader = NsReader::from_str(input);
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_resolved_event()? {
                (ns, Event::Start(start)) => {
                    stack.push(element_from_start(namespace_of(ns), &start)?);
                }
                (ns, Event::Empty(start)) => {
                    let element = element_from_start(namespace_of(ns), &start)?;
                    attach(&mut stack, &mut root, element);
                }
                (_, Event::End(end)) => {
                    let element = stack.pop().ok_or_else(|| {
                        XmlError::Unbalanced(String::from_utf8_lossy(end.name().as_ref()).into())
                    })?;
                    attach(&mut stack, &mut root, element);
                }
                (_, Event::Text(text)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.append_text(&text.unescape()?);
                    }
                }
                (_, Event::CData(data)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.append_text(&String::from_utf8_lossy(&data));
                    }
                }
                (_, Event::Eof) => break,
                _ => {}
            }
        }

        root.ok_or(XmlError::NoRoot)
    }

    /// Serializes this element (and its tail) as an indented fragment.
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Vec::new());
        write_element(&mut writer, self, 0, true)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn namespace_of(result: ResolveResult<'_>) -> Option<String> {
    match result {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        _ => None,
    }
}

fn element_from_start(
    namespace: Option<String>,
    start: &BytesStart<'_>,
) -> Result<Element, XmlError> {
    let mut element = Element {
        namespace,
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        ..Default::default()
    };
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// A complete output document: XML declaration, optional doctype, root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Doctype body, e.g. `map PUBLIC "-//OASIS//DTD DITA Map//EN" "map.dtd"`.
    pub doctype: Option<String>,
    pub root: Element,
}

impl Document {
    pub fn new(root: Element, doctype: Option<&str>) -> Self {
        Self {
            doctype: doctype.map(String::from),
            root,
        }
    }

    /// Serializes the document with an UTF-8 declaration.
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
        if let Some(doctype) = &self.doctype {
            writer.write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))?;
            writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
        }
        write_element(&mut writer, &self.root, 0, true)?;
        writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn is_blank(text: &Option<String>) -> bool {
    text.as_deref().is_none_or(|t| t.trim().is_empty())
}

/// Children are only indented when the element holds no character data of
/// its own, so mixed content is written exactly as built.
fn is_element_only(element: &Element) -> bool {
    is_blank(&element.text) && element.elements().all(|child| is_blank(&child.tail))
}

fn write_indent<W: std::io::Write>(writer: &mut Writer<W>, depth: usize) -> Result<(), XmlError> {
    let indent = format!("\n{}", INDENT.repeat(depth));
    writer.write_event(Event::Text(BytesText::from_escaped(indent)))?;
    Ok(())
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &Element,
    depth: usize,
    pretty: bool,
) -> Result<(), XmlError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    let text = element.text.as_deref().filter(|t| !t.is_empty());
    if element.children.is_empty() && text.is_none() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        let indent_children = pretty && !element.children.is_empty() && is_element_only(element);
        if let Some(text) = text.filter(|_| !indent_children) {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &element.children {
            if indent_children {
                write_indent(writer, depth + 1)?;
            }
            match child {
                Node::Element(child) => write_element(writer, child, depth + 1, indent_children)?,
                Node::Comment(comment) => {
                    writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?
                }
            }
        }
        if indent_children {
            write_indent(writer, depth)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    }

    if let Some(tail) = element.tail.as_deref().filter(|t| !t.is_empty()) {
        if !pretty || !tail.trim().is_empty() {
            writer.write_event(Event::Text(BytesText::new(tail)))?;
        }
    }
    Ok(())
}
