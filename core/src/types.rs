//! Command model definitions.
//!
//! This module defines the normalized model that the builder produces from
//! an interface description and that the synthesizer renders into topics.
//! The types serialize with [`serde`] so a single command can be dumped for
//! inspection.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::xml::Element;

/// Namespace URI of the interface description format.
pub const INTERFACE_NAMESPACE: &str = "http://www.pragma-ade.com/commands";

/// Prefix marking a constant's `type` as a well-known argument-value type.
pub const PLACEHOLDER_PREFIX: &str = "cd:";

/// Returns the upper-cased placeholder name for a `cd:`-prefixed type.
///
/// # Examples
///
/// ```
/// use interface_dita_core::placeholder_name;
///
/// assert_eq!(placeholder_name("cd:number").as_deref(), Some("NUMBER"));
/// assert_eq!(placeholder_name("yes"), None);
/// ```
pub fn placeholder_name(value_type: &str) -> Option<String> {
    value_type
        .strip_prefix(PLACEHOLDER_PREFIX)
        .map(str::to_ascii_uppercase)
}

/// Drops every non-ASCII character.
///
/// Interface files occasionally carry non-breaking spaces in names and
/// markers; generated command names must not.
pub fn ascii_only(value: &str) -> String {
    value.chars().filter(char::is_ascii).collect()
}

/// Shape of one top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// A plain command.
    Command,
    /// A paired begin/end environment.
    Environment,
    /// A family of instances sharing one argument schema.
    Class,
    /// An unsupported variant; reported but not modeled.
    Variant,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => write!(f, "command"),
            Self::Environment => write!(f, "environment"),
            Self::Class => write!(f, "class"),
            Self::Variant => write!(f, "variant"),
        }
    }
}

/// Kind of one argument in a command's call signature.
///
/// # Examples
///
/// ```
/// use interface_dita_core::ArgumentKind;
///
/// assert_eq!(ArgumentKind::Options.token(), "OPTIONS");
/// assert_eq!(ArgumentKind::Placeholder("NUMBER".into()).token(), "NUMBER");
/// assert_eq!(ArgumentKind::Unresolved.token(), "UNKNOWN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentKind {
    /// Bracketed keyword set.
    Options,
    /// Assignment set (`key=value` list).
    Settings,
    /// Nested control sequence.
    Command,
    /// Scoped content, always in braces.
    Scope,
    /// Literal control sequence with no enclosing delimiter.
    Delimiter,
    Dimension,
    Triplet,
    Position,
    LiteralString,
    Angles,
    Template,
    Apply,
    Text,
    Index,
    /// A keyword set whose single entry is a well-known value type.
    Placeholder(String),
    /// Unrecognized argument tag.
    Unresolved,
}

impl ArgumentKind {
    /// Upper-case token used in syntax lines and as a key reference.
    pub fn token(&self) -> &str {
        match self {
            Self::Options => "OPTIONS",
            Self::Settings => "SETTINGS",
            Self::Command => "COMMAND",
            Self::Scope => "SCOPE",
            Self::Delimiter => "DELIMITER",
            Self::Dimension => "DIMENSION",
            Self::Triplet => "TRIPLET",
            Self::Position => "POSITION",
            Self::LiteralString => "STRING",
            Self::Angles => "ANGLES",
            Self::Template => "TEMPLATE",
            Self::Apply => "APPLY",
            Self::Text => "TEXT",
            Self::Index => "INDEX",
            Self::Placeholder(name) => name,
            Self::Unresolved => "UNKNOWN",
        }
    }
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Delimiter pair enclosing an argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiters {
    #[default]
    Brackets,
    Braces,
    Parenthesis,
    /// Rendered bare, without any delimiter.
    #[serde(rename = "none")]
    Bare,
    /// A declared style this model does not know.
    Other(String),
}

impl Delimiters {
    /// Reads a `delimiters` attribute value, defaulting to brackets.
    ///
    /// # Examples
    ///
    /// ```
    /// use interface_dita_core::Delimiters;
    ///
    /// assert_eq!(Delimiters::from_attr(None), Delimiters::Brackets);
    /// assert_eq!(Delimiters::from_attr(Some("none")), Delimiters::Bare);
    /// assert_eq!(Delimiters::from_attr(Some("braces")).pair(), Some(("{", "}")));
    /// ```
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            None | Some("brackets") => Self::Brackets,
            Some("braces") => Self::Braces,
            Some("parenthesis") => Self::Parenthesis,
            Some("none") => Self::Bare,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Opening and closing strings, or `None` for bare arguments.
    pub fn pair(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Brackets => Some(("[", "]")),
            Self::Braces => Some(("{", "}")),
            Self::Parenthesis => Some(("(", ")")),
            Self::Bare => None,
            Self::Other(_) => Some(("?", "?")),
        }
    }
}

/// Entry group a donor's entries are transcluded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryGroup {
    Options,
    Settings,
}

impl EntryGroup {
    /// Synthetic name of the donor's first argument of this group.
    pub fn id(self) -> &'static str {
        match self {
            Self::Options => "options1",
            Self::Settings => "settings1",
        }
    }
}

impl fmt::Display for EntryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Reference to another command's entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inheritance {
    pub donor: String,
    pub group: EntryGroup,
}

impl Inheritance {
    pub fn new(donor: impl Into<String>, group: EntryGroup) -> Self {
        Self {
            donor: donor.into(),
            group,
        }
    }
}

/// One entry of an option-set, or one key of a setting parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    /// Literal keyword.
    Keyword { text: String, default: bool },
    /// Well-known value type, e.g. `NUMBER`.
    Placeholder { name: String, default: bool },
    /// Entries inherited from another command.
    Inherit(Inheritance),
}

impl Entry {
    /// Returns `true` for entries flagged as the default value.
    pub fn is_default(&self) -> bool {
        match self {
            Self::Keyword { default, .. } | Self::Placeholder { default, .. } => *default,
            Self::Inherit(_) => false,
        }
    }

    pub fn inheritance(&self) -> Option<&Inheritance> {
        match self {
            Self::Inherit(inheritance) => Some(inheritance),
            _ => None,
        }
    }
}

/// One child of an assignment-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Setting {
    /// Named parameter with its own list of accepted keys.
    Parameter { name: String, keys: Vec<Entry> },
    /// A whole setting group inherited from another command.
    Inherit(Inheritance),
}

/// Child entries of an argument.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "body", content = "entries", rename_all = "snake_case")]
pub enum ArgumentBody {
    #[default]
    Empty,
    Options(Vec<Entry>),
    Settings(Vec<Setting>),
}

/// One element of a command's call signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub kind: ArgumentKind,
    pub delimiters: Delimiters,
    pub optional: bool,
    /// `options<N>` / `settings<N>`, or the control sequence of a delimiter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub body: ArgumentBody,
}

impl Argument {
    /// Creates a required argument with no entries.
    pub fn new(kind: ArgumentKind, delimiters: Delimiters) -> Self {
        Self {
            kind,
            delimiters,
            optional: false,
            name: None,
            body: ArgumentBody::Empty,
        }
    }

    /// Marks the argument as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the synthetic or control-sequence name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches child entries.
    pub fn with_body(mut self, body: ArgumentBody) -> Self {
        self.body = body;
        self
    }

    /// Number of child entries.
    pub fn count(&self) -> usize {
        match &self.body {
            ArgumentBody::Empty => 0,
            ArgumentBody::Options(entries) => entries.len(),
            ArgumentBody::Settings(settings) => settings.len(),
        }
    }

    /// Option entries, empty for other bodies.
    pub fn options(&self) -> &[Entry] {
        match &self.body {
            ArgumentBody::Options(entries) => entries,
            _ => &[],
        }
    }

    /// Setting entries, empty for other bodies.
    pub fn settings(&self) -> &[Setting] {
        match &self.body {
            ArgumentBody::Settings(settings) => settings,
            _ => &[],
        }
    }

    /// Every inheritance reference held by this argument, nested keys included.
    pub fn inheritances(&self) -> Vec<&Inheritance> {
        let mut found = Vec::new();
        for entry in self.options() {
            found.extend(entry.inheritance());
        }
        for setting in self.settings() {
            match setting {
                Setting::Inherit(inheritance) => found.push(inheritance),
                Setting::Parameter { keys, .. } => {
                    found.extend(keys.iter().filter_map(Entry::inheritance));
                }
            }
        }
        found
    }
}

/// Role of a derived command inside its class or environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Instance,
    Begin,
    End,
}

/// Where a derived command came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceOf {
    /// [`Shape::Class`] or [`Shape::Environment`].
    pub shape: Shape,
    /// Class name or environment stem.
    pub stem: String,
    pub role: MemberRole,
}

/// One fully modeled command.
///
/// # Examples
///
/// ```
/// use interface_dita_core::*;
///
/// let mut command = Command::new("setupfoo");
/// command.arguments.push(
///     Argument::new(ArgumentKind::Options, Delimiters::Brackets)
///         .named("options1")
///         .with_body(ArgumentBody::Options(vec![
///             Entry::Keyword { text: "yes".into(), default: true },
///             Entry::Keyword { text: "no".into(), default: false },
///         ])),
/// );
///
/// assert_eq!(command.entry_count(EntryGroup::Options), Some(2));
/// assert_eq!(command.entry_count(EntryGroup::Settings), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    pub is_system: bool,
    /// Raw audience level (`style`, `document`, `system`, ...).
    pub level: Option<String>,
    /// Raw category attribute.
    pub category: Option<String>,
    pub keywords: Vec<String>,
    pub source_file: Option<String>,
    pub variant: Option<String>,
    pub arguments: Vec<Argument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_of: Option<InstanceOf>,
    /// Originating stanza, kept for diagnostics.
    #[serde(skip)]
    pub stanza: Option<Arc<Element>>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Entry count of this command's first option-set or assignment-set.
    pub fn entry_count(&self, group: EntryGroup) -> Option<usize> {
        self.arguments
            .iter()
            .find(|arg| arg.name.as_deref() == Some(group.id()))
            .map(Argument::count)
    }

    /// Every inheritance reference held by this command's arguments.
    pub fn inheritances(&self) -> Vec<&Inheritance> {
        self.arguments
            .iter()
            .flat_map(Argument::inheritances)
            .collect()
    }

    /// Lower-cased first character, used to shard command topics.
    pub fn shard(&self) -> String {
        shard_of(&self.name)
    }
}

/// Lower-cased first character of a command name (`_` for empty names).
pub fn shard_of(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_else(|| "_".to_string())
}

/// A begin/end command pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub stem: String,
    pub begin: String,
    pub end: String,
}

impl Environment {
    pub fn members(&self) -> [&str; 2] {
        [self.begin.as_str(), self.end.as_str()]
    }
}

/// One instance of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassInstance {
    Command(String),
    Environment(Environment),
}

/// A family of derived commands sharing one argument schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    /// Instances are begin/end pairs rather than plain commands.
    pub environment: bool,
    pub instances: Vec<ClassInstance>,
}

impl Class {
    /// All derived command names in declaration order.
    pub fn member_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for instance in &self.instances {
            match instance {
                ClassInstance::Command(name) => names.push(name.as_str()),
                ClassInstance::Environment(env) => names.extend(env.members()),
            }
        }
        names
    }
}

/// Membership record feeding the relationship map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Class(Class),
    Environment(Environment),
}

impl Relation {
    /// Class name or environment stem.
    pub fn stem(&self) -> &str {
        match self {
            Self::Class(class) => &class.name,
            Self::Environment(env) => &env.stem,
        }
    }

    /// Member command names in declaration order.
    pub fn members(&self) -> Vec<&str> {
        match self {
            Self::Class(class) => class.member_names(),
            Self::Environment(env) => env.members().to_vec(),
        }
    }
}
