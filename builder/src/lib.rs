//! Interface description classification and command model building.
//!
//! This crate turns a parsed interface description into the command model
//! defined in `interface-dita-core`:
//!
//! - [`classify_stanza`] decides whether a stanza is a command, an
//!   environment, a class or an unsupported variant.
//! - [`expand_class`] and [`expand_environment`] derive the concrete
//!   commands of classes and environments.
//! - [`build_command`] walks one stanza's argument trees into [`Argument`]s.
//! - [`build_interface`] drives all of the above over a whole file and
//!   returns an [`InterfaceModel`] with a [`BuildReport`].
//!
//! Recoverable problems never abort a build; they are recorded as
//! [`Diagnostic`]s.
//!
//! # Example
//!
//! ```
//! use interface_dita_builder::{BuildConfig, build_interface, parse_interface};
//!
//! let root = parse_interface(
//!     r#"<cd:interface xmlns:cd="http://www.pragma-ade.com/commands">
//!          <cd:command name="placefloat" variant="instance">
//!            <cd:sequence><cd:string value="place"/><cd:instance value="float"/></cd:sequence>
//!            <cd:instances><cd:constant value="figure"/><cd:constant value="table"/></cd:instances>
//!          </cd:command>
//!        </cd:interface>"#,
//! ).unwrap();
//!
//! let model = build_interface(root, &BuildConfig::default());
//! assert_eq!(model.commands.names().collect::<Vec<_>>(), vec!["placefigure", "placetable"]);
//! ```
//!
//! [`Argument`]: interface_dita_core::Argument

pub mod arguments;
pub mod classify;
pub mod command;
pub mod config;
pub mod entries;
pub mod error;
pub mod expand;
pub mod interface;
pub mod report;

pub use classify::{Classification, classify_stanza};
pub use command::{Findings, build_command};
pub use config::BuildConfig;
pub use error::{BuildError, Result, StanzaError};
pub use expand::{Expansion, expand_class, expand_environment};
pub use interface::{
    InterfaceModel, VariantRecord, build_interface, load_interface, parse_interface,
};
pub use report::{BuildReport, Diagnostic, Severity};
