//! DITA topic and map synthesis for interface command models.
//!
//! [`render_command`] turns one [`Command`] into a DITA reference topic,
//! resolving inherited option and setting entries against the shared
//! [`CommandTable`]. [`publish`] renders every command of an
//! [`InterfaceModel`] on a worker pool and writes the class and environment
//! concepts and all maps into a [`Layout`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use interface_dita_core::{Command, CommandTable};
//! use interface_dita_synth::{TopicConfig, TopicContext, render_command};
//!
//! let context = TopicContext::new(
//!     TopicConfig::default(),
//!     "en",
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//! );
//! let rendered = render_command(&Command::new("thinspace"), &CommandTable::new(), &context).unwrap();
//! assert_eq!(rendered.document.root.attr("id"), Some("r_command_thinspace"));
//! ```
//!
//! [`Command`]: interface_dita_core::Command
//! [`CommandTable`]: interface_dita_core::CommandTable
//! [`InterfaceModel`]: interface_dita_builder::InterfaceModel

pub mod concept;
pub mod config;
pub mod document;
pub mod error;
pub mod inheritance;
pub mod layout;
pub mod maps;
pub mod options;
pub mod prolog;
pub mod publish;
pub mod settings;
pub mod syntax;
pub mod topic;

pub use config::TopicConfig;
pub use document::write_document;
pub use error::{Result, SynthError};
pub use inheritance::{Reference, Resolver, SynthWarning};
pub use layout::{ImportStats, Layout, import_manual_topics};
pub use publish::{PublishOptions, PublishSummary, TopicFailure, publish};
pub use topic::{RenderedTopic, TopicContext, render_command};
