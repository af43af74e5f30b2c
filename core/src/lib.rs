//! Core model and XML primitives for macro interface documentation.
//!
//! This crate defines the types shared by the builder and the topic
//! synthesizer:
//!
//! - [`Command`] and [`Argument`]: one modeled command and its call signature.
//! - [`Entry`], [`Setting`] and [`Inheritance`]: keyword, parameter and
//!   inherited entries of option-sets and assignment-sets.
//! - [`Class`], [`Environment`] and [`Relation`]: membership records for
//!   derived commands.
//! - [`CommandTable`]: name-keyed table where the first occurrence wins.
//! - [`DonorSet`]: idempotent set of commands other commands inherit from.
//! - [`xml`]: a small owned XML tree used both to read interface files and
//!   to write generated documents.
//!
//! Validation ([`validate_table`]) checks that every inherited donor exists
//! and carries the inherited argument group.
//!
//! # Example
//!
//! ```
//! use interface_dita_core::*;
//!
//! let mut location = Command::new("location");
//! location.arguments.push(
//!     Argument::new(ArgumentKind::Options, Delimiters::Brackets)
//!         .named("options1")
//!         .with_body(ArgumentBody::Options(vec![
//!             Entry::Keyword { text: "left".into(), default: false },
//!             Entry::Keyword { text: "middle".into(), default: true },
//!             Entry::Keyword { text: "right".into(), default: false },
//!         ])),
//! );
//!
//! let mut table = CommandTable::new();
//! table.insert(location, |_| false);
//!
//! assert_eq!(table.donor_count("location", EntryGroup::Options), Some(3));
//! assert!(validate_table(&table).is_empty());
//! ```

mod donors;
mod table;
mod types;
mod validate;
pub mod xml;

pub use donors::DonorSet;
pub use table::{CommandTable, Insertion};
pub use types::*;
pub use validate::{ValidationError, validate_command, validate_table};
