//! polemig-core: schema migration engine for pole/line design documents.
//!
//! This crate rewrites documents exported against the version 9 schema into
//! the version 10 shape, recording every mutation in an ordered, human
//! readable change log.
//!
//! # Architecture
//!
//! ```text
//! raw text ──► Preprocessor ──► parse ──► deep copy
//!                                             │
//!                  (document, changes) ◄── Normalizer ◄── Upgrader
//! ```
//!
//! Every stage is a pure function of the document and the caller's
//! [`Defaults`]; nothing is shared between documents except the read-only
//! catalogs in [`catalog`]. Only the parse step can fail.

pub mod catalog;
pub mod changes;
pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod preprocess;
pub mod types;
pub mod upgrade;

pub use changes::ChangeLog;
pub use config::{ConductorProperties, Defaults, WireDefaults, WireRoleDefaults};
pub use error::MalformedInputError;
pub use pipeline::{migrate, migrate_str, migrate_value, Migration};
pub use types::{Owner, WireType};
