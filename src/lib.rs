//! polemig: batch migration of version 9 pole/line design exports.
//!
//! The migration engine lives in [`polemig_core`]; this crate adds the batch
//! host used by the `polemig` binary so integration tests can drive it
//! without spawning a process.
//!
//! # Architecture
//!
//! ```text
//! CLI ──► select_inputs ──► batch::run ──► JoinSet (one task per file)
//!                                              │
//!                          read ──► migrate_str (blocking pool) ──► write
//! ```

pub mod batch;

pub use polemig_core::{migrate_str, Defaults, Migration};
