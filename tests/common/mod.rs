//! Shared test utilities for polemig integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Builders produce plain `serde_json::Value` documents so
//! harnesses can feed them straight into the engine.

#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
