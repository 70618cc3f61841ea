//! Connection-reference repair.
//!
//! A `connectionId` links two wire endpoints, so an id used by exactly one
//! wire in a collection is orphaned. Ids used two or more times are accepted
//! as paired without checking cardinality further.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::types::is_set;

/// Frequency of each `connectionId` across one wire collection.
///
/// Must be computed before any wire is touched so relabelled ids never
/// affect the counts.
#[derive(Debug, Default)]
pub struct ConnectionCounts {
    counts: HashMap<String, usize>,
}

impl ConnectionCounts {
    pub fn count(wires: &[Value]) -> Self {
        let mut counts = HashMap::new();
        for id in wires.iter().filter_map(|w| w.as_object()).filter_map(connection_key) {
            *counts.entry(id).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, id: &str) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }
}

/// The id as a map key; non-string ids are keyed by their JSON text.
pub fn connection_key(wire: &Map<String, Value>) -> Option<String> {
    let id = wire.get("connectionId");
    if !is_set(id) {
        return None;
    }
    id.map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Relabel an orphaned id to `<id>_fixed_<index>`.
///
/// Returns `(old, new)` when the wire was changed.
pub fn repair(wire: &mut Map<String, Value>, index: usize, counts: &ConnectionCounts) -> Option<(String, String)> {
    let id = connection_key(wire)?;
    if counts.get(&id) != 1 {
        return None;
    }
    let fixed = format!("{id}_fixed_{index}");
    wire.insert("connectionId".to_string(), Value::from(fixed.clone()));
    Some((id, fixed))
}
