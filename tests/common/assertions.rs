//! Domain-specific assertion macros for polemig harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! migration guarantee was violated and *where* in the document.

// ---------------------------------------------------------------------------
// Change log assertions
// ---------------------------------------------------------------------------

/// Assert that some change description contains `needle`.
///
/// ```rust
/// assert_change_logged!(migration.changes, "Added tension group");
/// ```
#[macro_export]
macro_rules! assert_change_logged {
    ($changes:expr, $needle:expr) => {{
        let changes: &[String] = &$changes;
        let needle: &str = $needle;
        if !changes.iter().any(|c| c.contains(needle)) {
            panic!(
                "assert_change_logged! failed: no change mentions {:?}.\n  Changes ({}):\n    {}",
                needle,
                changes.len(),
                changes.join("\n    ")
            );
        }
    }};
}

/// Assert that no change description contains `needle`.
#[macro_export]
macro_rules! assert_change_not_logged {
    ($changes:expr, $needle:expr) => {{
        let changes: &[String] = &$changes;
        let needle: &str = $needle;
        if let Some(hit) = changes.iter().find(|c| c.contains(needle)) {
            panic!("assert_change_not_logged! failed: {:?} matched {:?}", needle, hit);
        }
    }};
}

// ---------------------------------------------------------------------------
// Document invariants
// ---------------------------------------------------------------------------

/// Assert that no wire collection contains a `connectionId` used exactly once,
/// ignoring ids that were relabelled with a `_fixed_` suffix.
#[macro_export]
macro_rules! assert_no_singleton_connections {
    ($doc:expr) => {{
        let doc: &serde_json::Value = &$doc;
        for (ci, wires) in $crate::common::all_wire_collections(doc).into_iter().enumerate() {
            let mut counts = std::collections::HashMap::<String, usize>::new();
            for w in wires {
                if let Some(id) = w["connectionId"].as_str().filter(|s| !s.is_empty()) {
                    *counts.entry(id.to_string()).or_default() += 1;
                }
            }
            for (id, n) in counts {
                if n == 1 && !id.contains("_fixed_") {
                    panic!(
                        "assert_no_singleton_connections! failed: collection {} has orphaned connectionId {:?}",
                        ci, id
                    );
                }
            }
        }
    }};
}

/// Assert that every wire has an owner object with id and industry, a
/// usage group and a tension group.
#[macro_export]
macro_rules! assert_wires_complete {
    ($doc:expr) => {{
        let doc: &serde_json::Value = &$doc;
        for (wi, w) in $crate::common::all_wires(doc).into_iter().enumerate() {
            let owner = &w["owner"];
            let ok = owner["id"].is_string()
                && owner["industry"].as_str().is_some_and(|s| !s.is_empty())
                && w["usageGroup"].as_str().is_some_and(|s| !s.is_empty())
                && w["tensionGroup"].as_str().is_some_and(|s| !s.is_empty());
            if !ok {
                panic!(
                    "assert_wires_complete! failed: wire {} is missing required fields.\n  wire: {}",
                    wi,
                    serde_json::to_string_pretty(w).unwrap_or_default()
                );
            }
        }
    }};
}

/// Assert that the document carries the version 10 header.
#[macro_export]
macro_rules! assert_v10_header {
    ($doc:expr) => {{
        let doc: &serde_json::Value = &$doc;
        assert_eq!(doc["version"], 10, "assert_v10_header! failed: version is {}", doc["version"]);
        let schema = doc["schema"].as_str().unwrap_or_default();
        assert!(
            schema.contains("v1/schema"),
            "assert_v10_header! failed: schema {:?} lacks v1/schema",
            schema
        );
        assert!(
            doc["leads"].is_array(),
            "assert_v10_header! failed: leads is {}",
            doc["leads"]
        );
    }};
}
