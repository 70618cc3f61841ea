//! Schema Upgrader: document-level changes between schema 9 and 10.
//!
//! Bumps `version` and `schema`, applies the legacy field renames, strips
//! the top-level fields the target schema rejects and guarantees a `leads`
//! array for the normalizer to walk.

use serde_json::{Map, Value};

use crate::changes::ChangeLog;
use crate::types::str_field;

pub const TARGET_VERSION: u64 = 10;

pub const TARGET_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/spidasoftware/schema/master/resources/v1/schema/spidacalc/calc/project.schema";

/// Any `schema` URL containing this is already a target-schema reference.
const TARGET_SCHEMA_MARKER: &str = "v1/schema";

/// Legacy field → target field (dot-separated for nested targets).
pub const FIELD_RENAMES: &[(&str, &str)] = &[
    ("supportType", "structure.pole.supportType"),
    ("clientFile", "clientFileVersion"),
    ("dateModified", "dateModified.isoDateTime"),
];

/// Top-level fields that fail target-schema validation.
pub const REJECTED_FIELDS: &[&str] = &["engineVersion", "formulaOptions", "analysisCases"];

/// Upgrade the top level of `doc` in place.
///
/// Version-dependent steps run only when `version` is not 10; field
/// stripping and the `leads` guarantee always run.
pub fn upgrade(doc: &mut Value, log: &mut ChangeLog) {
    let Some(root) = doc.as_object_mut() else {
        tracing::warn!("document root is not an object; skipping upgrade");
        return;
    };

    if !is_target_version(root.get("version")) {
        bump_version(root, log);
        ensure_schema_url(root, log);
        apply_renames(root, log);
    }

    strip_rejected_fields(root, log);
    ensure_leads(root, log);
}

fn is_target_version(version: Option<&Value>) -> bool {
    version.and_then(Value::as_f64) == Some(TARGET_VERSION as f64)
}

fn bump_version(root: &mut Map<String, Value>, log: &mut ChangeLog) {
    let previous = match root.get("version") {
        Some(v) if !v.is_null() => v.to_string(),
        _ => "unset".to_string(),
    };
    root.insert("version".to_string(), Value::from(TARGET_VERSION));
    log.record(format!("Updated schema version from {previous} to {TARGET_VERSION}"));
}

fn ensure_schema_url(root: &mut Map<String, Value>, log: &mut ChangeLog) {
    if str_field(root, "schema").is_some_and(|s| s.contains(TARGET_SCHEMA_MARKER)) {
        return;
    }
    root.insert("schema".to_string(), Value::from(TARGET_SCHEMA_URL));
    log.record(format!("Updated schema URL to v{TARGET_VERSION} format"));
}

fn apply_renames(root: &mut Map<String, Value>, log: &mut ChangeLog) {
    for &(legacy, target) in FIELD_RENAMES {
        let Some(value) = root.get(legacy) else { continue };
        if lookup_path(root, target).is_some() {
            continue;
        }
        // An object under the legacy key that heads its own target path is
        // already in the nested shape.
        if value.is_object() && target.split('.').next() == Some(legacy) {
            continue;
        }
        // A scalar elsewhere on the target path belongs to other data.
        if let Some(blocker) = scalar_on_path(root, target).filter(|b| *b != legacy) {
            tracing::warn!(legacy, target, blocker, "rename target path blocked by a non-object value; skipping");
            continue;
        }
        let value = value.clone();
        insert_path(root, target, value);
        log.record(format!("Mapped {legacy} to {target}"));
    }
}

fn strip_rejected_fields(root: &mut Map<String, Value>, log: &mut ChangeLog) {
    for &field in REJECTED_FIELDS {
        if root.shift_remove(field).is_some() {
            log.record(format!("Removed {field} field to comply with schema"));
        }
    }
}

fn ensure_leads(root: &mut Map<String, Value>, log: &mut ChangeLog) {
    match root.get("leads") {
        Some(Value::Array(_)) => {}
        Some(_) => {
            root.insert("leads".to_string(), Value::Array(Vec::new()));
            log.record("Replaced non-array leads with empty leads array");
        }
        None => {
            root.insert("leads".to_string(), Value::Array(Vec::new()));
            log.record("Added empty leads array");
        }
    }
}

// ---------------------------------------------------------------------------
// Dot-path helpers
// ---------------------------------------------------------------------------

/// Resolve a dot-separated path through nested objects.
pub fn lookup_path<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for seg in segments {
        current = current.as_object()?.get(seg)?;
    }
    Some(current)
}

/// The first intermediate on `path` that exists but is not an object,
/// as a dot-separated prefix.
pub fn scalar_on_path<'a>(root: &Map<String, Value>, path: &'a str) -> Option<&'a str> {
    let mut current = root;
    let mut end = 0;
    let segments: Vec<&str> = path.split('.').collect();
    for (i, seg) in segments.iter().enumerate() {
        if i + 1 == segments.len() {
            break;
        }
        end += seg.len() + usize::from(i > 0);
        match current.get(*seg) {
            None => return None,
            Some(Value::Object(next)) => current = next,
            Some(_) => return Some(&path[..end]),
        }
    }
    None
}

/// Write `value` at a dot-separated path, creating intermediate objects.
/// A non-object intermediate is replaced by an object.
pub fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else { return };

    let mut current = root;
    for seg in segments {
        let slot = current
            .entry(seg.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else { return };
        current = next;
    }
    current.insert(last.to_string(), value);
}
