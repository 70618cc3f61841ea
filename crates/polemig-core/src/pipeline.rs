//! End-to-end migration of one document.
//!
//! `preprocess → parse → deep copy → upgrade → normalize`. Parsing is the
//! only fallible step; a document either comes out fully migrated or not at
//! all.

use serde_json::Value;

use crate::changes::ChangeLog;
use crate::config::Defaults;
use crate::error::MalformedInputError;
use crate::normalize::normalize;
use crate::preprocess::preprocess;
use crate::upgrade::upgrade;

/// A migrated document and the ordered list of changes applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub document: Value,
    pub changes: Vec<String>,
}

impl Migration {
    pub fn to_json_pretty(&self) -> String {
        // Serializing a Value into a String cannot fail.
        serde_json::to_string_pretty(&self.document).unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.document).unwrap_or_default()
    }
}

/// Migrate raw export text.
pub fn migrate_str(raw: &str, defaults: &Defaults) -> Result<Migration, MalformedInputError> {
    let text = preprocess(raw);
    let doc: Value = serde_json::from_str(&text)?;

    let mut log = ChangeLog::new();
    if text != raw {
        log.record("Fixed malformed JSON format");
    }
    Ok(run(doc, defaults, log))
}

/// Migrate a deep copy of an already-parsed document; `source` is untouched.
pub fn migrate_value(source: &Value, defaults: &Defaults) -> Migration {
    migrate(source.clone(), defaults)
}

/// Migrate an owned document.
pub fn migrate(doc: Value, defaults: &Defaults) -> Migration {
    run(doc, defaults, ChangeLog::new())
}

fn run(mut doc: Value, defaults: &Defaults, mut log: ChangeLog) -> Migration {
    upgrade(&mut doc, &mut log);
    normalize(&mut doc, defaults, &mut log);
    tracing::debug!(changes = log.len(), "document migrated");
    Migration {
        document: doc,
        changes: log.into_vec(),
    }
}
