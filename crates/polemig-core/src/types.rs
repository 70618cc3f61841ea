//! Typed views over the loosely-typed document tree.
//!
//! The document stays a [`serde_json::Value`] so unknown fields survive the
//! migration untouched. The few fields the engine makes decisions on are
//! decoded here, once, into small enums.

use serde_json::{Map, Value};

pub const INDUSTRY_UTILITY: &str = "UTILITY";
pub const INDUSTRY_COMMUNICATION: &str = "COMMUNICATION";
pub const USAGE_COMMUNICATION: &str = "COMMUNICATION";
pub const DEFAULT_OWNER_ID: &str = "DEFAULT";
pub const DEFAULT_TENSION_GROUP: &str = "Full";
pub const STATIC_CALCULATION: &str = "STATIC";

/// Whether an optional field counts as present.
///
/// Source exports use missing keys, `null`, `false`, `0` and `""`
/// interchangeably for "not set", so all of them read as absent.
pub fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Read a field as a string slice if it is one.
pub fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

// ---------------------------------------------------------------------------
// Owner
// ---------------------------------------------------------------------------

/// A wire's `owner`, decoded from either schema generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner<'a> {
    /// Not set.
    Absent,
    /// Source-schema bare identifier: `"owner": "Comcast"`.
    Legacy(&'a str),
    /// Target-schema object: `"owner": {"id": ..., "industry": ...}`.
    Structured {
        id: Option<&'a str>,
        industry: Option<&'a str>,
    },
    /// Set, but neither a string nor an object.
    Unrecognised,
}

impl<'a> Owner<'a> {
    pub fn of(wire: &'a Map<String, Value>) -> Self {
        Self::decode(wire.get("owner"))
    }

    pub fn decode(value: Option<&'a Value>) -> Self {
        if !is_set(value) {
            return Owner::Absent;
        }
        match value {
            Some(Value::String(s)) => Owner::Legacy(s.as_str()),
            Some(Value::Object(o)) => Owner::Structured {
                id: str_field(o, "id"),
                industry: str_field(o, "industry"),
            },
            _ => Owner::Unrecognised,
        }
    }

    /// The owner identifier, whichever shape carried it.
    pub fn id(&self) -> Option<&'a str> {
        match *self {
            Owner::Legacy(id) => Some(id),
            Owner::Structured { id, .. } => id,
            Owner::Absent | Owner::Unrecognised => None,
        }
    }

    pub fn industry(&self) -> Option<&'a str> {
        match *self {
            Owner::Structured { industry, .. } => industry,
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// WireType
// ---------------------------------------------------------------------------

/// The wire roles that receive caller-supplied size defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Primary,
    Neutral,
    SecondaryOpen,
    Other,
}

impl WireType {
    pub fn of(wire: &Map<String, Value>) -> Self {
        match str_field(wire, "type") {
            Some("PRIMARY") => WireType::Primary,
            Some("NEUTRAL") => WireType::Neutral,
            Some("SECONDARY_OPEN") => WireType::SecondaryOpen,
            _ => WireType::Other,
        }
    }

    /// Wording used in change descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WireType::Primary => "primary",
            WireType::Neutral => "neutral",
            WireType::SecondaryOpen => "secondary open",
            WireType::Other => "other",
        }
    }
}

impl std::fmt::Display for WireType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
