//! Test builders: fluent constructors for wires, poles and documents.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use serde_json::{json, Map, Value};

// ---------------------------------------------------------------------------
// WireBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a single wire object.
///
/// # Example
///
/// ```rust
/// let wire = WireBuilder::new()
///     .wire_type("PRIMARY")
///     .connection("A")
///     .build();
/// ```
#[derive(Default)]
pub struct WireBuilder {
    fields: Map<String, Value>,
}

impl WireBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(self, id: &str) -> Self {
        self.field("id", id)
    }

    pub fn wire_type(self, ty: &str) -> Self {
        self.field("type", ty)
    }

    pub fn connection(self, id: &str) -> Self {
        self.field("connectionId", id)
    }

    /// Structured owner without an industry.
    pub fn owner(self, id: &str) -> Self {
        self.field("owner", json!({ "id": id }))
    }

    pub fn owner_with_industry(self, id: &str, industry: &str) -> Self {
        self.field("owner", json!({ "id": id, "industry": industry }))
    }

    /// Legacy string owner.
    pub fn legacy_owner(self, id: &str) -> Self {
        self.field("owner", id)
    }

    pub fn usage_group(self, group: &str) -> Self {
        self.field("usageGroup", group)
    }

    pub fn size(self, size: &str) -> Self {
        self.field("size", size)
    }

    pub fn client_item(self, item: Value) -> Self {
        self.field("clientItem", item)
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

// ---------------------------------------------------------------------------
// DocBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a version 9 document.
///
/// Each `design` call adds one lead with one location holding one design,
/// so design `n` is reported as `lead n, location 0, design 0`.
#[derive(Default)]
pub struct DocBuilder {
    root: Map<String, Value>,
    leads: Vec<Value>,
    poles: Vec<Value>,
}

impl DocBuilder {
    pub fn v9() -> Self {
        Self::default().field("version", 9)
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.root.insert(key.to_string(), value.into());
        self
    }

    pub fn design(mut self, wires: Vec<Value>, equipments: Vec<Value>) -> Self {
        self.leads.push(json!({
            "label": format!("Lead {}", self.leads.len() + 1),
            "locations": [{
                "label": "Location 1",
                "designs": [{
                    "label": "Measured Design",
                    "structure": { "wires": wires, "equipments": equipments },
                }],
            }],
        }));
        self
    }

    pub fn pole(mut self, pole: Value) -> Self {
        self.poles.push(pole);
        self
    }

    pub fn build(self) -> Value {
        let mut root = self.root;
        if !self.leads.is_empty() {
            root.insert("leads".to_string(), Value::Array(self.leads));
        }
        if !self.poles.is_empty() {
            root.insert("poles".to_string(), Value::Array(self.poles));
        }
        Value::Object(root)
    }
}

/// Every wire collection in a migrated document: design wires first, then
/// pole wires.
pub fn all_wire_collections(doc: &Value) -> Vec<&Vec<Value>> {
    let mut out = Vec::new();
    for lead in doc["leads"].as_array().into_iter().flatten() {
        for location in lead["locations"].as_array().into_iter().flatten() {
            for design in location["designs"].as_array().into_iter().flatten() {
                if let Some(wires) = design["structure"]["wires"].as_array() {
                    out.push(wires);
                }
            }
        }
    }
    for pole in doc["poles"].as_array().into_iter().flatten() {
        if let Some(wires) = pole["wires"].as_array() {
            out.push(wires);
        }
    }
    out
}

/// Every wire in a migrated document.
pub fn all_wires(doc: &Value) -> Vec<&Value> {
    all_wire_collections(doc).into_iter().flatten().collect()
}
