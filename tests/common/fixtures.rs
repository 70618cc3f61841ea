//! Static documents and defaults used across harnesses.
//!
//! Raw exports are kept as text so the preprocessor is exercised exactly as
//! it would be on a file read from disk.

use polemig_core::Defaults;

/// Defaults with only a primary role, matching the small wire scenario.
pub const PRIMARY_ONLY_DEFAULTS: &str = r#"{
  "wire": {
    "primary": {
      "size": "4 CU",
      "conductorProperties": { "diameter": 0.232, "weight": 0.1 }
    }
  }
}"#;

/// Defaults for all three roles in the camelCase JSON layout.
pub const FULL_DEFAULTS: &str = r#"{
  "wire": {
    "primary": {
      "size": "1/0 ACSR",
      "conductorProperties": { "diameter": 0.398, "weight": 0.1452 }
    },
    "neutral": {
      "size": "2 ACSR",
      "conductorProperties": { "diameter": 0.316, "weight": 0.0913 }
    },
    "secondaryOpen": {
      "size": "1/0 AAC",
      "conductorProperties": { "diameter": 0.368, "weight": 0.0992 }
    }
  }
}"#;

pub fn primary_only_defaults() -> Defaults {
    Defaults::from_json_str(PRIMARY_ONLY_DEFAULTS).expect("fixture defaults parse")
}

pub fn full_defaults() -> Defaults {
    Defaults::from_json_str(FULL_DEFAULTS).expect("fixture defaults parse")
}

/// A clean version 9 export with one design and one legacy pole.
pub const CLEAN_V9_EXPORT: &str = r#"{
  "label": "Job 1042",
  "version": 9,
  "schema": "/schema/spidacalc/calc/project.schema",
  "engineVersion": "9.3.1",
  "clientFile": "Utility.client",
  "dateModified": 1700000000000,
  "leads": [
    {
      "label": "Lead 1",
      "locations": [
        {
          "label": "Pole 7",
          "designs": [
            {
              "label": "Measured Design",
              "structure": {
                "equipments": [ { "type": "STREET_LIGHT" } ],
                "wires": [
                  { "id": "W1", "type": "PRIMARY", "connectionId": "C1" },
                  { "id": "W2", "type": "NEUTRAL", "connectionId": "C1" },
                  { "id": "fiber-1", "owner": "Comcast", "connectionId": "C9" }
                ]
              }
            }
          ]
        }
      ]
    }
  ],
  "poles": [
    { "poleHeight": 40, "poleClass": "3", "wires": [ { "type": "SECONDARY_OPEN" } ] }
  ]
}"#;

/// The same export as an exporter that writes `=` for `:` would produce.
pub const MALFORMED_EXPORT: &str = r#"invalid JSON = {
  "label"="Job 7",
  "version"=9,
  "note"="a=b stays",
  "leads"=[]
}"#;

/// Not repairable.
pub const GARBAGE_EXPORT: &str = "{ this is not json at all";
