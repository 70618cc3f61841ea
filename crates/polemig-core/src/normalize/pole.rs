//! Legacy top-level poles.
//!
//! Poles predate the lead/location/design hierarchy. Besides the usual
//! equipment and wire passes they need an `id`, a `structure` object and a
//! `wires` array. Their wires live on the pole itself, their equipment under
//! `structure`.

use serde_json::{json, Map, Value};

use super::{array_mut, equipment, wire, Site};
use crate::changes::ChangeLog;
use crate::config::Defaults;
use crate::types::is_set;

/// Flat legacy pole field → field under `structure.pole`.
pub const POLE_FIELD_MOVES: &[(&str, &str)] = &[
    ("poleHeight", "height"),
    ("poleClass", "poleClass"),
    ("species", "species"),
    ("yearManufactured", "yearManufactured"),
];

pub fn normalize_pole(pole: &mut Map<String, Value>, index: usize, defaults: &Defaults, log: &mut ChangeLog) {
    let site = Site::Pole(index);

    if !is_set(pole.get("id")) {
        pole.insert("id".to_string(), Value::from(format!("pole-{}", index + 1)));
        log.record(format!("Added ID to pole {index}"));
    }

    if !is_set(pole.get("structure")) {
        let structure = synthesize_structure(pole);
        pole.insert("structure".to_string(), structure);
        log.record(format!("Added structure object to pole {index}"));
    }

    if let Some(equipments) = pole
        .get_mut("structure")
        .and_then(Value::as_object_mut)
        .and_then(|s| array_mut(s, "equipments"))
    {
        equipment::normalize_equipments(equipments, site, log);
    }

    if let Some(wires) = array_mut(pole, "wires") {
        wire::normalize_wires(wires, site, defaults, log);
    }

    if !is_set(pole.get("wires")) {
        pole.insert("wires".to_string(), Value::Array(Vec::new()));
        log.record(format!("Created empty wires array for pole {index}"));
    }
}

/// A ground-line-clearance stub carrying the pole's flat legacy fields.
fn synthesize_structure(pole: &Map<String, Value>) -> Value {
    let mut inner = Map::new();
    inner.insert("glc".to_string(), json!({ "distance": 0, "unit": "FOOT" }));
    for &(legacy, field) in POLE_FIELD_MOVES {
        if let Some(v) = pole.get(legacy) {
            inner.insert(field.to_string(), v.clone());
        }
    }
    json!({ "pole": inner })
}
