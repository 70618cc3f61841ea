//! Structural Normalizer: per-structure repairs below the document root.
//!
//! Two independent traversal roots carry `equipments` and `wires`:
//!
//! - `leads[*].locations[*].designs[*].structure` (`structure.equipments`,
//!   `structure.wires`)
//! - legacy top-level `poles[*]` (`pole.structure.equipments`, `pole.wires`)
//!
//! Leads are walked before poles. Within a structure the equipment pass runs
//! before the wire pass; see [`wire`] for the per-wire step order.

pub mod classify;
pub mod connection;
pub mod equipment;
pub mod pole;
pub mod wire;

use serde_json::{Map, Value};

use crate::changes::ChangeLog;
use crate::config::Defaults;

/// Where a collection lives, for change descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Design {
        lead: usize,
        location: usize,
        design: usize,
    },
    Pole(usize),
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Site::Design {
                lead,
                location,
                design,
            } => write!(f, "lead {lead}, location {location}, design {design}"),
            Site::Pole(pole) => write!(f, "pole {pole}"),
        }
    }
}

/// Normalize every structure reachable from `doc`.
pub fn normalize(doc: &mut Value, defaults: &Defaults, log: &mut ChangeLog) {
    let Some(root) = doc.as_object_mut() else { return };

    if let Some(leads) = array_mut(root, "leads") {
        for (li, lead) in leads.iter_mut().enumerate() {
            let Some(locations) = lead.as_object_mut().and_then(|l| array_mut(l, "locations")) else {
                continue;
            };
            for (oi, location) in locations.iter_mut().enumerate() {
                let Some(designs) = location.as_object_mut().and_then(|l| array_mut(l, "designs")) else {
                    continue;
                };
                for (di, design) in designs.iter_mut().enumerate() {
                    let site = Site::Design {
                        lead: li,
                        location: oi,
                        design: di,
                    };
                    if let Some(structure) = design
                        .as_object_mut()
                        .and_then(|d| d.get_mut("structure"))
                        .and_then(Value::as_object_mut)
                    {
                        normalize_structure(structure, site, defaults, log);
                    }
                }
            }
        }
    }

    if let Some(poles) = array_mut(root, "poles") {
        for (pi, pole) in poles.iter_mut().enumerate() {
            if let Some(pole) = pole.as_object_mut() {
                pole::normalize_pole(pole, pi, defaults, log);
            }
        }
    }
}

/// Equipment pass then wire pass over a design structure.
fn normalize_structure(
    structure: &mut Map<String, Value>,
    site: Site,
    defaults: &Defaults,
    log: &mut ChangeLog,
) {
    if let Some(equipments) = array_mut(structure, "equipments") {
        equipment::normalize_equipments(equipments, site, log);
    }
    if let Some(wires) = array_mut(structure, "wires") {
        wire::normalize_wires(wires, site, defaults, log);
    }
}

pub(crate) fn array_mut<'a>(obj: &'a mut Map<String, Value>, key: &str) -> Option<&'a mut Vec<Value>> {
    obj.get_mut(key).and_then(Value::as_array_mut)
}
