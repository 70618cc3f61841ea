//! Wire pass.
//!
//! Connection ids are counted over the whole collection first, then each
//! wire goes through these steps in order:
//!
//! 1. connection repair
//! 2. communication classification and bundle substitution
//! 3. `clientItem` sanitation
//! 4. type-based size defaulting
//! 5. owner normalization
//! 6. `usageGroup` defaulting
//! 7. `tensionGroup` defaulting

use serde_json::{json, Map, Value};

use super::classify;
use super::connection::{self, ConnectionCounts};
use super::Site;
use crate::catalog::{self, BUNDLE_CONDUCTOR_DIAMETER, BUNDLE_CONDUCTOR_WEIGHT};
use crate::changes::ChangeLog;
use crate::config::{Defaults, WireDefaults, WireRoleDefaults};
use crate::types::{
    is_set, str_field, Owner, WireType, DEFAULT_OWNER_ID, DEFAULT_TENSION_GROUP, INDUSTRY_COMMUNICATION,
    INDUSTRY_UTILITY, STATIC_CALCULATION, USAGE_COMMUNICATION,
};

/// `clientItem` keys valid upstream but rejected by target validation.
pub const REJECTED_CLIENT_ITEM_KEYS: &[&str] =
    &["type", "autoCalculateDiameter", "group", "messenger", "bundleComponents"];

/// Strand counts written alongside a defaulted size.
const DEFAULT_CORE_STRANDS: u32 = 1;
const DEFAULT_CONDUCTOR_STRANDS: u32 = 6;

/// A wire's position, for change descriptions.
#[derive(Debug, Clone, Copy)]
struct WireAt {
    site: Site,
    index: usize,
}

impl std::fmt::Display for WireAt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wire {} at {}", self.index, self.site)
    }
}

pub fn normalize_wires(wires: &mut [Value], site: Site, defaults: &Defaults, log: &mut ChangeLog) {
    let counts = ConnectionCounts::count(wires);

    for (index, wire) in wires.iter_mut().enumerate() {
        let Some(wire) = wire.as_object_mut() else { continue };
        let at = WireAt { site, index };

        repair_connection(wire, at, &counts, log);
        bundle_communication(wire, at, log);
        sanitize_client_item(wire, at, log);
        default_size(wire, at, &defaults.wire, log);
        normalize_owner(wire, at, log);
        default_usage_group(wire, at, log);
        default_tension_group(wire, at, log);
    }
}

fn repair_connection(wire: &mut Map<String, Value>, at: WireAt, counts: &ConnectionCounts, log: &mut ChangeLog) {
    if let Some((old, new)) = connection::repair(wire, at.index, counts) {
        log.record(format!("Fixed single wire connection: changed ID {old} to {new} for {at}"));
    }
}

fn bundle_communication(wire: &mut Map<String, Value>, at: WireAt, log: &mut ChangeLog) {
    let Some(rule) = classify::matching_rule(wire) else {
        return;
    };
    tracing::debug!(wire = %at, field = rule.field.name(), "classified as communication");
    let carrier = classify::carrier(wire);
    let bundle = catalog::bundle(carrier);
    let template = catalog::template(bundle.messenger.size);

    wire.insert("usageGroup".to_string(), Value::from(USAGE_COMMUNICATION));
    wire.insert("size".to_string(), Value::from(template.size));
    wire.insert("coreStrands".to_string(), Value::from(template.core_strands));
    wire.insert("conductorStrands".to_string(), Value::from(template.conductor_strands));
    wire.insert("calculation".to_string(), Value::from(template.calculation));
    if !is_set(wire.get("conductorProperties")) {
        wire.insert(
            "conductorProperties".to_string(),
            json!({ "diameter": BUNDLE_CONDUCTOR_DIAMETER, "weight": BUNDLE_CONDUCTOR_WEIGHT }),
        );
    }

    log.record(format!(
        "Converted communication {at} to properly referenced wire for {carrier} ({})",
        bundle.group
    ));
}

fn sanitize_client_item(wire: &mut Map<String, Value>, at: WireAt, log: &mut ChangeLog) {
    if !is_set(wire.get("clientItem")) {
        return;
    }
    if let Some(Value::Object(item)) = wire.get_mut("clientItem") {
        for key in REJECTED_CLIENT_ITEM_KEYS {
            item.shift_remove(*key);
        }
    }
    log.record(format!("Removed schema-violating properties from {at} clientItem"));
}

fn role_defaults(defaults: &WireDefaults, ty: WireType) -> Option<&WireRoleDefaults> {
    match ty {
        WireType::Primary => defaults.primary.as_ref(),
        WireType::Neutral => defaults.neutral.as_ref(),
        WireType::SecondaryOpen => defaults.secondary_open.as_ref(),
        WireType::Other => None,
    }
}

fn default_size(wire: &mut Map<String, Value>, at: WireAt, defaults: &WireDefaults, log: &mut ChangeLog) {
    let ty = WireType::of(wire);
    if ty == WireType::Other || is_set(wire.get("size")) {
        return;
    }
    let Some(role) = role_defaults(defaults, ty) else {
        tracing::warn!(wire = %at, role = %ty, "no caller defaults for wire role; size left blank");
        return;
    };

    wire.insert("size".to_string(), Value::from(role.size.as_str()));
    wire.insert("coreStrands".to_string(), Value::from(DEFAULT_CORE_STRANDS));
    wire.insert("conductorStrands".to_string(), Value::from(DEFAULT_CONDUCTOR_STRANDS));
    wire.insert("calculation".to_string(), Value::from(STATIC_CALCULATION));
    if !is_set(wire.get("conductorProperties")) {
        let props = role.conductor_properties;
        wire.insert(
            "conductorProperties".to_string(),
            json!({ "diameter": props.diameter, "weight": props.weight }),
        );
    }

    log.record(format!("Added {ty} wire size \"{}\" to {at}", role.size));
}

fn normalize_owner(wire: &mut Map<String, Value>, at: WireAt, log: &mut ChangeLog) {
    match Owner::of(wire) {
        Owner::Absent => {
            wire.insert("owner".to_string(), owner(DEFAULT_OWNER_ID, INDUSTRY_UTILITY));
            log.record(format!("Added default owner to {at}"));
        }
        Owner::Legacy(id) => {
            let structured = owner(id, INDUSTRY_UTILITY);
            wire.insert("owner".to_string(), structured);
            log.record(format!("Converted string owner to object format for {at}"));
        }
        Owner::Unrecognised => {
            wire.insert("owner".to_string(), owner(DEFAULT_OWNER_ID, INDUSTRY_UTILITY));
            log.record(format!("Replaced unrecognised owner with default owner for {at}"));
        }
        Owner::Structured { industry: Some(i), .. } if !i.is_empty() => {}
        Owner::Structured { .. } => {
            let industry = if classify::is_communication(wire) {
                INDUSTRY_COMMUNICATION
            } else {
                INDUSTRY_UTILITY
            };
            if let Some(Value::Object(o)) = wire.get_mut("owner") {
                o.insert("industry".to_string(), Value::from(industry));
            }
            log.record(format!("Added owner industry {industry} to {at}"));
        }
    }
}

fn owner(id: &str, industry: &str) -> Value {
    json!({ "id": id, "industry": industry })
}

fn default_usage_group(wire: &mut Map<String, Value>, at: WireAt, log: &mut ChangeLog) {
    if is_set(wire.get("usageGroup")) {
        return;
    }
    let group = if classify::is_communication(wire) {
        USAGE_COMMUNICATION.to_string()
    } else {
        str_field(wire, "type")
            .filter(|t| !t.is_empty())
            .unwrap_or("PRIMARY")
            .to_lowercase()
    };
    wire.insert("usageGroup".to_string(), Value::from(group));
    log.record(format!("Added usage group to {at}"));
}

fn default_tension_group(wire: &mut Map<String, Value>, at: WireAt, log: &mut ChangeLog) {
    if is_set(wire.get("tensionGroup")) {
        return;
    }
    wire.insert("tensionGroup".to_string(), Value::from(DEFAULT_TENSION_GROUP));
    log.record(format!("Added tension group to {at}"));
}
