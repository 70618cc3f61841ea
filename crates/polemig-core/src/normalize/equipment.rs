//! Equipment pass: every equipment gets a `clientItem` carrying a `type`.

use serde_json::{Map, Value};

use super::Site;
use crate::changes::ChangeLog;
use crate::types::is_set;

pub const FALLBACK_EQUIPMENT_TYPE: &str = "EQUIPMENT";

pub fn normalize_equipments(equipments: &mut [Value], site: Site, log: &mut ChangeLog) {
    for (index, equipment) in equipments.iter_mut().enumerate() {
        if let Some(equipment) = equipment.as_object_mut() {
            normalize_equipment(equipment, index, site, log);
        }
    }
}

fn normalize_equipment(equipment: &mut Map<String, Value>, index: usize, site: Site, log: &mut ChangeLog) {
    let fallback_type = equipment
        .get("type")
        .filter(|t| is_set(Some(*t)))
        .cloned()
        .unwrap_or_else(|| Value::from(FALLBACK_EQUIPMENT_TYPE));

    if !matches!(equipment.get("clientItem"), Some(Value::Object(_))) {
        equipment.insert("clientItem".to_string(), Value::Object(Map::new()));
        log.record(format!("Added clientItem object to {site}, equipment {index}"));
    }

    let Some(Value::Object(client_item)) = equipment.get_mut("clientItem") else {
        return;
    };
    if !is_set(client_item.get("type")) {
        client_item.insert("type".to_string(), fallback_type);
        log.record(format!("Added missing type to clientItem for {site}, equipment {index}"));
    }
}
