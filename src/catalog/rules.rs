//! Layered resolution of per-directory manifest properties.

use serde_json::{Map, Value};

use crate::config::RuleSet;
use crate::pattern::{Matches, PatternSet};

/// Resolve the manifest document skeleton for one directory node.
///
/// The document starts from the configured `info` block, taken verbatim, or
/// from the generated default header. A `properties` object is then combined
/// from three layers applied in a fixed order: `base`, `devices` rules whose
/// classifier equals the first variant's device type, and `custom` rules
/// whose patterns match the node's own name. Later writes of a key win, so a
/// matching custom rule always overrides a device rule regardless of where
/// either is declared. When no layer contributes anything the `properties`
/// key is omitted entirely.
pub fn contents_for(
    rules: &RuleSet,
    node_name: &str,
    first_variant_device: Option<&str>,
) -> Map<String, Value> {
    let mut contents = rules.info.clone().unwrap_or_else(default_info);

    let mut combined = Map::new();

    if let Some(base) = &rules.base {
        for (key, value) in base {
            combined.insert(key.clone(), value.clone());
        }
    }

    for device in &rules.devices {
        let applies = match (&device.device_type, first_variant_device) {
            (Some(device_type), Some(variant_device)) => device_type == variant_device,
            _ => false,
        };

        if applies {
            for (key, value) in &device.properties {
                combined.insert(key.clone(), value.clone());
            }
        }
    }

    for custom in &rules.custom {
        if PatternSet::new(&custom.patterns).matches(node_name) {
            for (key, value) in &custom.properties {
                combined.insert(key.clone(), value.clone());
            }
        }
    }

    if !combined.is_empty() {
        contents.insert("properties".to_string(), Value::Object(combined));
    }

    contents
}

fn default_info() -> Map<String, Value> {
    let mut info = Map::new();
    info.insert("version".to_string(), Value::from(1));
    info.insert("author".to_string(), Value::from("xcode"));

    let mut contents = Map::new();
    contents.insert("info".to_string(), Value::Object(info));
    contents
}
