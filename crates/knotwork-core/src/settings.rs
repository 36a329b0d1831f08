use crate::{Error, Result};
use knotwork_layout::LayoutOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
        }
    }
}

/// Store-wide defaults. Every field has a default, so override documents may be partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub layout: LayoutOptions,
    /// Area new nodes are dropped into when no position is given.
    pub canvas: CanvasBounds,
    pub resize_step: f64,
    pub min_node_size: f64,
    pub default_edge_color: String,
    pub default_edge_weight: f64,
    pub paste_offset: f64,
    pub group_colors: Vec<String>,
    /// Fixes the RNG used for random placement (tests, reproducible sessions).
    pub random_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            canvas: CanvasBounds::default(),
            resize_step: 10.0,
            min_node_size: 10.0,
            default_edge_color: "#b1b1b7".to_string(),
            default_edge_weight: 1.0,
            paste_offset: 20.0,
            group_colors: vec![
                "#f5d0a9".to_string(),
                "#a9d0f5".to_string(),
                "#d0f5a9".to_string(),
                "#f5a9d0".to_string(),
            ],
            random_seed: None,
        }
    }
}

impl Settings {
    /// Merges `overrides` onto the defaults, object by object.
    pub fn from_value(overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(Settings::default()).map_err(settings_error)?;
        deep_merge_value(&mut base, overrides);
        serde_json::from_value(base).map_err(settings_error)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(settings_error)?;
        Self::from_value(&value)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text).map_err(settings_error)?;
        Self::from_value(&value)
    }
}

fn settings_error(err: impl std::fmt::Display) -> Error {
    Error::Settings {
        message: err.to_string(),
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
