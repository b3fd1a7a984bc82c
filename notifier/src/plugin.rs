//! Plugin manifest
//!
//! Identity, required host capabilities and configuration schema of the
//! notifier, as published on `GET /plugin`.

use serde::Serialize;

use crate::app::CommandInfo;

pub const PLUGIN_NAME: &str = "weekly-epic-freegame";

/// Host capabilities the notifier depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Cron,
    Renderer,
}

pub const USING: [Capability; 2] = [Capability::Cron, Capability::Renderer];

/// One configuration key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaField {
    pub key: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Configuration schema. `cron_time` and `group_id` are listed as required,
/// but an empty value only disables the scheduled push.
pub fn config_schema() -> Vec<SchemaField> {
    vec![
        SchemaField {
            key: "api_url",
            kind: "string",
            required: true,
            description: "Epic free-game API URL, e.g. https://60s.123213.xyz/v2/epic",
        },
        SchemaField {
            key: "cron_time",
            kind: "string",
            required: true,
            description: "Crontab expression for the scheduled push",
        },
        SchemaField {
            key: "group_id",
            kind: "string",
            required: true,
            description: "Group receiving the scheduled push",
        },
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct PluginManifest {
    pub name: &'static str,
    pub using: Vec<Capability>,
    pub schema: Vec<SchemaField>,
    pub commands: Vec<CommandInfo>,
}

impl PluginManifest {
    pub fn new(commands: Vec<CommandInfo>) -> Self {
        Self {
            name: PLUGIN_NAME,
            using: USING.to_vec(),
            schema: config_schema(),
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_serializes_schema() {
        let manifest = PluginManifest::new(Vec::new());

        let json = serde_json::to_value(&manifest).unwrap();

        assert_eq!(json["name"], PLUGIN_NAME);
        assert_eq!(json["using"], serde_json::json!(["cron", "renderer"]));
        assert_eq!(json["schema"][0]["key"], "api_url");
        assert_eq!(json["schema"][0]["type"], "string");
        assert_eq!(json["schema"].as_array().unwrap().len(), 3);
    }
}
