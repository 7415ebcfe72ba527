use std::collections::BTreeMap;

use serde::Deserialize;

/// The slice of a Docker Compose file this tool cares about. Everything
/// outside the `services` mapping (version, networks, volumes, x-*
/// extensions) is ignored so newer compose schemas keep parsing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComposeDocument {
    #[serde(default)]
    pub services: BTreeMap<String, ServiceSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceSpec {
    #[serde(default)]
    pub image: String,
}

impl ComposeDocument {
    pub fn parse(raw: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(raw)
    }
}
