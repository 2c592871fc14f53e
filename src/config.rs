use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a board store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Storage slot the board snapshot lives under
    pub storage_key: String,
    /// Project assigned to drafts that don't name one
    pub default_project: String,
    /// Prefix for sequentially generated task ids
    pub id_prefix: String,
}

impl StoreConfig {
    pub const CONFIG_FILE: &'static str = "config.toml";

    /// Parses a TOML document; omitted keys keep their defaults
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads `config.toml` from `dir`, or the defaults if there is none
    pub async fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(Self::CONFIG_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: "command-center-tasks".to_string(),
            default_project: "Solar Funnel".to_string(),
            id_prefix: "t-".to_string(),
        }
    }
}
