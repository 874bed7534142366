use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Construction settings for an [`InMemoryDrive`](crate::InMemoryDrive).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Id of the root folder. Allocated from the counter when `None`.
    pub root_id: Option<String>,
    /// Name of the root folder.
    pub root_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root_id: None,
            root_name: "root".to_string(),
        }
    }
}

impl StoreConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(raw: &str) -> StoreResult<Self> {
        toml::from_str(raw).map_err(|e| StoreError::Config(e.to_string()))
    }
}
