//! Settings persistence abstraction

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the user's fiat currency is stored.
pub const FIAT_TICKER_KEY: &str = "fiatTicker";

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<Value>;
    async fn put(&self, key: &str, value: Value) -> Result<()>;
}

/// Per-chain settings stored under `chain.<id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Fields written by other parts of the wallet, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChainSettings {
    /// Reads chain settings, treating anything unreadable as empty.
    pub fn from_value(value: Option<Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
