use crate::core::settings::SettingsStore;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory settings, lost when the process exits.
#[derive(Clone, Default)]
pub struct MemorySettings {
    inner: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn get(&self, key: &str) -> Option<Value> {
        let settings = self.inner.lock().await;
        let value = settings.get(key).cloned();
        debug!(key, found = value.is_some(), "Settings GET");
        value
    }

    async fn put(&self, key: &str, value: Value) -> Result<()> {
        let mut settings = self.inner.lock().await;
        debug!(key, "Settings PUT");
        settings.insert(key.to_string(), value);
        Ok(())
    }
}
