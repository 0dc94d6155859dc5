use crate::core::settings::SettingsStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

const SETTINGS_PARTITION: &str = "settings";

/// Settings persisted in a fjall partition, values stored as JSON.
pub struct DiskSettings {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskSettings {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open settings store at {}", path.display()))?;
        let partition = keyspace
            .open_partition(SETTINGS_PARTITION, PartitionCreateOptions::default())
            .context("Failed to open settings partition")?;

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

#[async_trait]
impl SettingsStore for DiskSettings {
    async fn get(&self, key: &str) -> Option<Value> {
        let res: Result<Option<Value>> = (|| {
            match self.partition.get(key.as_bytes())? {
                Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
                None => Ok(None),
            }
        })();

        match res {
            Ok(value) => {
                debug!(key, found = value.is_some(), "Settings GET");
                value
            }
            Err(e) => {
                debug!("DiskSettings get error for {}: {}", key, e);
                None
            }
        }
    }

    async fn put(&self, key: &str, value: Value) -> Result<()> {
        let bytes = serde_json::to_vec(&value)?;
        self.partition
            .insert(key.as_bytes(), bytes)
            .with_context(|| format!("Failed to write setting {key}"))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist settings")?;
        debug!(key, "Settings PUT");
        Ok(())
    }
}
