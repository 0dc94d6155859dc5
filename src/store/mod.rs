pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::settings::SettingsStore;
use disk::DiskSettings;
use memory::MemorySettings;
use std::sync::Arc;
use tracing::warn;

/// Opens the on-disk settings store, falling back to memory if it is unavailable.
pub fn open_settings(config: &AppConfig) -> Arc<dyn SettingsStore> {
    let disk = config
        .default_data_path()
        .and_then(|path| DiskSettings::open(&path.join("settings")));

    match disk {
        Ok(settings) => Arc::new(settings),
        Err(e) => {
            warn!(error = %e, "Settings will not be persisted");
            Arc::new(MemorySettings::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_settings_uses_data_path() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            data_path: Some(dir.path().to_string_lossy().to_string()),
            ..AppConfig::default()
        };

        let settings = open_settings(&config);
        settings.put("fiatTicker", json!("EUR")).await.unwrap();
        assert!(dir.path().join("settings").exists());
    }
}
