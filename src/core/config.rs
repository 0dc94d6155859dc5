use super::chain::Chain;
use super::currency::DEFAULT_FIAT_TICKERS;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const COINBASE_BASE_URL: &str = "https://api.coinbase.com";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CoinbaseProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub coinbase: Option<CoinbaseProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            coinbase: Some(CoinbaseProviderConfig {
                base_url: COINBASE_BASE_URL.to_string(),
            }),
        }
    }
}

fn default_fiat_tickers() -> Vec<String> {
    DEFAULT_FIAT_TICKERS.iter().map(|c| c.to_string()).collect()
}

fn default_units() -> HashMap<Chain, String> {
    HashMap::from([
        (Chain::Bitcoin, "sats".to_string()),
        (Chain::Actinium, "atoms".to_string()),
    ])
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_fiat_tickers")]
    pub fiat_tickers: Vec<String>,
    #[serde(default = "default_units")]
    pub default_units: HashMap<Chain, String>,
    /// Overrides the locale derived fiat currency.
    pub currency: Option<String>,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            providers: ProvidersConfig::default(),
            fiat_tickers: default_fiat_tickers(),
            default_units: default_units(),
            currency: None,
            data_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults when it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "walletticker", "walletticker")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("org", "walletticker", "walletticker")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn coinbase_base_url(&self) -> &str {
        self.providers
            .coinbase
            .as_ref()
            .map_or(COINBASE_BASE_URL, |p| &p.base_url)
    }

    /// Unit a chain falls back to when nothing is persisted.
    pub fn default_unit(&self, chain: Chain) -> String {
        self.default_units
            .get(&chain)
            .cloned()
            .unwrap_or_else(|| chain.ticker_code().to_string())
    }
}
