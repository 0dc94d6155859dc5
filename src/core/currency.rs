//! Display units and the per-chain currency filters

use super::chain::Chain;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fiat currencies the price fetcher asks for by default.
pub const DEFAULT_FIAT_TICKERS: [&str; 3] = ["USD", "EUR", "GBP"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFilterEntry {
    pub key: String,
    pub name: String,
}

impl CurrencyFilterEntry {
    pub fn new(key: &str, name: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
        }
    }
}

pub type CurrencyFilters = HashMap<Chain, Vec<CurrencyFilterEntry>>;

/// Units known for each chain. The first entry is the chain's canonical unit.
pub fn default_currency_filters() -> CurrencyFilters {
    let mut filters = HashMap::new();
    filters.insert(
        Chain::Bitcoin,
        vec![
            CurrencyFilterEntry::new("btc", "BTC"),
            CurrencyFilterEntry::new("bits", "bits"),
            CurrencyFilterEntry::new("sats", "satoshis"),
        ],
    );
    filters.insert(
        Chain::Actinium,
        vec![
            CurrencyFilterEntry::new("acm", "ACM"),
            CurrencyFilterEntry::new("atoms", "atoms"),
            CurrencyFilterEntry::new("sats", "satoshis"),
        ],
    );
    filters
}

/// Network the wallet backend reports for the active chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub chain: Chain,
    pub network: String,
    #[serde(default)]
    pub unit_prefix: Option<String>,
}

impl NetworkInfo {
    /// Builds network info, deriving the `t` prefix for non-mainnet networks.
    pub fn for_network(chain: Chain, network: &str) -> Self {
        let unit_prefix = match network {
            "mainnet" => None,
            _ => Some("t".to_string()),
        };
        Self {
            chain,
            network: network.to_string(),
            unit_prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_unit_first() {
        let filters = default_currency_filters();
        assert_eq!(filters[&Chain::Bitcoin][0].key, "btc");
        assert_eq!(filters[&Chain::Actinium][0].name, "ACM");
        assert_eq!(filters[&Chain::Actinium].len(), 3);
    }

    #[test]
    fn test_network_prefix() {
        assert_eq!(
            NetworkInfo::for_network(Chain::Bitcoin, "mainnet").unit_prefix,
            None
        );
        assert_eq!(
            NetworkInfo::for_network(Chain::Bitcoin, "testnet")
                .unit_prefix
                .as_deref(),
            Some("t")
        );
    }
}
