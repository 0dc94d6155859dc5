//! Supported chains

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Bitcoin,
    Actinium,
}

impl Chain {
    pub const ALL: [Chain; 2] = [Chain::Bitcoin, Chain::Actinium];

    /// Lowercase identifier used in settings keys and IPC events.
    pub fn id(&self) -> &'static str {
        match self {
            Chain::Bitcoin => "bitcoin",
            Chain::Actinium => "actinium",
        }
    }

    /// Human readable name, e.g. `Bitcoin`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Chain::Bitcoin => "Bitcoin",
            Chain::Actinium => "Actinium",
        }
    }

    /// Code the pricing API knows this chain by.
    pub fn ticker_code(&self) -> &'static str {
        match self {
            Chain::Bitcoin => "btc",
            Chain::Actinium => "acm",
        }
    }

    pub fn settings_key(&self) -> String {
        format!("chain.{}", self.id())
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Chain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bitcoin" | "btc" => Ok(Chain::Bitcoin),
            "actinium" | "acm" => Ok(Chain::Actinium),
            _ => Err(anyhow::anyhow!("Unsupported chain: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chain() {
        assert_eq!("bitcoin".parse::<Chain>().unwrap(), Chain::Bitcoin);
        assert_eq!("Actinium".parse::<Chain>().unwrap(), Chain::Actinium);
        assert_eq!("acm".parse::<Chain>().unwrap(), Chain::Actinium);
        assert!("litecoin".parse::<Chain>().is_err());
    }

    #[test]
    fn test_chain_names() {
        assert_eq!(Chain::Bitcoin.to_string(), "bitcoin");
        assert_eq!(Chain::Actinium.display_name(), "Actinium");
        assert_eq!(Chain::Actinium.ticker_code(), "acm");
        assert_eq!(Chain::Bitcoin.settings_key(), "chain.bitcoin");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Chain::Actinium).unwrap();
        assert_eq!(json, "\"actinium\"");
        let chain: Chain = serde_json::from_str("\"bitcoin\"").unwrap();
        assert_eq!(chain, Chain::Bitcoin);
    }
}
