//! Pricing abstractions and core types

use super::chain::Chain;
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use thiserror::Error;

/// Fiat code to decimal price string, e.g. `{"EUR": "27.005"}`.
pub type PriceMap = BTreeMap<String, String>;

/// Price maps for each fetched chain.
pub type Tickers = HashMap<Chain, PriceMap>;

/// Parses the price for `fiat` out of a price map.
pub fn price_as_decimal(prices: &PriceMap, fiat: &str) -> Option<Decimal> {
    prices
        .get(&fiat.to_uppercase())
        .and_then(|p| Decimal::from_str(p).ok())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceFetchError {
    #[error("Price request failed: {0}")]
    Transport(String),

    #[error("No prices returned for {0}")]
    EmptyResponse(Chain),
}

#[async_trait]
pub trait PriceFetcher: Send + Sync {
    /// Fetches the ticker of every chain in `chains`, priced in `fiat_codes`.
    async fn fetch(&self, chains: &[Chain], fiat_codes: &[String]) -> Result<Tickers>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_as_decimal() {
        let mut prices = PriceMap::new();
        prices.insert("EUR".to_string(), "27.005".to_string());
        prices.insert("USD".to_string(), "not-a-number".to_string());

        assert_eq!(
            price_as_decimal(&prices, "eur"),
            Some(Decimal::from_str("27.005").unwrap())
        );
        assert!(price_as_decimal(&prices, "USD").is_none());
        assert!(price_as_decimal(&prices, "GBP").is_none());
    }
}
