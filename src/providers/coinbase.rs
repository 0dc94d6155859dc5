use super::util::with_retry;
use crate::core::{Chain, PriceFetcher, PriceMap, Tickers};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Fetches exchange rates from the Coinbase public API.
pub struct CoinbaseProvider {
    base_url: String,
    client: reqwest::Client,
}

impl CoinbaseProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("walletticker/0.1")
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    #[instrument(name = "CoinbaseTickerFetch", skip(self, fiat_codes), fields(chain = %chain))]
    async fn fetch_chain(&self, chain: Chain, fiat_codes: &[String]) -> Result<(Chain, PriceMap)> {
        let currency = chain.ticker_code().to_uppercase();
        let url = format!("{}/v2/exchange-rates?currency={}", self.base_url, currency);
        debug!("Requesting rates from {}", url);

        let response = with_retry(
            || async {
                self.client
                    .get(&url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
            },
            3,
            500,
        )
        .await
        .with_context(|| format!("Failed to fetch rates for {chain}"))?;

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for {chain}"))?;

        let parsed: ExchangeRatesResponse =
            serde_json::from_str(&response_text).with_context(|| {
                format!("Failed to parse rates for {chain}. Response: '{response_text}'")
            })?;

        let prices: PriceMap = fiat_codes
            .iter()
            .filter_map(|code| {
                let code = code.to_uppercase();
                parsed
                    .data
                    .rates
                    .get(&code)
                    .map(|rate| (code, rate.clone()))
            })
            .collect();

        if prices.is_empty() {
            return Err(anyhow!("No supported fiat rates returned for {}", chain));
        }

        debug!(?prices, "Received rates");
        Ok((chain, prices))
    }
}

#[derive(Debug, Deserialize)]
struct ExchangeRatesResponse {
    data: ExchangeRates,
}

#[derive(Debug, Deserialize)]
struct ExchangeRates {
    rates: HashMap<String, String>,
}

#[async_trait]
impl PriceFetcher for CoinbaseProvider {
    async fn fetch(&self, chains: &[Chain], fiat_codes: &[String]) -> Result<Tickers> {
        let results =
            try_join_all(chains.iter().map(|chain| self.fetch_chain(*chain, fiat_codes))).await?;
        Ok(results.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_rates(server: &MockServer, currency: &str, body: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path("/v2/exchange-rates"))
            .and(query_param("currency", currency))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    fn fiat() -> Vec<String> {
        vec!["USD".to_string(), "EUR".to_string(), "GBP".to_string()]
    }

    const BTC_RATES: &str = r#"{"data":{"currency":"BTC","rates":{"USD":"3412.015","EUR":"2992.105","GBP":"2612.025","JPY":"380000"}}}"#;
    const ACM_RATES: &str = r#"{"data":{"currency":"ACM","rates":{"USD":"30.775","EUR":"27.005","GBP":"23.605"}}}"#;

    #[tokio::test]
    async fn test_fetch_tickers() {
        let mock_server = MockServer::start().await;
        mount_rates(&mock_server, "BTC", BTC_RATES, 200).await;
        mount_rates(&mock_server, "ACM", ACM_RATES, 200).await;

        let provider = CoinbaseProvider::new(&mock_server.uri()).unwrap();
        let tickers = provider.fetch(&Chain::ALL, &fiat()).await.unwrap();

        assert_eq!(tickers.len(), 2);
        let btc = &tickers[&Chain::Bitcoin];
        assert_eq!(btc.get("USD").map(String::as_str), Some("3412.015"));
        // Unsupported fiat codes are dropped
        assert!(!btc.contains_key("JPY"));
        assert_eq!(
            tickers[&Chain::Actinium].get("EUR").map(String::as_str),
            Some("27.005")
        );
    }

    #[tokio::test]
    async fn test_fetch_fails_if_any_chain_fails() {
        let mock_server = MockServer::start().await;
        mount_rates(&mock_server, "BTC", BTC_RATES, 200).await;
        mount_rates(&mock_server, "ACM", r#"{"errors":[]}"#, 200).await;

        let provider = CoinbaseProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch(&Chain::ALL, &fiat()).await;

        let error = result.unwrap_err().to_string();
        assert!(error.contains("Failed to parse rates for actinium"), "{error}");
    }

    #[tokio::test]
    async fn test_fetch_without_supported_rates() {
        let mock_server = MockServer::start().await;
        mount_rates(
            &mock_server,
            "BTC",
            r#"{"data":{"currency":"BTC","rates":{"JPY":"380000"}}}"#,
            200,
        )
        .await;

        let provider = CoinbaseProvider::new(&mock_server.uri()).unwrap();
        let result = provider.fetch(&[Chain::Bitcoin], &fiat()).await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "No supported fiat rates returned for bitcoin"
        );
    }
}
