//! Events arriving from the host application and the loop that applies them in order.

use super::pipeline::TickerPipeline;
use crate::core::{Chain, NetworkInfo};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TickerEvent {
    ReceiveCryptocurrency { chain: Chain },
    SetCurrency { unit: String },
    SetFiatTicker { fiat_ticker: String },
    ReceiveInfo { chain: Chain, network: String },
    InitTickers,
    FetchTickers,
}

impl TickerEvent {
    /// Parses an IPC message such as `{"type":"receive_cryptocurrency","chain":"bitcoin"}`.
    pub fn from_json(message: &str) -> Result<Self> {
        serde_json::from_str(message)
            .with_context(|| format!("Invalid ticker event: '{message}'"))
    }
}

/// Applies `event` to the pipeline. Price fetch failures are logged, not returned.
pub async fn handle_event(pipeline: &mut TickerPipeline, event: TickerEvent) {
    debug!(?event, "Handling ticker event");
    match event {
        TickerEvent::ReceiveCryptocurrency { chain } => {
            pipeline.receive_cryptocurrency(chain).await;
        }
        TickerEvent::SetCurrency { unit } => {
            if let Err(e) = pipeline.set_currency(&unit).await {
                warn!(error = %e, "Ignoring unit change");
            }
        }
        TickerEvent::SetFiatTicker { fiat_ticker } => pipeline.set_fiat_ticker(&fiat_ticker).await,
        TickerEvent::ReceiveInfo { chain, network } => {
            pipeline.receive_network_info(NetworkInfo::for_network(chain, &network));
        }
        TickerEvent::InitTickers => {
            if let Err(e) = pipeline.init_tickers().await {
                warn!(error = %e, "Initial ticker load failed");
            }
        }
        TickerEvent::FetchTickers => {
            if let Err(e) = pipeline.load_prices().await {
                warn!(error = %e, "Ticker refresh failed");
            }
        }
    }
}

/// Drains `events` one at a time until every sender is dropped, then hands the pipeline back.
pub async fn run_event_loop(
    mut pipeline: TickerPipeline,
    mut events: mpsc::Receiver<TickerEvent>,
) -> TickerPipeline {
    while let Some(event) = events.recv().await {
        handle_event(&mut pipeline, event).await;
    }
    debug!("Ticker event channel closed");
    pipeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;
    use crate::core::locale::FixedLocale;
    use crate::core::{PriceFetcher, PriceMap, Tickers};
    use crate::store::memory::MemorySettings;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StaticFetcher;

    #[async_trait]
    impl PriceFetcher for StaticFetcher {
        async fn fetch(&self, chains: &[Chain], _fiat_codes: &[String]) -> Result<Tickers> {
            Ok(chains
                .iter()
                .map(|chain| {
                    let price = PriceMap::from([("USD".to_string(), "1.5".to_string())]);
                    (*chain, price)
                })
                .collect())
        }
    }

    fn pipeline() -> TickerPipeline {
        TickerPipeline::new(
            AppConfig::default(),
            Arc::new(MemorySettings::new()),
            Arc::new(StaticFetcher),
            &FixedLocale("USD".to_string()),
        )
    }

    #[test]
    fn test_parse_events() {
        assert_eq!(
            TickerEvent::from_json(r#"{"type":"receive_cryptocurrency","chain":"actinium"}"#)
                .unwrap(),
            TickerEvent::ReceiveCryptocurrency {
                chain: Chain::Actinium
            }
        );
        assert_eq!(
            TickerEvent::from_json(r#"{"type":"fetch_tickers"}"#).unwrap(),
            TickerEvent::FetchTickers
        );

        let err = TickerEvent::from_json(r#"{"type":"receive_cryptocurrency","chain":"doge"}"#)
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid ticker event"));
    }

    #[tokio::test]
    async fn test_event_loop_applies_in_order() {
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(run_event_loop(pipeline(), rx));

        for event in [
            TickerEvent::ReceiveInfo {
                chain: Chain::Bitcoin,
                network: "testnet".to_string(),
            },
            TickerEvent::ReceiveCryptocurrency {
                chain: Chain::Bitcoin,
            },
            TickerEvent::SetCurrency {
                unit: "btc".to_string(),
            },
            TickerEvent::FetchTickers,
        ] {
            tx.send(event).await.unwrap();
        }
        drop(tx);

        let pipeline = handle.await.unwrap();
        assert_eq!(pipeline.canonical_unit_name(), "tBTC");
        assert_eq!(pipeline.display_name_for_unit().as_deref(), Some("tBTC"));
        assert_eq!(
            pipeline.state().previous_currency_unit.as_deref(),
            Some("sats")
        );
        assert!(!pipeline.is_loading());
        assert!(pipeline.active_price().is_some());
    }

    #[tokio::test]
    async fn test_unknown_unit_event_is_ignored() {
        let mut pipeline = pipeline();
        handle_event(
            &mut pipeline,
            TickerEvent::ReceiveCryptocurrency {
                chain: Chain::Actinium,
            },
        )
        .await;
        handle_event(
            &mut pipeline,
            TickerEvent::SetCurrency {
                unit: "bits".to_string(),
            },
        )
        .await;

        assert_eq!(
            pipeline.state().selected_currency_unit.as_deref(),
            Some("atoms")
        );
        assert!(pipeline.state().previous_currency_unit.is_none());
    }
}
