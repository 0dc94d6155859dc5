//! Ticker state and the transitions that mutate it

use crate::core::currency::{CurrencyFilters, NetworkInfo, default_currency_filters};
use crate::core::{Chain, PriceMap, Tickers};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Identifies one price fetch so late completions can be recognised.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
}

#[derive(Debug, Clone)]
pub enum Transition {
    ChainSelected(Chain),
    UnitSelected(String),
    FiatSelected(String),
    PriceFetchStarted {
        request: RequestId,
    },
    PriceFetchCompleted {
        request: RequestId,
        tickers: Tickers,
    },
    PriceFetchFailed {
        request: RequestId,
        error: String,
    },
    NetworkInfoReceived(NetworkInfo),
}

#[derive(Debug, Clone)]
pub struct TickerState {
    pub selected_crypto: Option<Chain>,
    pub selected_currency_unit: Option<String>,
    pub previous_currency_unit: Option<String>,
    pub price_by_chain: HashMap<Chain, PriceMap>,
    pub fiat_ticker: String,
    pub fiat_tickers: Vec<String>,
    pub currency_filters: CurrencyFilters,
    pub network_info: Option<NetworkInfo>,
    pub is_loading_prices: bool,
    pub load_phase: LoadPhase,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    latest_request: Option<RequestId>,
    latest_completed: Option<RequestId>,
    phase_before_fetch: LoadPhase,
}

impl TickerState {
    pub fn new(default_fiat: &str, fiat_tickers: &[String]) -> Self {
        Self {
            selected_crypto: None,
            selected_currency_unit: None,
            previous_currency_unit: None,
            price_by_chain: HashMap::new(),
            fiat_ticker: default_fiat.to_uppercase(),
            fiat_tickers: fiat_tickers.to_vec(),
            currency_filters: default_currency_filters(),
            network_info: None,
            is_loading_prices: false,
            load_phase: LoadPhase::Idle,
            last_updated: None,
            last_error: None,
            latest_request: None,
            latest_completed: None,
            phase_before_fetch: LoadPhase::Idle,
        }
    }

    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest_request
    }

    fn is_latest(&self, request: RequestId) -> bool {
        self.latest_request == Some(request)
    }

    pub fn apply(&mut self, transition: Transition) {
        debug!(?transition, "Applying ticker transition");
        match transition {
            Transition::ChainSelected(chain) => {
                self.selected_crypto = Some(chain);
            }
            Transition::UnitSelected(unit) => {
                self.previous_currency_unit = self.selected_currency_unit.take();
                self.selected_currency_unit = Some(unit);
            }
            Transition::FiatSelected(code) => {
                self.fiat_ticker = code.to_uppercase();
            }
            Transition::PriceFetchStarted { request } => {
                if self.load_phase != LoadPhase::Loading {
                    self.phase_before_fetch = self.load_phase;
                }
                self.latest_request = Some(request);
                self.is_loading_prices = true;
                self.load_phase = LoadPhase::Loading;
            }
            Transition::PriceFetchCompleted { request, tickers } => {
                if self.latest_completed.is_some_and(|done| done >= request) {
                    debug!(request, "Ignoring price fetch older than the last applied one");
                    return;
                }
                // Keyed by chain, so an out-of-order response still lands in the right slot
                self.price_by_chain.extend(tickers);
                self.latest_completed = Some(request);
                self.last_updated = Some(Utc::now());
                self.last_error = None;
                self.phase_before_fetch = LoadPhase::Loaded;
                if self.is_latest(request) {
                    self.is_loading_prices = false;
                    self.load_phase = LoadPhase::Loaded;
                } else {
                    debug!(request, "Stale price fetch completed");
                }
            }
            Transition::PriceFetchFailed { request, error } => {
                if !self.is_latest(request) {
                    debug!(request, %error, "Ignoring failure of a superseded price fetch");
                    return;
                }
                self.last_error = Some(error);
                self.is_loading_prices = false;
                self.load_phase = self.phase_before_fetch;
            }
            Transition::NetworkInfoReceived(info) => {
                self.network_info = Some(info);
            }
        }
    }
}
