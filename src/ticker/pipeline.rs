//! The ticker context object: state plus the collaborators its effects talk to.

use super::selectors;
use super::state::{RequestId, TickerState, Transition};
use crate::core::config::AppConfig;
use crate::core::settings::FIAT_TICKER_KEY;
use crate::core::{
    Chain, ChainSettings, CurrencyFilterEntry, LocaleProvider, NetworkInfo, PriceFetchError,
    PriceFetcher, PriceMap, SettingsStore, Tickers,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct TickerPipeline {
    state: TickerState,
    config: AppConfig,
    settings: Arc<dyn SettingsStore>,
    fetcher: Arc<dyn PriceFetcher>,
    next_request: RequestId,
}

impl TickerPipeline {
    pub fn new(
        config: AppConfig,
        settings: Arc<dyn SettingsStore>,
        fetcher: Arc<dyn PriceFetcher>,
        locale: &dyn LocaleProvider,
    ) -> Self {
        let default_fiat = config
            .currency
            .clone()
            .unwrap_or_else(|| locale.default_currency_code());
        debug!(%default_fiat, "Creating ticker pipeline");
        let state = TickerState::new(&default_fiat, &config.fiat_tickers);

        Self {
            state,
            config,
            settings,
            fetcher,
            next_request: 1,
        }
    }

    pub fn state(&self) -> &TickerState {
        &self.state
    }

    pub fn dispatch(&mut self, transition: Transition) {
        self.state.apply(transition);
    }

    pub fn active_price(&self) -> Option<&PriceMap> {
        selectors::select_active_price(&self.state)
    }

    pub fn crypto_name(&self) -> Option<&'static str> {
        selectors::select_crypto_name(&self.state)
    }

    pub fn unit_options(&self) -> Vec<CurrencyFilterEntry> {
        selectors::select_unit_options(&self.state)
    }

    pub fn canonical_unit_name(&self) -> String {
        selectors::select_canonical_unit_name(&self.state)
    }

    pub fn display_name_for_unit(&self) -> Option<String> {
        selectors::select_display_name_for_unit(&self.state)
    }

    pub fn is_loading(&self) -> bool {
        selectors::select_is_loading(&self.state)
    }

    pub fn set_crypto(&mut self, chain: Chain) {
        self.dispatch(Transition::ChainSelected(chain));
    }

    pub fn receive_network_info(&mut self, info: NetworkInfo) {
        self.dispatch(Transition::NetworkInfoReceived(info));
    }

    fn chain_units(&self, chain: Chain) -> &[CurrencyFilterEntry] {
        self.state
            .currency_filters
            .get(&chain)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn is_known_unit(&self, chain: Chain, unit: &str) -> bool {
        self.chain_units(chain).iter().any(|entry| entry.key == unit)
    }

    /// The configured default unit, or the chain's first unit when the configured one isn't one of them.
    fn default_unit_for(&self, chain: Chain) -> String {
        let configured = self.config.default_unit(chain);
        if self.is_known_unit(chain, &configured) {
            return configured;
        }

        let fallback = self
            .chain_units(chain)
            .first()
            .map_or_else(|| chain.ticker_code().to_string(), |entry| entry.key.clone());
        warn!(%chain, %configured, %fallback, "Configured default unit does not belong to chain");
        fallback
    }

    /// Selects a display unit and remembers it for the selected chain.
    ///
    /// Fails without touching state when a chain is selected and `unit` is not one of its units.
    pub async fn set_currency(&mut self, unit: &str) -> anyhow::Result<()> {
        if let Some(chain) = self.state.selected_crypto {
            if !self.is_known_unit(chain, unit) {
                let known: Vec<&str> = self
                    .chain_units(chain)
                    .iter()
                    .map(|entry| entry.key.as_str())
                    .collect();
                anyhow::bail!(
                    "Unknown unit {} for {}, expected one of {}",
                    unit,
                    chain,
                    known.join(", ")
                );
            }
        }

        self.dispatch(Transition::UnitSelected(unit.to_string()));

        if let Some(chain) = self.state.selected_crypto {
            self.apply_unit_preference(chain, Some(unit)).await;
        }
        Ok(())
    }

    /// Persists `requested_unit` as the chain's unit if it differs from the saved one.
    ///
    /// Returns whether a write was issued. Write failures are logged, never returned.
    pub async fn apply_unit_preference(&self, chain: Chain, requested_unit: Option<&str>) -> bool {
        let key = chain.settings_key();
        let mut chain_settings = ChainSettings::from_value(self.settings.get(&key).await);

        if chain_settings.unit.as_deref() == requested_unit {
            debug!(%chain, ?requested_unit, "Unit preference unchanged");
            return false;
        }

        let unit = requested_unit
            .map(str::to_string)
            .unwrap_or_else(|| self.default_unit_for(chain));
        chain_settings.unit = Some(unit);

        if let Err(e) = self.settings.put(&key, chain_settings.to_value()).await {
            warn!(error = %e, %chain, "Failed to save unit preference");
        }
        true
    }

    /// Handles the "chain selected" event: selects the chain and restores its saved unit.
    pub async fn receive_cryptocurrency(&mut self, chain: Chain) {
        info!(%chain, "Cryptocurrency selected");
        self.set_crypto(chain);

        let chain_settings =
            ChainSettings::from_value(self.settings.get(&chain.settings_key()).await);
        let unit = match chain_settings.unit {
            Some(unit) if self.is_known_unit(chain, &unit) => unit,
            Some(unit) => {
                warn!(%chain, %unit, "Saved unit does not belong to chain, using the default");
                self.default_unit_for(chain)
            }
            None => self.default_unit_for(chain),
        };
        if let Err(e) = self.set_currency(&unit).await {
            warn!(error = %e, %chain, "Failed to restore unit");
        }
    }

    pub async fn set_fiat_ticker(&mut self, fiat_ticker: &str) {
        self.dispatch(Transition::FiatSelected(fiat_ticker.to_string()));

        let code = self.state.fiat_ticker.clone();
        if let Err(e) = self.settings.put(FIAT_TICKER_KEY, Value::String(code)).await {
            warn!(error = %e, "Failed to save fiat ticker");
        }
    }

    /// Restores the saved fiat ticker, then loads prices.
    pub async fn init_tickers(&mut self) -> Result<Tickers, PriceFetchError> {
        let saved = self
            .settings
            .get(FIAT_TICKER_KEY)
            .await
            .and_then(|v| v.as_str().map(str::to_string));

        if let Some(fiat) = saved {
            if !fiat.eq_ignore_ascii_case(&self.state.fiat_ticker) {
                self.set_fiat_ticker(&fiat).await;
            }
        }

        self.load_prices().await
    }

    /// Marks prices as loading and returns the id the result must be reported with.
    pub fn begin_price_fetch(&mut self) -> RequestId {
        let request = self.next_request;
        self.next_request += 1;
        self.dispatch(Transition::PriceFetchStarted { request });
        request
    }

    /// Records the outcome of the fetch started as `request`.
    pub fn finish_price_fetch(
        &mut self,
        request: RequestId,
        result: anyhow::Result<Tickers>,
    ) -> Result<Tickers, PriceFetchError> {
        let outcome = match result {
            Err(e) => Err(PriceFetchError::Transport(format!("{e:#}"))),
            Ok(tickers) => match Chain::ALL.iter().find(|chain| !tickers.contains_key(*chain)) {
                Some(missing) => {
                    // Keep the chains that did arrive
                    if !tickers.is_empty() {
                        self.dispatch(Transition::PriceFetchCompleted { request, tickers });
                    }
                    Err(PriceFetchError::EmptyResponse(*missing))
                }
                None => Ok(tickers),
            },
        };

        match &outcome {
            Ok(tickers) => self.dispatch(Transition::PriceFetchCompleted {
                request,
                tickers: tickers.clone(),
            }),
            Err(e) => {
                warn!(error = %e, request, "Price fetch failed");
                self.dispatch(Transition::PriceFetchFailed {
                    request,
                    error: e.to_string(),
                });
            }
        }
        outcome
    }

    pub async fn load_prices(&mut self) -> Result<Tickers, PriceFetchError> {
        let request = self.begin_price_fetch();
        let fetcher = Arc::clone(&self.fetcher);
        let result = fetcher.fetch(&Chain::ALL, &self.state.fiat_tickers).await;
        self.finish_price_fetch(request, result)
    }
}
