//! Values derived from [`TickerState`]. None of these fail; missing data
//! degrades to the raw chain or unit identifier.

use super::state::TickerState;
use crate::core::price::price_as_decimal;
use crate::core::{CurrencyFilterEntry, PriceMap};
use rust_decimal::Decimal;

/// Price map of the selected chain, if it has been loaded.
pub fn select_active_price(state: &TickerState) -> Option<&PriceMap> {
    let chain = state.selected_crypto?;
    state.price_by_chain.get(&chain)
}

/// Price of the selected chain in the selected fiat currency.
pub fn select_active_fiat_price(state: &TickerState) -> Option<Decimal> {
    select_active_price(state).and_then(|prices| price_as_decimal(prices, &state.fiat_ticker))
}

pub fn select_crypto_name(state: &TickerState) -> Option<&'static str> {
    state.selected_crypto.map(|chain| chain.display_name())
}

pub fn select_unit_options(state: &TickerState) -> Vec<CurrencyFilterEntry> {
    let Some(chain) = state.selected_crypto else {
        return Vec::new();
    };
    let prefix = state
        .network_info
        .as_ref()
        .and_then(|info| info.unit_prefix.as_deref())
        .unwrap_or_default();

    state
        .currency_filters
        .get(&chain)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| CurrencyFilterEntry {
                    key: entry.key.clone(),
                    name: format!("{prefix}{}", entry.name),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Ticker style name of the chain's currency, e.g. `BTC` or `tBTC`.
pub fn select_canonical_unit_name(state: &TickerState) -> String {
    if let Some(first) = select_unit_options(state).into_iter().next() {
        return first.name;
    }
    // no configured units, show the chain itself
    state
        .selected_crypto
        .map(|chain| chain.id().to_string())
        .unwrap_or_default()
}

/// Display name of the selected unit, or the unit code when it is not a known option.
pub fn select_display_name_for_unit(state: &TickerState) -> Option<String> {
    let unit = state.selected_currency_unit.as_ref()?;
    let name = select_unit_options(state)
        .into_iter()
        .find(|entry| &entry.key == unit)
        .map_or_else(|| unit.clone(), |entry| entry.name);
    Some(name)
}

pub fn select_is_loading(state: &TickerState) -> bool {
    state.is_loading_prices
}

pub fn select_fiat_ticker(state: &TickerState) -> &str {
    &state.fiat_ticker
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::NetworkInfo;
    use crate::core::{Chain, Tickers};
    use crate::ticker::state::Transition;
    use std::str::FromStr;

    fn state() -> TickerState {
        TickerState::new("EUR", &["USD".to_string(), "EUR".to_string()])
    }

    fn loaded_state() -> TickerState {
        let mut state = state();
        state.apply(Transition::PriceFetchStarted { request: 1 });
        let acm = PriceMap::from([("EUR".to_string(), "27.005".to_string())]);
        state.apply(Transition::PriceFetchCompleted {
            request: 1,
            tickers: Tickers::from([(Chain::Actinium, acm)]),
        });
        state
    }

    #[test]
    fn test_active_price_none_without_data() {
        let mut state = state();
        assert!(select_active_price(&state).is_none());

        for chain in Chain::ALL {
            state.apply(Transition::ChainSelected(chain));
            assert!(select_active_price(&state).is_none());
        }

        let mut state = loaded_state();
        state.apply(Transition::ChainSelected(Chain::Bitcoin));
        assert!(select_active_price(&state).is_none());
    }

    #[test]
    fn test_active_price_for_selected_chain() {
        let mut state = loaded_state();
        state.apply(Transition::ChainSelected(Chain::Actinium));

        let prices = select_active_price(&state).unwrap();
        assert_eq!(prices.get("EUR").map(String::as_str), Some("27.005"));
        assert_eq!(
            select_active_fiat_price(&state),
            Some(Decimal::from_str("27.005").unwrap())
        );

        state.apply(Transition::FiatSelected("gbp".to_string()));
        assert!(select_active_fiat_price(&state).is_none());
    }

    #[test]
    fn test_unit_options_empty_without_chain() {
        let state = state();
        assert!(select_unit_options(&state).is_empty());
        assert_eq!(select_canonical_unit_name(&state), "");
        assert!(select_crypto_name(&state).is_none());
    }

    #[test]
    fn test_unit_options_with_prefix() {
        let mut state = state();
        state.apply(Transition::ChainSelected(Chain::Bitcoin));
        state.apply(Transition::NetworkInfoReceived(NetworkInfo::for_network(
            Chain::Bitcoin,
            "testnet",
        )));

        let names: Vec<String> = select_unit_options(&state)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["tBTC", "tbits", "tsatoshis"]);
        assert_eq!(select_canonical_unit_name(&state), "tBTC");
    }

    #[test]
    fn test_canonical_name_falls_back_to_chain() {
        let mut state = state();
        state.currency_filters.remove(&Chain::Actinium);
        state.apply(Transition::ChainSelected(Chain::Actinium));

        assert!(select_unit_options(&state).is_empty());
        assert_eq!(select_canonical_unit_name(&state), "actinium");
    }

    #[test]
    fn test_display_name_for_unit() {
        let mut state = state();
        assert!(select_display_name_for_unit(&state).is_none());

        state.apply(Transition::ChainSelected(Chain::Bitcoin));
        state.apply(Transition::UnitSelected("sats".to_string()));
        assert_eq!(select_display_name_for_unit(&state).unwrap(), "satoshis");
    }

    #[test]
    fn test_unknown_unit_returns_raw_code() {
        let mut state = state();
        for (chain, unit) in [
            (Chain::Bitcoin, "atoms"),
            (Chain::Bitcoin, "acm"),
            (Chain::Actinium, "btc"),
            (Chain::Actinium, "bits"),
            (Chain::Actinium, ""),
        ] {
            state.apply(Transition::ChainSelected(chain));
            state.apply(Transition::UnitSelected(unit.to_string()));
            assert_eq!(select_display_name_for_unit(&state).unwrap(), unit);
            // Asking twice gives the same answer
            assert_eq!(select_display_name_for_unit(&state).unwrap(), unit);
        }
    }

    #[test]
    fn test_actinium_atoms_scenario() {
        let mut state = state();
        state.apply(Transition::ChainSelected(Chain::Actinium));
        state.apply(Transition::UnitSelected("atoms".to_string()));

        assert_eq!(select_canonical_unit_name(&state), "ACM");
        assert_eq!(select_display_name_for_unit(&state).unwrap(), "atoms");
        assert_eq!(select_crypto_name(&state), Some("Actinium"));
    }
}
