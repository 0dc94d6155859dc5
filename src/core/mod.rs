//! Core domain types and collaborator abstractions

pub mod chain;
pub mod config;
pub mod currency;
pub mod locale;
pub mod log;
pub mod price;
pub mod settings;

// Re-export main types for cleaner imports
pub use chain::Chain;
pub use currency::{CurrencyFilterEntry, NetworkInfo};
pub use locale::LocaleProvider;
pub use price::{PriceFetchError, PriceFetcher, PriceMap, Tickers};
pub use settings::{ChainSettings, SettingsStore};
