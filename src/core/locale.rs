//! Default fiat currency lookup

use tracing::debug;

pub trait LocaleProvider: Send + Sync {
    fn default_currency_code(&self) -> String;
}

/// Always answers with the same currency.
pub struct FixedLocale(pub String);

impl LocaleProvider for FixedLocale {
    fn default_currency_code(&self) -> String {
        self.0.clone()
    }
}

/// Derives the currency from the POSIX locale variables.
pub struct EnvLocale {
    supported: Vec<String>,
}

impl EnvLocale {
    pub fn new(supported: &[String]) -> Self {
        Self {
            supported: supported.to_vec(),
        }
    }

    fn current_locale() -> Option<String> {
        ["LC_ALL", "LC_MONETARY", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.is_empty() && v != "C" && v != "POSIX")
    }
}

impl LocaleProvider for EnvLocale {
    fn default_currency_code(&self) -> String {
        let locale = Self::current_locale();
        debug!(?locale, "Resolving default currency");
        resolve_currency(locale.as_deref(), &self.supported)
    }
}

/// Maps a locale such as `en_GB.UTF-8` to a supported currency, defaulting to USD.
pub fn resolve_currency(locale: Option<&str>, supported: &[String]) -> String {
    let currency = locale
        .and_then(region_of)
        .and_then(|region| currency_for_region(&region));

    match currency {
        Some(code) if supported.iter().any(|s| s.eq_ignore_ascii_case(code)) => code.to_string(),
        _ => "USD".to_string(),
    }
}

fn region_of(locale: &str) -> Option<String> {
    let without_encoding = locale.split(['.', '@']).next()?;
    let region = without_encoding.split(['_', '-']).nth(1)?;
    Some(region.to_uppercase())
}

fn currency_for_region(region: &str) -> Option<&'static str> {
    match region {
        "US" | "EC" | "SV" | "PR" => Some("USD"),
        "GB" | "IM" | "JE" | "GG" => Some("GBP"),
        "AT" | "BE" | "CY" | "DE" | "EE" | "ES" | "FI" | "FR" | "GR" | "HR" | "IE" | "IT"
        | "LT" | "LU" | "LV" | "MT" | "NL" | "PT" | "SI" | "SK" => Some("EUR"),
        "CA" => Some("CAD"),
        "AU" => Some("AUD"),
        "JP" => Some("JPY"),
        "CH" => Some("CHF"),
        "IN" => Some("INR"),
        _ => None,
    }
}
