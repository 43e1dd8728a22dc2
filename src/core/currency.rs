//! Currency rate abstractions and the set of currencies offered for selection.

use anyhow::Result;
use async_trait::async_trait;

/// Currency used when a record or config does not name one.
pub const DEFAULT_CURRENCY: &str = "THB";

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedCurrency {
    pub code: &'static str,
    pub label: &'static str,
}

pub const SUPPORTED_CURRENCIES: &[SupportedCurrency] = &[
    SupportedCurrency { code: "USD", label: "US Dollar" },
    SupportedCurrency { code: "THB", label: "Thai Baht" },
    SupportedCurrency { code: "MMK", label: "Myanmar Kyat" },
    SupportedCurrency { code: "EUR", label: "Euro" },
    SupportedCurrency { code: "JPY", label: "Japanese Yen" },
    SupportedCurrency { code: "GBP", label: "British Pound" },
    SupportedCurrency { code: "CNY", label: "Chinese Yuan" },
    SupportedCurrency { code: "SGD", label: "Singapore Dollar" },
    SupportedCurrency { code: "KRW", label: "Korean Won" },
    SupportedCurrency { code: "AUD", label: "Australian Dollar" },
];

/// Looks up a supported currency by code, ignoring case.
pub fn find_currency(code: &str) -> Option<&'static SupportedCurrency> {
    SUPPORTED_CURRENCIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_currency() {
        assert_eq!(find_currency("usd").map(|c| c.label), Some("US Dollar"));
        assert_eq!(find_currency(" THB ").map(|c| c.code), Some("THB"));
        assert!(find_currency("XYZ").is_none());
    }

    #[test]
    fn test_default_currency_is_supported() {
        assert!(find_currency(DEFAULT_CURRENCY).is_some());
    }
}
