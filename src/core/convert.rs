//! Converts amounts between currencies using a live rate provider.
use crate::core::currency::CurrencyRateProvider;
use crate::core::error::FinanceError;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Raw conversion input as it arrives from a caller. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversionRequest {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub original_amount: f64,
    pub converted_amount: f64,
    pub rate: f64,
    pub from: String,
    pub to: String,
}

/// Rounds half away from zero to two decimal places.
pub fn round_to_cents(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

fn normalize_code(code: &str) -> Result<String, FinanceError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(FinanceError::validation("Missing parameters"));
    }
    if !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FinanceError::validation(format!(
            "Invalid currency code: {code}"
        )));
    }
    Ok(code.to_ascii_uppercase())
}

#[derive(Clone)]
pub struct CurrencyConverter {
    provider: Arc<dyn CurrencyRateProvider>,
}

impl CurrencyConverter {
    pub fn new(provider: Arc<dyn CurrencyRateProvider>) -> Self {
        CurrencyConverter { provider }
    }

    /// Validates a raw request and converts it.
    pub async fn convert_request(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, FinanceError> {
        match (request.amount, request.from.as_deref(), request.to.as_deref()) {
            (Some(amount), Some(from), Some(to)) => self.convert(amount, from, to).await,
            _ => Err(FinanceError::validation("Missing parameters")),
        }
    }

    /// Converts `amount` from one currency to another.
    ///
    /// A zero or non-finite amount and empty codes are rejected before any
    /// provider call. Identical currencies short-circuit with a rate of 1.
    #[instrument(name = "Convert", skip(self))]
    pub async fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, FinanceError> {
        if amount == 0.0 || !amount.is_finite() {
            return Err(FinanceError::validation("Missing parameters"));
        }
        let from = normalize_code(from)?;
        let to = normalize_code(to)?;

        if from == to {
            debug!("Same currency, skipping rate lookup");
            return Ok(ConversionResult {
                original_amount: amount,
                converted_amount: amount,
                rate: 1.0,
                from,
                to,
            });
        }

        let rate = self
            .provider
            .get_rate(&from, &to)
            .await
            .map_err(|e| FinanceError::upstream(e.to_string()))?;
        debug!(rate, "Fetched exchange rate");

        Ok(ConversionResult {
            original_amount: amount,
            converted_amount: round_to_cents(amount * rate),
            rate,
            from,
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockCurrencyProvider {
        rates: HashMap<String, f64>,
        call_count: AtomicUsize,
    }

    impl MockCurrencyProvider {
        fn new() -> Self {
            Self {
                rates: HashMap::new(),
                call_count: AtomicUsize::new(0),
            }
        }

        fn with_rate(mut self, from: &str, to: &str, rate: f64) -> Self {
            self.rates.insert(format!("{from}-{to}"), rate);
            self
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CurrencyRateProvider for MockCurrencyProvider {
        async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.rates
                .get(&format!("{from}-{to}"))
                .copied()
                .ok_or_else(|| anyhow!("HTTP error: 500 Internal Server Error"))
        }
    }

    fn converter(provider: &Arc<MockCurrencyProvider>) -> CurrencyConverter {
        CurrencyConverter::new(provider.clone())
    }

    #[tokio::test]
    async fn test_same_currency_skips_provider() {
        let provider = Arc::new(MockCurrencyProvider::new());
        let result = converter(&provider).convert(100.0, "USD", "USD").await.unwrap();

        assert_eq!(result.original_amount, 100.0);
        assert_eq!(result.converted_amount, 100.0);
        assert_eq!(result.rate, 1.0);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_cross_currency_conversion() {
        let provider = Arc::new(MockCurrencyProvider::new().with_rate("USD", "EUR", 0.9));
        let result = converter(&provider).convert(100.0, "USD", "EUR").await.unwrap();

        assert_eq!(result.converted_amount, 90.0);
        assert_eq!(result.rate, 0.9);
        assert_eq!(result.from, "USD");
        assert_eq!(result.to, "EUR");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_converted_amount_is_rounded_to_cents() {
        let provider = Arc::new(MockCurrencyProvider::new().with_rate("USD", "THB", 36.123));
        let result = converter(&provider).convert(10.0, "usd", " thb ").await.unwrap();

        assert_eq!(result.converted_amount, 361.23);
        assert_eq!(result.rate, 36.123);
        assert_eq!(result.to, "THB");
    }

    #[tokio::test]
    async fn test_repeated_calls_hit_provider_each_time() {
        let provider = Arc::new(MockCurrencyProvider::new().with_rate("USD", "EUR", 0.9));
        let converter = converter(&provider);
        converter.convert(1.0, "USD", "EUR").await.unwrap();
        converter.convert(1.0, "USD", "EUR").await.unwrap();
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_missing_parameters_rejected_without_provider_call() {
        let provider = Arc::new(MockCurrencyProvider::new().with_rate("USD", "EUR", 0.9));
        let converter = converter(&provider);

        let missing_amount = ConversionRequest {
            amount: None,
            from: Some("USD".to_string()),
            to: Some("EUR".to_string()),
        };
        let err = converter.convert_request(&missing_amount).await.unwrap_err();
        assert_eq!(err, FinanceError::Validation("Missing parameters".to_string()));

        let missing_to = ConversionRequest {
            amount: Some(10.0),
            from: Some("USD".to_string()),
            to: None,
        };
        assert!(converter.convert_request(&missing_to).await.is_err());

        assert!(matches!(
            converter.convert(0.0, "USD", "EUR").await,
            Err(FinanceError::Validation(_))
        ));
        assert!(matches!(
            converter.convert(10.0, "", "EUR").await,
            Err(FinanceError::Validation(_))
        ));
        assert!(matches!(
            converter.convert(10.0, "US D&", "EUR").await,
            Err(FinanceError::Validation(_))
        ));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_upstream_error() {
        let provider = Arc::new(MockCurrencyProvider::new());
        let err = converter(&provider)
            .convert(100.0, "USD", "EUR")
            .await
            .unwrap_err();
        assert!(matches!(err, FinanceError::Upstream(_)));
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(90.00000000000001), 90.0);
        assert_eq!(round_to_cents(1.005), 1.01);
        assert_eq!(round_to_cents(-2.345), -2.35);
        assert_eq!(round_to_cents(12.0), 12.0);
    }
}
