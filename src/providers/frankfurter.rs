use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyRateProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

// FrankfurterProvider implementation for CurrencyRateProvider
pub struct FrankfurterProvider {
    base_url: String,
    timeout: Option<Duration>,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str) -> Self {
        FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl CurrencyRateProvider for FrankfurterProvider {
    #[instrument(name = "FrankfurterRateFetch", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let pair = format!("{from}->{to}");
        let url = format!("{}/latest?from={}&to={}", self.base_url, from, to);
        debug!("Requesting currency rate from {}", url);

        let mut builder = reqwest::Client::builder().user_agent("fintrack/1.0");
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency pair: {}", e, pair))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}",
                response.status(),
                pair
            ));
        }

        let text = response.text().await?;

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", pair, e))?;

        data.rates
            .get(to)
            .copied()
            .ok_or_else(|| anyhow!("No rate data found for currency pair: {}", pair))
    }
}
