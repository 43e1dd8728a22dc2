use crate::core::currency::CurrencyRateProvider;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

// Short-lived cache in front of a CurrencyRateProvider. Only successful
// lookups are stored; a failure always reaches the inner provider again.
#[derive(Clone)]
pub struct CachingCurrencyRateProvider<T: CurrencyRateProvider> {
    inner: T,
    ttl: Duration,
    cache: Arc<Mutex<HashMap<String, (Instant, f64)>>>,
}

impl<T: CurrencyRateProvider> CachingCurrencyRateProvider<T> {
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl<T: CurrencyRateProvider> CurrencyRateProvider for CachingCurrencyRateProvider<T> {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let key = format!("{from}-{to}");
        {
            let cache = self.cache.lock().await;
            match cache.get(&key) {
                Some((fetched_at, rate)) if fetched_at.elapsed() < self.ttl => {
                    debug!("Cache hit for currency rate: {}", key);
                    return Ok(*rate);
                }
                Some(_) => debug!("Cache entry expired for currency rate: {}", key),
                None => debug!("Cache miss for currency rate: {}", key),
            }
        }

        // Not held across the upstream call.
        let rate = self.inner.get_rate(from, to).await?;
        self.cache
            .lock()
            .await
            .insert(key, (Instant::now(), rate));
        Ok(rate)
    }
}
