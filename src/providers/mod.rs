pub mod caching;
pub mod frankfurter;

use crate::core::config::FrankfurterProviderConfig;
use crate::core::currency::CurrencyRateProvider;
use caching::CachingCurrencyRateProvider;
use frankfurter::FrankfurterProvider;
use std::sync::Arc;
use std::time::Duration;

/// Builds the rate provider described by the config, wrapping it in a cache
/// when a TTL is set.
pub fn rate_provider(config: &FrankfurterProviderConfig) -> Arc<dyn CurrencyRateProvider> {
    let mut provider = FrankfurterProvider::new(&config.base_url);
    if let Some(secs) = config.timeout_secs {
        provider = provider.with_timeout(Duration::from_secs(secs));
    }

    match config.cache_ttl_secs {
        Some(ttl) if ttl > 0 => Arc::new(CachingCurrencyRateProvider::new(
            provider,
            Duration::from_secs(ttl),
        )),
        _ => Arc::new(provider),
    }
}
