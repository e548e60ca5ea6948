//! Runtime configuration read from the environment (and `.env`, if present).

use url::Url;

use crate::infrastructure::network::{NetworkConfig, DEFAULT_POOL_MAX_IDLE};

pub const DEFAULT_FEED_URL: &str = "https://rickandmortyapi.com/api/character";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` when `FEED_URL` was set to something that is not a URL.
    pub feed_url: Option<Url>,
    pub database_url: String,
    pub use_mock: bool,
    pub network: NetworkConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let raw_feed_url = lookup("FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_string());
        let feed_url = match Url::parse(&raw_feed_url) {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::warn!(value = %raw_feed_url, error = %err, "FEED_URL is not a valid URL");
                None
            }
        };

        let use_mock = lookup("MOMENTUM_USE_MOCK")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let mut network = NetworkConfig::default();
        if let Some(agent) = lookup("HTTP_USER_AGENT") {
            network.user_agent = agent;
        }
        network.pool_max_idle_per_host = lookup("HTTP_POOL_MAX_IDLE")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_POOL_MAX_IDLE);

        Self {
            feed_url,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            use_mock,
            network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config(&[]);
        assert_eq!(cfg.feed_url.as_ref().map(Url::as_str), Some(DEFAULT_FEED_URL));
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert!(!cfg.use_mock);
        assert_eq!(cfg.network, NetworkConfig::default());
    }

    #[test]
    fn unparsable_feed_url_becomes_none() {
        assert!(config(&[("FEED_URL", "not a url")]).feed_url.is_none());
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("FEED_URL", "http://127.0.0.1:9000/api/character"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("MOMENTUM_USE_MOCK", "TRUE"),
            ("HTTP_USER_AGENT", "test-agent"),
            ("HTTP_POOL_MAX_IDLE", "2"),
        ]);
        assert_eq!(cfg.feed_url.unwrap().port(), Some(9000));
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert!(cfg.use_mock);
        assert_eq!(cfg.network.user_agent, "test-agent");
        assert_eq!(cfg.network.pool_max_idle_per_host, 2);
    }

    #[test]
    fn bad_pool_size_falls_back_to_default() {
        let cfg = config(&[("HTTP_POOL_MAX_IDLE", "many")]);
        assert_eq!(cfg.network.pool_max_idle_per_host, DEFAULT_POOL_MAX_IDLE);
    }
}
