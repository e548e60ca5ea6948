//! Single-attempt JSON-over-HTTP client.
//!
//! A request either returns a decoded body or one of three failures:
//! transport, a status outside 200..=299, or a body that does not decode.
//! There is no caching, retry or timeout override.

use async_trait::async_trait;
use reqwest::{Client, Method, Request};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::NetworkError;

pub const DEFAULT_POOL_MAX_IDLE: usize = 8;

/// Connection settings handed to [`NetworkClient::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub user_agent: String,
    pub pool_max_idle_per_host: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("momentum/", env!("CARGO_PKG_VERSION")).to_string(),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE,
        }
    }
}

#[async_trait]
pub trait NetworkService: Send + Sync + 'static {
    async fn execute<T>(&self, request: Request) -> Result<T, NetworkError>
    where
        T: DeserializeOwned + Send;
}

#[derive(Clone)]
pub struct NetworkClient {
    client: Client,
}

impl NetworkClient {
    pub fn new(config: &NetworkConfig) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(NetworkError::ClientSetup)?;
        Ok(Self { client })
    }

    pub fn get(url: Url) -> Request { Request::new(Method::GET, url) }
}

#[async_trait]
impl NetworkService for NetworkClient {
    async fn execute<T>(&self, request: Request) -> Result<T, NetworkError>
    where
        T: DeserializeOwned + Send,
    {
        let url = request.url().clone();
        tracing::debug!(%url, method = %request.method(), "sending request");

        let response = self.client.execute(request).await.map_err(|err| {
            tracing::warn!(%url, error = %err, "transport failure");
            NetworkError::Transport(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "unexpected status");
            return Err(NetworkError::InvalidResponse { status: status.as_u16() });
        }

        let body = response.bytes().await?;
        let decoded = serde_json::from_slice(&body).map_err(|err| {
            tracing::warn!(%url, error = %err, "response body did not decode");
            NetworkError::Decoding(err)
        })?;
        tracing::debug!(%url, bytes = body.len(), "request finished");
        Ok(decoded)
    }
}
