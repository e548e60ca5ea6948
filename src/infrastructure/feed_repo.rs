use async_trait::async_trait;
use url::Url;

use super::network::{NetworkClient, NetworkService};
use crate::domain::{
    character::{Character, FeedInfo, FeedResult},
    repository::FeedRepository,
};
use crate::error::NetworkError;

#[derive(Clone)]
pub struct HttpFeedRepository<N: NetworkService> {
    network: N,
}

impl<N: NetworkService> HttpFeedRepository<N> {
    pub fn new(network: N) -> Self { Self { network } }
}

#[async_trait]
impl<N: NetworkService> FeedRepository for HttpFeedRepository<N> {
    async fn fetch_feed(&self, url: &Url) -> Result<FeedResult, NetworkError> {
        self.network.execute(NetworkClient::get(url.clone())).await
    }
}

const STUB_AVATAR_BASE: &str = "https://rickandmortyapi.com/api/character/avatar";

/// Fixed three-character feed. Never touches the network.
#[derive(Clone, Copy, Default)]
pub struct StubFeedRepository;

impl StubFeedRepository {
    pub fn payload() -> FeedResult {
        let results = [(1, "Obada"), (2, "Sara"), (3, "Nazli")]
            .into_iter()
            .map(|(id, name)| Character {
                id,
                name: name.to_string(),
                species: None,
                image_url: Url::parse(&format!("{STUB_AVATAR_BASE}/{id}.jpeg")).ok(),
            })
            .collect();
        FeedResult { info: FeedInfo { count: 1, pages: 1 }, results }
    }
}

#[async_trait]
impl FeedRepository for StubFeedRepository {
    async fn fetch_feed(&self, _url: &Url) -> Result<FeedResult, NetworkError> { Ok(Self::payload()) }
}
