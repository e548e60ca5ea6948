use async_trait::async_trait;
use url::Url;

use crate::domain::{character::FeedResult, repository::FeedRepository};
use crate::error::FeedError;

/// Seam between the feed view-model and whatever repository backs it.
#[async_trait]
pub trait FeedUseCase: Send + Sync + 'static {
    async fn fetch_feed(&self, url: &Url) -> Result<FeedResult, FeedError>;
}

#[derive(Clone)]
pub struct FeedUseCaseImpl<R: FeedRepository> {
    repo: R,
}

impl<R: FeedRepository> FeedUseCaseImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: FeedRepository> FeedUseCase for FeedUseCaseImpl<R> {
    async fn fetch_feed(&self, url: &Url) -> Result<FeedResult, FeedError> { Ok(self.repo.fetch_feed(url).await?) }
}
