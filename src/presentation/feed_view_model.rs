use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use url::Url;

use crate::application::feed_use_case::FeedUseCase;
use crate::domain::character::Character;
use crate::error::FeedError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    pub characters: Vec<Character>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

pub struct FeedViewModel {
    use_case: Arc<dyn FeedUseCase>,
    feed_url: Option<Url>,
    debug_delay: Duration,
    state: watch::Sender<FeedState>,
    generation: AtomicU64,
}

impl FeedViewModel {
    /// `feed_url` is `None` when configuration did not yield a usable URL;
    /// every load then reports [`FeedError::InvalidUrlConfiguration`].
    pub fn new(use_case: Arc<dyn FeedUseCase>, feed_url: Option<Url>) -> Self {
        let (state, _) = watch::channel(FeedState::default());
        Self { use_case, feed_url, debug_delay: Duration::ZERO, state, generation: AtomicU64::new(0) }
    }

    /// Sleeps before each fetch so the loading state can be previewed.
    pub fn with_debug_delay(mut self, delay: Duration) -> Self {
        self.debug_delay = delay;
        self
    }

    pub fn state(&self) -> FeedState { self.state.borrow().clone() }
    pub fn characters(&self) -> Vec<Character> { self.state.borrow().characters.clone() }
    pub fn is_loading(&self) -> bool { self.state.borrow().is_loading }
    pub fn error_message(&self) -> Option<String> { self.state.borrow().error_message.clone() }
    pub fn subscribe(&self) -> watch::Receiver<FeedState> { self.state.subscribe() }

    /// Fetches the feed and replaces `characters` wholesale.
    ///
    /// On failure the previous characters stay in place next to the error
    /// message. Overlapping calls are allowed; only the most recently started
    /// one may write its outcome, older responses are dropped.
    pub async fn load_data(&self) {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
        });

        if !self.debug_delay.is_zero() {
            tokio::time::sleep(self.debug_delay).await;
        }
        let outcome = self.fetch_characters().await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "discarding stale feed response");
            return;
        }
        self.state.send_modify(|state| {
            match outcome {
                Ok(characters) => {
                    tracing::debug!(count = characters.len(), "feed loaded");
                    state.characters = characters;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "feed load failed");
                    state.error_message = Some(err.to_string());
                }
            }
            state.is_loading = false;
        });
    }

    async fn fetch_characters(&self) -> Result<Vec<Character>, FeedError> {
        let url = self.feed_url.as_ref().ok_or(FeedError::InvalidUrlConfiguration)?;
        Ok(self.use_case.fetch_feed(url).await?.results)
    }
}
