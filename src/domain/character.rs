use serde::{Deserialize, Serialize};
use url::Url;

/// One entry of the character feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default, rename = "image")]
    pub image_url: Option<Url>,
}

/// Pagination metadata. Decoded but otherwise unused.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedInfo {
    pub count: i64,
    pub pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedResult {
    pub info: FeedInfo,
    pub results: Vec<Character>,
}
