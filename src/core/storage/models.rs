use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::feed::types::ParsedPost;

/// Sentinel date carried by posts imported before dates were tracked.
pub const LEGACY_DATE: &str = "Legacy Post";
pub const LEGACY_DATE_STANDIN: &str = "2024-01-01";

/// Keyed by post id, in the order ids were first recorded.
pub type PostRecord = IndexMap<String, StoredPost>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredPost {
    pub title: String,
    pub link: String,
    pub date: String,
    #[serde(default)]
    pub category: String,
    /// Fields written by other tools, kept as found.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredPost {
    /// Date used for ordering and structured data.
    pub fn effective_date(&self) -> &str {
        if self.date == LEGACY_DATE {
            LEGACY_DATE_STANDIN
        } else {
            &self.date
        }
    }
}

impl From<&ParsedPost> for StoredPost {
    fn from(post: &ParsedPost) -> Self {
        Self {
            title: post.title.clone(),
            link: post.link.clone(),
            date: post.date.clone(),
            category: post.category.clone(),
            extra: Map::new(),
        }
    }
}
