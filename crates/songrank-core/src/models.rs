//! Data models shared by the engine, the stores, and the HTTP layer.

use serde::{Deserialize, Serialize};

/// A stored music recommendation.
///
/// `id`, `name`, and `youtube_link` never change after creation; `score`
/// moves only through votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i64,
    pub name: String,
    pub youtube_link: String,
    pub score: i64,
}

/// Input for creating a recommendation. New records always start at score 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewRecommendation {
    pub name: String,
    pub youtube_link: String,
}

impl NewRecommendation {
    pub fn new(name: impl Into<String>, youtube_link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            youtube_link: youtube_link.into(),
        }
    }
}
