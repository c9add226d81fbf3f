//! Likes, favorites, ratings, comments and shares on catalog items.
//!
//! Items are identified by `(itemId, itemType)` so the same store serves
//! tools, prompt packs and anything else the directory lists.

mod sqlite;

pub use sqlite::InteractionStore;

use crate::error::{Result, WorldiaError};
use serde::{Deserialize, Serialize};

/// An interactable item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub item_id: String,
    pub item_type: String,
}

impl ItemRef {
    /// Build an item reference; both parts must be non-blank.
    pub fn new(item_id: impl Into<String>, item_type: impl Into<String>) -> Result<Self> {
        let item_id = item_id.into();
        let item_type = item_type.into();
        if item_id.trim().is_empty() || item_type.trim().is_empty() {
            return Err(WorldiaError::validation(
                "itemId",
                "itemId and itemType are required",
            ));
        }
        Ok(Self { item_id, item_type })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeSummary {
    pub count: u64,
    pub is_liked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteSummary {
    pub count: u64,
    pub is_favorited: bool,
}

/// A stored rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub user_id: String,
    pub item_id: String,
    pub item_type: String,
    pub score: u8,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Mean score rounded to one decimal; `0` with no ratings.
    pub average_rating: f64,
    pub total_ratings: u64,
    pub user_rating: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub item_id: String,
    pub item_type: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    pub created_at: String,
    pub user: CommentAuthor,
}

/// Validate a 1..=5 score.
pub fn validate_score(score: i64) -> Result<u8> {
    match u8::try_from(score) {
        Ok(s @ 1..=5) => Ok(s),
        _ => Err(WorldiaError::validation("score", "Score must be between 1 and 5")),
    }
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
