//! News article entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An article in the public news feed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NewsArticle {
    /// Unique identifier.
    pub id: Uuid,
    /// Headline.
    pub title: String,
    /// Article body.
    pub content: String,
    /// Link to the full story, if external.
    pub url: Option<String>,
    /// When the article was published.
    pub published_at: DateTime<Utc>,
}

/// Data required to create a news article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNewsArticle {
    pub title: String,
    pub content: String,
    pub url: Option<String>,
}
