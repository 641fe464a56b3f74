//! News persistence contract.

use async_trait::async_trait;
use krise_core::AppResult;

use crate::news::{NewNewsArticle, NewsArticle};

/// Lookup and mutation of news articles.
#[async_trait]
pub trait NewsStore: Send + Sync {
    async fn create(&self, article: NewNewsArticle) -> AppResult<NewsArticle>;

    /// One page of articles, newest first.
    async fn list_page(&self, offset: u64, limit: u64) -> AppResult<Vec<NewsArticle>>;

    /// Total number of articles.
    async fn count_all(&self) -> AppResult<u64>;
}
