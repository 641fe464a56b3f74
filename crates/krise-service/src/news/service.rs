//! Paginated news feed.

use std::sync::Arc;

use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_core::types::{PageRequest, PageResponse};
use krise_entity::news::{NewNewsArticle, NewsArticle};
use krise_entity::stores::NewsStore;

use crate::context::RequestContext;

/// Public article listing plus admin publishing.
#[derive(Clone)]
pub struct NewsService {
    news: Arc<dyn NewsStore>,
}

impl NewsService {
    /// Creates a new news service.
    pub fn new(news: Arc<dyn NewsStore>) -> Self {
        Self { news }
    }

    /// One page of articles, newest first.
    pub async fn list(&self, page: PageRequest) -> AppResult<PageResponse<NewsArticle>> {
        let items = self.news.list_page(page.offset(), page.limit()).await?;
        let total = self.news.count_all().await?;
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    /// Publishes an article. Admin only.
    pub async fn publish(
        &self,
        ctx: &RequestContext,
        article: NewNewsArticle,
    ) -> AppResult<NewsArticle> {
        if !ctx.is_admin() {
            return Err(AppError::authorization("Only admins may publish news"));
        }
        if article.title.trim().is_empty() {
            return Err(AppError::validation("Title must not be empty"));
        }
        self.news.create(article).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_ctx, user_ctx, FakeNewsStore};

    fn article(title: &str) -> NewNewsArticle {
        NewNewsArticle {
            title: title.to_string(),
            content: "Innhold".to_string(),
            url: None,
        }
    }

    #[tokio::test]
    async fn test_publish_requires_admin() {
        let s = NewsService::new(Arc::new(FakeNewsStore::default()));
        let err = s.publish(&user_ctx(), article("Flomvarsel")).await.unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_list_paginates_newest_first() {
        let s = NewsService::new(Arc::new(FakeNewsStore::default()));
        let ctx = admin_ctx();
        for i in 1..=5 {
            s.publish(&ctx, article(&format!("Artikkel {i}")))
                .await
                .unwrap();
        }

        let page = s.list(PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "Artikkel 5");
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);

        let last = s.list(PageRequest::new(3, 2)).await.unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].title, "Artikkel 1");
    }

    #[tokio::test]
    async fn test_empty_feed_is_one_empty_page() {
        let s = NewsService::new(Arc::new(FakeNewsStore::default()));
        let page = s.list(PageRequest::default()).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}
