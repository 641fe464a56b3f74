//! Map icon persistence contract.

use async_trait::async_trait;
use krise_core::AppResult;
use uuid::Uuid;

use crate::mapicon::{MapIcon, NewMapIcon};

/// Lookup and mutation of map icons.
#[async_trait]
pub trait MapIconStore: Send + Sync {
    async fn create(&self, icon: NewMapIcon) -> AppResult<MapIcon>;

    async fn update(&self, id: Uuid, icon: NewMapIcon) -> AppResult<MapIcon>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MapIcon>>;

    async fn find_all(&self) -> AppResult<Vec<MapIcon>>;
}
