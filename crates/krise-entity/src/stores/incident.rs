//! Incident persistence contract.

use async_trait::async_trait;
use krise_core::AppResult;
use uuid::Uuid;

use crate::incident::{Incident, NewIncident, UpdateIncident};

/// Lookup and mutation of incidents.
#[async_trait]
pub trait IncidentStore: Send + Sync {
    async fn create(&self, incident: NewIncident) -> AppResult<Incident>;

    async fn update(&self, id: Uuid, update: UpdateIncident) -> AppResult<Incident>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Incident>>;

    async fn find_all(&self) -> AppResult<Vec<Incident>>;
}
