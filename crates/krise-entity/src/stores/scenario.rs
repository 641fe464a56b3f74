//! Scenario persistence contract.

use async_trait::async_trait;
use krise_core::AppResult;
use uuid::Uuid;

use crate::incident::{NewScenario, Scenario};

/// Lookup and mutation of crisis scenarios.
#[async_trait]
pub trait ScenarioStore: Send + Sync {
    async fn create(&self, scenario: NewScenario) -> AppResult<Scenario>;

    async fn update(&self, id: Uuid, scenario: NewScenario) -> AppResult<Scenario>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Scenario>>;

    async fn find_all(&self) -> AppResult<Vec<Scenario>>;
}
