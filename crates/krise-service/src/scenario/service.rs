//! Scenario catalog: admin-managed, publicly readable.

use std::sync::Arc;

use uuid::Uuid;

use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_entity::incident::{NewScenario, Scenario};
use krise_entity::stores::ScenarioStore;

use crate::context::RequestContext;

#[derive(Clone)]
pub struct ScenarioService {
    scenarios: Arc<dyn ScenarioStore>,
}

impl ScenarioService {
    /// Creates a new scenario service.
    pub fn new(scenarios: Arc<dyn ScenarioStore>) -> Self {
        Self { scenarios }
    }

    /// Creates a scenario. Admin only.
    pub async fn create(&self, ctx: &RequestContext, data: NewScenario) -> AppResult<Scenario> {
        self.require_admin(ctx)?;
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Scenario name must not be empty"));
        }
        self.scenarios.create(data).await
    }

    /// Replaces a scenario's fields. Admin only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: NewScenario,
    ) -> AppResult<Scenario> {
        self.require_admin(ctx)?;
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Scenario name must not be empty"));
        }
        self.scenarios.update(id, data).await
    }

    /// All scenarios.
    pub async fn list(&self) -> AppResult<Vec<Scenario>> {
        self.scenarios.find_all().await
    }

    /// One scenario by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<Scenario> {
        self.scenarios
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Scenario {id} not found")))
    }

    fn require_admin(&self, ctx: &RequestContext) -> AppResult<()> {
        if !ctx.is_admin() {
            return Err(AppError::authorization("Only admins may manage scenarios"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_ctx, user_ctx, FakeScenarioStore};

    fn new_scenario(name: &str) -> NewScenario {
        NewScenario {
            name: name.to_string(),
            description: "Beskrivelse".to_string(),
            instructions: Some("Hold deg innendørs.".to_string()),
            icon_name: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let s = ScenarioService::new(Arc::new(FakeScenarioStore::default()));
        let err = s
            .create(&user_ctx(), new_scenario("Flom"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_create_and_update() {
        let s = ScenarioService::new(Arc::new(FakeScenarioStore::default()));
        let ctx = admin_ctx();
        let scenario = s.create(&ctx, new_scenario("Flom")).await.unwrap();

        let updated = s
            .update(&ctx, scenario.id, new_scenario("Storflom"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Storflom");
        assert_eq!(s.get(scenario.id).await.unwrap().name, "Storflom");
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let s = ScenarioService::new(Arc::new(FakeScenarioStore::default()));
        let err = s.get(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind, krise_core::error::ErrorKind::NotFound);
    }
}
