//! Application state shared across handlers.

use std::sync::Arc;

use krise_auth::JwtDecoder;
use krise_core::config::AppConfig;
use krise_database::DatabasePool;
use krise_realtime::ConnectionManager;
use krise_service::{
    AuthService, HouseholdService, IncidentService, MapIconService, MembershipRequestService,
    NewsService, NotificationService, ScenarioService, StorageService, UserService,
};

/// Shared dependencies, passed to every handler via `State<AppState>`.
///
/// Everything is `Arc`-wrapped or internally reference counted, so cloning
/// per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabasePool,
    pub jwt_decoder: Arc<JwtDecoder>,
    pub connections: Arc<ConnectionManager>,

    pub auth_service: Arc<AuthService>,
    pub user_service: UserService,
    pub household_service: HouseholdService,
    pub membership_service: MembershipRequestService,
    pub incident_service: IncidentService,
    pub scenario_service: ScenarioService,
    pub notification_service: NotificationService,
    pub storage_service: StorageService,
    pub mapicon_service: MapIconService,
    pub news_service: NewsService,
}
