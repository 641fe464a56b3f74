//! # krise-service
//!
//! Business logic service layer for Krisevarsel. Each service orchestrates
//! store contracts, authentication helpers, and the push channel to
//! implement application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references. Caller identity is always an
//! explicit [`RequestContext`] parameter; there is no ambient security
//! context.

pub mod auth;
pub mod context;
pub mod household;
pub mod incident;
pub mod mapicon;
pub mod membership;
pub mod news;
pub mod notification;
pub mod scenario;
pub mod storage;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{AuthService, LoginOutcome};
pub use context::RequestContext;
pub use household::{HouseholdDetails, HouseholdService, HouseholdSummary};
pub use incident::{IncidentEvent, IncidentService, NotificationFanout};
pub use mapicon::MapIconService;
pub use membership::MembershipRequestService;
pub use news::NewsService;
pub use notification::NotificationService;
pub use scenario::ScenarioService;
pub use storage::StorageService;
pub use user::{MemberPosition, UserService};
