//! Persistence contracts.
//!
//! One trait per aggregate. The service layer depends only on these; the
//! PostgreSQL repositories in `krise-database` implement them, and service
//! tests implement them in memory.

pub mod household;
pub mod incident;
pub mod mapicon;
pub mod membership;
pub mod news;
pub mod notification;
pub mod scenario;
pub mod storage;
pub mod user;

pub use household::HouseholdStore;
pub use incident::IncidentStore;
pub use mapicon::MapIconStore;
pub use membership::MembershipRequestStore;
pub use news::NewsStore;
pub use notification::NotificationStore;
pub use scenario::ScenarioStore;
pub use storage::StorageStore;
pub use user::UserDirectory;
