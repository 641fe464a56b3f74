//! Concrete repository implementations of the store contracts.

pub mod household;
pub mod incident;
pub mod mapicon;
pub mod membership_request;
pub mod news;
pub mod notification;
pub mod scenario;
pub mod storage;
pub mod user;

pub use household::HouseholdRepository;
pub use incident::IncidentRepository;
pub use mapicon::MapIconRepository;
pub use membership_request::MembershipRequestRepository;
pub use news::NewsRepository;
pub use notification::NotificationRepository;
pub use scenario::ScenarioRepository;
pub use storage::StorageRepository;
pub use user::UserRepository;
