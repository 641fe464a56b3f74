//! In-memory store implementations and fixtures for service tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use krise_core::error::AppError;
use krise_core::result::AppResult;
use krise_core::traits::{Clock, Mailer, PushChannel};
use krise_core::types::{haversine_km, Coordinates};
use krise_entity::household::{Household, NewHousehold, UnregisteredMember};
use krise_entity::incident::{
    Incident, NewIncident, NewScenario, Scenario, Severity, UpdateIncident,
};
use krise_entity::mapicon::{MapIcon, NewMapIcon};
use krise_entity::membership::{
    MembershipRequest, NewMembershipRequest, RequestKind, RequestStatus,
};
use krise_entity::news::{NewNewsArticle, NewsArticle};
use krise_entity::notification::{NewNotification, Notification};
use krise_entity::storage::{ExpiringItem, StorageItem};
use krise_entity::stores::{
    HouseholdStore, IncidentStore, MapIconStore, MembershipRequestStore, NewsStore,
    NotificationStore, ScenarioStore, StorageStore, UserDirectory,
};
use krise_entity::user::{NewUser, User, UserRole};

use crate::context::RequestContext;
use crate::household::HouseholdService;
use crate::membership::MembershipRequestService;
use crate::notification::NotificationService;

pub fn ctx_for(user: &User) -> RequestContext {
    RequestContext::new(user.id, user.email.clone(), user.role)
}

pub fn admin_ctx() -> RequestContext {
    RequestContext::new(Uuid::new_v4(), "admin@test.no".to_string(), UserRole::Admin)
}

pub fn user_ctx() -> RequestContext {
    RequestContext::new(Uuid::new_v4(), "user@test.no".to_string(), UserRole::User)
}

pub fn fake_user_at(position: Option<(f64, f64)>) -> User {
    let id = Uuid::new_v4();
    User {
        id,
        email: format!("user-{id}@test.no"),
        password_hash: "$argon2id$fake".to_string(),
        full_name: "Kari Nordmann".to_string(),
        role: UserRole::User,
        email_confirmed: true,
        two_factor_enabled: false,
        latitude: position.map(|(lat, _)| lat),
        longitude: position.map(|(_, lon)| lon),
        household_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn fake_incident(latitude: f64, longitude: f64, impact_radius_km: f64) -> Incident {
    Incident {
        id: Uuid::new_v4(),
        name: "Hendelse".to_string(),
        description: "Testhendelse".to_string(),
        latitude,
        longitude,
        impact_radius_km,
        severity: Severity::Red,
        started_at: Utc::now(),
        ended_at: None,
        scenario_id: Uuid::new_v4(),
        created_at: Utc::now(),
    }
}

/// In-memory [`UserDirectory`].
#[derive(Default)]
pub struct FakeUserDirectory {
    users: Mutex<HashMap<Uuid, User>>,
}

impl FakeUserDirectory {
    pub fn add(&self, user: User) -> User {
        self.users.lock().unwrap().insert(user.id, user.clone());
        user
    }

    pub fn get(&self, id: Uuid) -> User {
        self.users.lock().unwrap().get(&id).cloned().unwrap()
    }

    fn mutate<F: FnOnce(&mut User)>(&self, id: Uuid, f: F) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        f(user);
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for FakeUserDirectory {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::conflict("Email is already registered"));
        }
        let record = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            full_name: user.full_name,
            role: user.role,
            email_confirmed: false,
            two_factor_enabled: false,
            latitude: None,
            longitude: None,
            household_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_household(&self, household_id: Uuid) -> AppResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.household_id == Some(household_id))
            .cloned()
            .collect())
    }

    async fn find_within_radius(
        &self,
        center: Coordinates,
        radius_km: f64,
    ) -> AppResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| match u.coordinates() {
                Some(position) => haversine_km(center, position) <= radius_km,
                None => false,
            })
            .cloned()
            .collect())
    }

    async fn update_position(&self, id: Uuid, position: Coordinates) -> AppResult<()> {
        self.mutate(id, |u| {
            u.latitude = Some(position.latitude);
            u.longitude = Some(position.longitude);
        })
    }

    async fn confirm_email(&self, id: Uuid) -> AppResult<()> {
        self.mutate(id, |u| u.email_confirmed = true)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        self.mutate(id, |u| u.password_hash = password_hash.to_string())
    }

    async fn set_two_factor(&self, id: Uuid, enabled: bool) -> AppResult<()> {
        self.mutate(id, |u| u.two_factor_enabled = enabled)
    }
}

/// In-memory [`HouseholdStore`] sharing user state with a
/// [`FakeUserDirectory`] so membership mutations are visible to both.
pub struct FakeHouseholdStore {
    users: Arc<FakeUserDirectory>,
    households: Mutex<HashMap<Uuid, Household>>,
    unregistered: Mutex<HashMap<Uuid, UnregisteredMember>>,
}

impl FakeHouseholdStore {
    pub fn new(users: Arc<FakeUserDirectory>) -> Self {
        Self {
            users,
            households: Mutex::new(HashMap::new()),
            unregistered: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, id: Uuid) -> Household {
        self.households.lock().unwrap().get(&id).cloned().unwrap()
    }

    pub fn try_get(&self, id: Uuid) -> Option<Household> {
        self.households.lock().unwrap().get(&id).cloned()
    }

    pub fn unregistered_for(&self, household_id: Uuid) -> Vec<UnregisteredMember> {
        self.unregistered
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.household_id == household_id)
            .cloned()
            .collect()
    }

    fn recount(&self, household_id: Uuid) {
        let registered = self
            .users
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.household_id == Some(household_id))
            .count();
        let unregistered = self
            .unregistered
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.household_id == household_id)
            .count();
        if let Some(h) = self.households.lock().unwrap().get_mut(&household_id) {
            h.member_count = (registered + unregistered) as i32;
            h.updated_at = Utc::now();
        }
    }

    fn insert_member(&self, household_id: Uuid, user_id: Uuid) -> AppResult<()> {
        {
            let mut users = self.users.users.lock().unwrap();
            let user = users
                .get_mut(&user_id)
                .ok_or_else(|| AppError::not_found("User not found"))?;
            if user.household_id.is_some() {
                return Err(AppError::validation("User already belongs to a household"));
            }
            user.household_id = Some(household_id);
        }
        self.recount(household_id);
        Ok(())
    }
}

#[async_trait]
impl HouseholdStore for FakeHouseholdStore {
    async fn create(&self, household: NewHousehold) -> AppResult<Household> {
        let record = Household {
            id: Uuid::new_v4(),
            name: household.name,
            address: household.address,
            owner_id: household.owner_id,
            member_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.households
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        if let Err(e) = self.insert_member(record.id, household.owner_id) {
            self.households.lock().unwrap().remove(&record.id);
            return Err(e);
        }
        Ok(self.get(record.id))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Household>> {
        Ok(self.try_get(id))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Household>> {
        let needle = name.to_lowercase();
        let households = self.households.lock().unwrap();
        let mut matches: Vec<Household> = households
            .values()
            .filter(|h| h.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matches)
    }

    async fn update_details(&self, id: Uuid, name: &str, address: &str) -> AppResult<Household> {
        let mut households = self.households.lock().unwrap();
        let household = households
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Household not found"))?;
        household.name = name.to_string();
        household.address = address.to_string();
        household.updated_at = Utc::now();
        Ok(household.clone())
    }

    async fn add_member(&self, household_id: Uuid, user_id: Uuid) -> AppResult<()> {
        if !self.households.lock().unwrap().contains_key(&household_id) {
            return Err(AppError::not_found("Household not found"));
        }
        self.insert_member(household_id, user_id)
    }

    async fn remove_member(&self, household_id: Uuid, user_id: Uuid) -> AppResult<()> {
        {
            let mut users = self.users.users.lock().unwrap();
            let user = users
                .get_mut(&user_id)
                .ok_or_else(|| AppError::not_found("User not found"))?;
            if user.household_id != Some(household_id) {
                return Err(AppError::validation(
                    "User is not a member of this household",
                ));
            }
            user.household_id = None;
        }
        self.recount(household_id);
        Ok(())
    }

    async fn change_owner(&self, household_id: Uuid, new_owner_id: Uuid) -> AppResult<()> {
        let is_member = self
            .users
            .users
            .lock()
            .unwrap()
            .get(&new_owner_id)
            .is_some_and(|u| u.household_id == Some(household_id));
        if !is_member {
            return Err(AppError::validation(
                "New owner must be a registered member of the household",
            ));
        }
        let mut households = self.households.lock().unwrap();
        let household = households
            .get_mut(&household_id)
            .ok_or_else(|| AppError::not_found("Household not found"))?;
        household.owner_id = new_owner_id;
        household.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_cascade(&self, household_id: Uuid) -> AppResult<()> {
        for user in self.users.users.lock().unwrap().values_mut() {
            if user.household_id == Some(household_id) {
                user.household_id = None;
            }
        }
        self.unregistered
            .lock()
            .unwrap()
            .retain(|_, m| m.household_id != household_id);
        self.households.lock().unwrap().remove(&household_id);
        Ok(())
    }

    async fn add_unregistered(
        &self,
        household_id: Uuid,
        full_name: &str,
    ) -> AppResult<UnregisteredMember> {
        let record = UnregisteredMember {
            id: Uuid::new_v4(),
            household_id,
            full_name: full_name.to_string(),
            created_at: Utc::now(),
        };
        self.unregistered
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        self.recount(household_id);
        Ok(record)
    }

    async fn update_unregistered(
        &self,
        member_id: Uuid,
        full_name: &str,
    ) -> AppResult<UnregisteredMember> {
        let mut unregistered = self.unregistered.lock().unwrap();
        let member = unregistered
            .get_mut(&member_id)
            .ok_or_else(|| AppError::not_found("Unregistered member not found"))?;
        member.full_name = full_name.to_string();
        Ok(member.clone())
    }

    async fn remove_unregistered(&self, member_id: Uuid) -> AppResult<()> {
        let removed = self.unregistered.lock().unwrap().remove(&member_id);
        match removed {
            Some(member) => {
                self.recount(member.household_id);
                Ok(())
            }
            None => Err(AppError::not_found("Unregistered member not found")),
        }
    }

    async fn find_unregistered_by_id(
        &self,
        member_id: Uuid,
    ) -> AppResult<Option<UnregisteredMember>> {
        Ok(self.unregistered.lock().unwrap().get(&member_id).cloned())
    }

    async fn find_unregistered(&self, household_id: Uuid) -> AppResult<Vec<UnregisteredMember>> {
        Ok(self.unregistered_for(household_id))
    }
}

/// In-memory [`MembershipRequestStore`].
#[derive(Default)]
pub struct FakeMembershipRequestStore {
    requests: Mutex<HashMap<Uuid, MembershipRequest>>,
}

impl FakeMembershipRequestStore {
    pub fn get(&self, id: Uuid) -> MembershipRequest {
        self.requests.lock().unwrap().get(&id).cloned().unwrap()
    }

    pub fn try_get(&self, id: Uuid) -> Option<MembershipRequest> {
        self.requests.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl MembershipRequestStore for FakeMembershipRequestStore {
    async fn create(&self, request: NewMembershipRequest) -> AppResult<MembershipRequest> {
        let record = MembershipRequest {
            id: Uuid::new_v4(),
            household_id: request.household_id,
            sender_id: request.sender_id,
            receiver_id: request.receiver_id,
            kind: request.kind,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        };
        self.requests
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MembershipRequest>> {
        Ok(self.try_get(id))
    }

    async fn update_status(&self, id: Uuid, status: RequestStatus) -> AppResult<bool> {
        let mut requests = self.requests.lock().unwrap();
        match requests.get_mut(&id) {
            Some(r) if r.status == RequestStatus::Pending => {
                r.status = status;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn cancel_other_pending_for_user(
        &self,
        user_id: Uuid,
        except: Uuid,
    ) -> AppResult<u64> {
        let mut canceled = 0;
        for r in self.requests.lock().unwrap().values_mut() {
            if r.id != except
                && r.status == RequestStatus::Pending
                && (r.sender_id == user_id || r.receiver_id == user_id)
            {
                r.status = RequestStatus::Canceled;
                canceled += 1;
            }
        }
        Ok(canceled)
    }

    async fn find_active_between(
        &self,
        household_id: Uuid,
        user_id: Uuid,
        kind: RequestKind,
    ) -> AppResult<Option<MembershipRequest>> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .values()
            .find(|r| {
                r.household_id == household_id
                    && r.kind == kind
                    && r.status == RequestStatus::Pending
                    && r.joining_user_id() == user_id
            })
            .cloned())
    }

    async fn find_by_receiver(
        &self,
        receiver_id: Uuid,
        kind: RequestKind,
        status: RequestStatus,
    ) -> AppResult<Vec<MembershipRequest>> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.receiver_id == receiver_id && r.kind == kind && r.status == status)
            .cloned()
            .collect())
    }

    async fn find_by_household(
        &self,
        household_id: Uuid,
        kind: RequestKind,
        statuses: &[RequestStatus],
    ) -> AppResult<Vec<MembershipRequest>> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .values()
            .filter(|r| {
                r.household_id == household_id && r.kind == kind && statuses.contains(&r.status)
            })
            .cloned()
            .collect())
    }

    async fn delete_by_household(&self, household_id: Uuid) -> AppResult<u64> {
        let mut requests = self.requests.lock().unwrap();
        let before = requests.len();
        requests.retain(|_, r| r.household_id != household_id);
        Ok((before - requests.len()) as u64)
    }
}

/// In-memory [`NotificationStore`].
#[derive(Default)]
pub struct FakeNotificationStore {
    notifications: Mutex<Vec<Notification>>,
    fail_for: Mutex<HashSet<Uuid>>,
}

impl FakeNotificationStore {
    pub fn for_user(&self, user_id: Uuid) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Make `save` fail for one recipient.
    pub fn fail_for(&self, user_id: Uuid) {
        self.fail_for.lock().unwrap().insert(user_id);
    }
}

#[async_trait]
impl NotificationStore for FakeNotificationStore {
    async fn save(&self, notification: NewNotification) -> AppResult<Notification> {
        if self.fail_for.lock().unwrap().contains(&notification.user_id) {
            return Err(AppError::database("Write refused"));
        }
        let record = Notification {
            id: Uuid::new_v4(),
            user_id: notification.user_id,
            kind: notification.kind,
            message: notification.message,
            read: false,
            created_at: Utc::now(),
        };
        self.notifications.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_user_ordered(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        let mut matched = self.for_user(user_id);
        matched.reverse();
        Ok(matched)
    }

    async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let mut notifications = self.notifications.lock().unwrap();
        let notification = notifications
            .iter_mut()
            .find(|n| n.id == notification_id && n.user_id == user_id)
            .ok_or_else(|| AppError::not_found("Notification not found"))?;
        notification.read = true;
        Ok(())
    }
}

/// In-memory [`PushChannel`] counting deliveries.
#[derive(Default)]
pub struct FakePushChannel {
    per_user: Mutex<HashMap<Uuid, usize>>,
    per_topic: Mutex<HashMap<String, usize>>,
    failing: Mutex<HashSet<Uuid>>,
}

impl FakePushChannel {
    pub fn fail_for(&self, user_id: Uuid) {
        self.failing.lock().unwrap().insert(user_id);
    }

    pub fn sent_to(&self, user_id: Uuid) -> usize {
        self.per_user
            .lock()
            .unwrap()
            .get(&user_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn sent_to_topic(&self, topic: &str) -> usize {
        self.per_topic
            .lock()
            .unwrap()
            .get(topic)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl PushChannel for FakePushChannel {
    async fn send_to_user(&self, user_id: Uuid, _payload: serde_json::Value) -> AppResult<()> {
        if self.failing.lock().unwrap().contains(&user_id) {
            return Err(AppError::delivery("No open connection"));
        }
        *self.per_user.lock().unwrap().entry(user_id).or_insert(0) += 1;
        Ok(())
    }

    async fn send_to_topic(&self, topic: &str, _payload: serde_json::Value) -> AppResult<()> {
        *self
            .per_topic
            .lock()
            .unwrap()
            .entry(topic.to_string())
            .or_insert(0) += 1;
        Ok(())
    }
}

/// In-memory [`IncidentStore`].
#[derive(Default)]
pub struct FakeIncidentStore {
    incidents: Mutex<HashMap<Uuid, Incident>>,
}

#[async_trait]
impl IncidentStore for FakeIncidentStore {
    async fn create(&self, incident: NewIncident) -> AppResult<Incident> {
        let record = Incident {
            id: Uuid::new_v4(),
            name: incident.name,
            description: incident.description,
            latitude: incident.latitude,
            longitude: incident.longitude,
            impact_radius_km: incident.impact_radius_km,
            severity: incident.severity,
            started_at: incident.started_at,
            ended_at: None,
            scenario_id: incident.scenario_id,
            created_at: Utc::now(),
        };
        self.incidents
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, update: UpdateIncident) -> AppResult<Incident> {
        let mut incidents = self.incidents.lock().unwrap();
        let incident = incidents
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Incident not found"))?;
        incident.name = update.name;
        incident.description = update.description;
        incident.latitude = update.latitude;
        incident.longitude = update.longitude;
        incident.impact_radius_km = update.impact_radius_km;
        incident.severity = update.severity;
        incident.ended_at = update.ended_at;
        incident.scenario_id = update.scenario_id;
        Ok(incident.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.incidents
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Incident not found"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Incident>> {
        Ok(self.incidents.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Incident>> {
        Ok(self.incidents.lock().unwrap().values().cloned().collect())
    }
}

/// In-memory [`ScenarioStore`].
#[derive(Default)]
pub struct FakeScenarioStore {
    scenarios: Mutex<HashMap<Uuid, Scenario>>,
}

impl FakeScenarioStore {
    pub fn add(&self, name: &str) -> Scenario {
        let record = Scenario {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: format!("{name} scenario"),
            instructions: None,
            icon_name: None,
            created_at: Utc::now(),
        };
        self.scenarios
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        record
    }
}

#[async_trait]
impl ScenarioStore for FakeScenarioStore {
    async fn create(&self, scenario: NewScenario) -> AppResult<Scenario> {
        let record = Scenario {
            id: Uuid::new_v4(),
            name: scenario.name,
            description: scenario.description,
            instructions: scenario.instructions,
            icon_name: scenario.icon_name,
            created_at: Utc::now(),
        };
        self.scenarios
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, scenario: NewScenario) -> AppResult<Scenario> {
        let mut scenarios = self.scenarios.lock().unwrap();
        let record = scenarios
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Scenario not found"))?;
        record.name = scenario.name;
        record.description = scenario.description;
        record.instructions = scenario.instructions;
        record.icon_name = scenario.icon_name;
        Ok(record.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Scenario>> {
        Ok(self.scenarios.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Scenario>> {
        Ok(self.scenarios.lock().unwrap().values().cloned().collect())
    }
}

/// In-memory [`StorageStore`].
#[derive(Default)]
pub struct FakeStorageStore {
    items: Mutex<Vec<StorageItem>>,
}

impl FakeStorageStore {
    pub fn add_item(
        &self,
        household_id: Uuid,
        item_name: &str,
        expiration: Option<DateTime<Utc>>,
    ) -> StorageItem {
        let record = StorageItem {
            id: Uuid::new_v4(),
            household_id,
            item_name: item_name.to_string(),
            unit: "stk".to_string(),
            amount: 1.0,
            expiration,
            date_added: Utc::now(),
        };
        self.items.lock().unwrap().push(record.clone());
        record
    }
}

#[async_trait]
impl StorageStore for FakeStorageStore {
    async fn find_by_household(&self, household_id: Uuid) -> AppResult<Vec<StorageItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.household_id == household_id)
            .cloned()
            .collect())
    }

    async fn find_expiring_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<ExpiringItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter_map(|i| {
                let expiration = i.expiration?;
                (expiration >= from && expiration <= to).then(|| ExpiringItem {
                    id: i.id,
                    household_id: i.household_id,
                    item_name: i.item_name.clone(),
                    expiration,
                })
            })
            .collect())
    }
}

/// In-memory [`MapIconStore`].
#[derive(Default)]
pub struct FakeMapIconStore {
    icons: Mutex<HashMap<Uuid, MapIcon>>,
}

#[async_trait]
impl MapIconStore for FakeMapIconStore {
    async fn create(&self, icon: NewMapIcon) -> AppResult<MapIcon> {
        let record = MapIcon {
            id: Uuid::new_v4(),
            kind: icon.kind,
            latitude: icon.latitude,
            longitude: icon.longitude,
            address: icon.address,
            description: icon.description,
            opening_hours: icon.opening_hours,
            contact_info: icon.contact_info,
            created_at: Utc::now(),
        };
        self.icons.lock().unwrap().insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, icon: NewMapIcon) -> AppResult<MapIcon> {
        let mut icons = self.icons.lock().unwrap();
        let record = icons
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Map icon not found"))?;
        record.kind = icon.kind;
        record.latitude = icon.latitude;
        record.longitude = icon.longitude;
        record.address = icon.address;
        record.description = icon.description;
        record.opening_hours = icon.opening_hours;
        record.contact_info = icon.contact_info;
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.icons
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Map icon not found"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MapIcon>> {
        Ok(self.icons.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<MapIcon>> {
        Ok(self.icons.lock().unwrap().values().cloned().collect())
    }
}

/// In-memory [`NewsStore`]. Articles are kept in insertion order and listed
/// newest first.
#[derive(Default)]
pub struct FakeNewsStore {
    articles: Mutex<Vec<NewsArticle>>,
}

#[async_trait]
impl NewsStore for FakeNewsStore {
    async fn create(&self, article: NewNewsArticle) -> AppResult<NewsArticle> {
        let record = NewsArticle {
            id: Uuid::new_v4(),
            title: article.title,
            content: article.content,
            url: article.url,
            published_at: Utc::now(),
        };
        self.articles.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_page(&self, offset: u64, limit: u64) -> AppResult<Vec<NewsArticle>> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_all(&self) -> AppResult<u64> {
        Ok(self.articles.lock().unwrap().len() as u64)
    }
}

/// Fixed-time [`Clock`] for expiry-window tests.
pub struct FakeClock {
    now: Mutex<DateTime<Utc>>,
}

impl FakeClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// [`Mailer`] capturing outbound messages.
#[derive(Default)]
pub struct FakeMailer {
    messages: Mutex<Vec<(String, String, String)>>,
    failures: AtomicUsize,
}

impl FakeMailer {
    pub fn sent_to(&self, email: &str) -> Vec<(String, String)> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _, _)| to == email)
            .map(|(_, subject, body)| (subject.clone(), body.clone()))
            .collect()
    }

    /// Make every subsequent send fail `count` times.
    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        if self.failures.load(Ordering::SeqCst) > 0 {
            self.failures.fetch_sub(1, Ordering::SeqCst);
            return Err(AppError::delivery("SMTP unavailable"));
        }
        self.messages
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// Wired-together fakes plus the services under test.
pub struct TestWorld {
    pub users: Arc<FakeUserDirectory>,
    pub households: Arc<FakeHouseholdStore>,
    pub requests: Arc<FakeMembershipRequestStore>,
    pub notifications: Arc<FakeNotificationStore>,
    pub push: Arc<FakePushChannel>,
    pub membership: MembershipRequestService,
    pub household: HouseholdService,
}

impl TestWorld {
    pub fn new() -> Self {
        let users = Arc::new(FakeUserDirectory::default());
        let households = Arc::new(FakeHouseholdStore::new(users.clone()));
        let requests = Arc::new(FakeMembershipRequestStore::default());
        let notifications = Arc::new(FakeNotificationStore::default());
        let push = Arc::new(FakePushChannel::default());

        let notification_service =
            NotificationService::new(notifications.clone(), users.clone(), push.clone());
        let membership = MembershipRequestService::new(
            requests.clone(),
            households.clone(),
            users.clone(),
            notification_service.clone(),
        );
        let household = HouseholdService::new(
            households.clone(),
            users.clone(),
            requests.clone(),
            notification_service,
        );

        Self {
            users,
            households,
            requests,
            notifications,
            push,
            membership,
            household,
        }
    }

    /// A fresh user owning a fresh single-member household.
    pub fn user_with_household(&self, name: &str) -> User {
        let owner = self.users.add(fake_user_at(None));
        let household = Household {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address: "Testveien 1".to_string(),
            owner_id: owner.id,
            member_count: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.households
            .households
            .lock()
            .unwrap()
            .insert(household.id, household.clone());
        self.users
            .users
            .lock()
            .unwrap()
            .get_mut(&owner.id)
            .unwrap()
            .household_id = Some(household.id);
        owner
    }

    /// Directly place a user into a household, bypassing the request flow.
    pub fn join(&self, household_id: Uuid, user_id: Uuid) {
        self.users
            .users
            .lock()
            .unwrap()
            .get_mut(&user_id)
            .unwrap()
            .household_id = Some(household_id);
        self.households.recount(household_id);
    }
}
