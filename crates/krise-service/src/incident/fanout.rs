//! Geo-radius incident notification fan-out.
//!
//! One incident lifecycle event becomes one persisted notification per
//! affected user plus a best-effort push. The search radius is the impact
//! radius times a 1.4 safety factor so people just outside the nominal
//! area are still warned.

use std::sync::Arc;

use tracing::{info, warn};

use krise_core::result::AppResult;
use krise_core::traits::PushChannel;
use krise_core::types::RADIUS_SAFETY_FACTOR;
use krise_entity::incident::Incident;
use krise_entity::notification::{NewNotification, NotificationKind};
use krise_entity::stores::{NotificationStore, UserDirectory};

/// Which lifecycle event triggered the fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentEvent {
    /// The incident was just created.
    Created,
    /// The incident changed while still ongoing.
    Updated,
    /// The incident's end time was just set.
    Closed,
}

/// Fans one incident event out to every user inside the search radius.
#[derive(Clone)]
pub struct NotificationFanout {
    users: Arc<dyn UserDirectory>,
    notifications: Arc<dyn NotificationStore>,
    push: Arc<dyn PushChannel>,
}

impl NotificationFanout {
    /// Creates a new fan-out engine.
    pub fn new(
        users: Arc<dyn UserDirectory>,
        notifications: Arc<dyn NotificationStore>,
        push: Arc<dyn PushChannel>,
    ) -> Self {
        Self {
            users,
            notifications,
            push,
        }
    }

    /// Notifies every user within `impact_radius * 1.4` km of the incident.
    ///
    /// Persistence is attempted for every affected user before returning;
    /// push failures (and individual persistence failures) are logged and
    /// never abort the remaining sends. Returns the number of users for
    /// which a notification was persisted.
    pub async fn fan_out(
        &self,
        incident: &Incident,
        scenario_name: &str,
        event: IncidentEvent,
    ) -> AppResult<usize> {
        let search_radius = incident.impact_radius_km * RADIUS_SAFETY_FACTOR;
        let affected = self
            .users
            .find_within_radius(incident.coordinates(), search_radius)
            .await?;

        let message = event_message(incident, scenario_name, event);
        let mut persisted = 0;

        for user in &affected {
            let notification = match self
                .notifications
                .save(NewNotification {
                    user_id: user.id,
                    kind: NotificationKind::Incident,
                    message: message.clone(),
                })
                .await
            {
                Ok(notification) => notification,
                Err(e) => {
                    warn!(
                        user_id = %user.id,
                        incident_id = %incident.id,
                        error = %e,
                        "Failed to persist incident notification"
                    );
                    continue;
                }
            };
            persisted += 1;

            let payload = match serde_json::to_value(&notification) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(error = %e, "Failed to serialize incident notification");
                    continue;
                }
            };

            if let Err(e) = self.push.send_to_user(user.id, payload).await {
                warn!(
                    user_id = %user.id,
                    incident_id = %incident.id,
                    error = %e,
                    "Incident push failed; notification persisted"
                );
            }
        }

        info!(
            incident_id = %incident.id,
            ?event,
            affected = affected.len(),
            persisted,
            search_radius_km = search_radius,
            "Incident fan-out complete"
        );

        Ok(persisted)
    }
}

fn event_message(incident: &Incident, scenario_name: &str, event: IncidentEvent) -> String {
    match event {
        IncidentEvent::Created => format!(
            "[EMERGENCY ALERT]: {scenario_name} is in progress near you. \
             Specific instructions can be found in the app."
        ),
        IncidentEvent::Updated => {
            format!("{} har utviklet seg. Les mer på nyhetssiden.", incident.name)
        }
        IncidentEvent::Closed => {
            format!(
                "{} har avsluttet. Ta kontakt med dine nermeste.",
                incident.name
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        fake_incident, fake_user_at, FakeNotificationStore, FakePushChannel, FakeUserDirectory,
    };

    fn engine(
        users: Arc<FakeUserDirectory>,
        notifications: Arc<FakeNotificationStore>,
        push: Arc<FakePushChannel>,
    ) -> NotificationFanout {
        NotificationFanout::new(users, notifications, push)
    }

    #[tokio::test]
    async fn test_fan_out_uses_safety_factor() {
        let users = Arc::new(FakeUserDirectory::default());
        let notifications = Arc::new(FakeNotificationStore::default());
        let push = Arc::new(FakePushChannel::default());

        // Incident at Oslo center with a 2 km radius. The near user is
        // ~1.1 km away (inside 2.8 km), the far user ~5 km away (outside).
        let near = users.add(fake_user_at(Some((59.92, 10.76))));
        let far = users.add(fake_user_at(Some((59.95, 10.80))));

        let incident = fake_incident(59.91, 10.75, 2.0);
        let engine = engine(users, notifications.clone(), push.clone());

        let persisted = engine
            .fan_out(&incident, "Flom", IncidentEvent::Created)
            .await
            .unwrap();

        assert_eq!(persisted, 1);
        assert_eq!(notifications.for_user(near.id).len(), 1);
        assert!(notifications.for_user(far.id).is_empty());
        assert_eq!(push.sent_to(near.id), 1);
    }

    #[tokio::test]
    async fn test_users_without_position_are_excluded() {
        let users = Arc::new(FakeUserDirectory::default());
        let notifications = Arc::new(FakeNotificationStore::default());
        let push = Arc::new(FakePushChannel::default());

        let unknown = users.add(fake_user_at(None));
        let incident = fake_incident(59.91, 10.75, 100.0);

        let engine = engine(users, notifications.clone(), push);
        engine
            .fan_out(&incident, "Flom", IncidentEvent::Created)
            .await
            .unwrap();

        assert!(notifications.for_user(unknown.id).is_empty());
    }

    #[tokio::test]
    async fn test_push_failure_does_not_abort_other_sends() {
        let users = Arc::new(FakeUserDirectory::default());
        let notifications = Arc::new(FakeNotificationStore::default());
        let push = Arc::new(FakePushChannel::default());

        let a = users.add(fake_user_at(Some((59.911, 10.751))));
        let b = users.add(fake_user_at(Some((59.912, 10.752))));
        push.fail_for(a.id);

        let incident = fake_incident(59.91, 10.75, 2.0);
        let engine = engine(users, notifications.clone(), push.clone());

        let persisted = engine
            .fan_out(&incident, "Brann", IncidentEvent::Created)
            .await
            .unwrap();

        // Both notifications persisted even though one push failed.
        assert_eq!(persisted, 2);
        assert_eq!(notifications.for_user(a.id).len(), 1);
        assert_eq!(notifications.for_user(b.id).len(), 1);
        assert_eq!(push.sent_to(b.id), 1);
    }

    #[tokio::test]
    async fn test_event_message_templates() {
        let mut incident = fake_incident(59.91, 10.75, 2.0);
        incident.name = "Skogbrann".to_string();

        assert_eq!(
            event_message(&incident, "Brann", IncidentEvent::Created),
            "[EMERGENCY ALERT]: Brann is in progress near you. \
             Specific instructions can be found in the app."
        );
        assert_eq!(
            event_message(&incident, "Brann", IncidentEvent::Updated),
            "Skogbrann har utviklet seg. Les mer på nyhetssiden."
        );
        assert_eq!(
            event_message(&incident, "Brann", IncidentEvent::Closed),
            "Skogbrann har avsluttet. Ta kontakt med dine nermeste."
        );
    }
}
