//! Event-to-notification routing.
//!
//! [`NotificationRouter`] consumes [`WorkflowEvent`]s and, for each event
//! that notifies anyone, stores one notification per recipient. The actor
//! is never notified about their own action.

use std::collections::BTreeSet;

use slf_core::document::document_status_label;
use slf_core::event_types::{
    notification_type_for, EVENT_DOCUMENT_REVIEWED, EVENT_INSPECTION_SCHEDULED,
    EVENT_INSPECTION_STATUS_CHANGED, EVENT_PROJECT_CREATED, EVENT_PROJECT_STATUS_CHANGED,
    EVENT_TEAM_MEMBER_ADDED,
};
use slf_core::project_status::status_label;
use slf_core::types::DbId;
use slf_db::models::notification::CreateNotification;
use slf_db::repositories::{NotificationRepo, TeamRepo};
use slf_db::DbPool;
use slf_events::WorkflowEvent;
use tokio::sync::broadcast;

pub struct NotificationRouter {
    pool: DbPool,
}

impl NotificationRouter {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run until the [`EventBus`](slf_events::EventBus) is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<WorkflowEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Store notifications for one event. Returns how many were written.
    pub async fn route_event(&self, event: &WorkflowEvent) -> Result<usize, sqlx::Error> {
        let Some(notification_type) = notification_type_for(&event.event_type) else {
            return Ok(0);
        };

        let recipients = self.determine_targets(event).await?;
        let message = describe(event);

        for recipient_id in &recipients {
            NotificationRepo::create(
                &self.pool,
                &CreateNotification {
                    recipient_id: *recipient_id,
                    sender_id: event.actor_user_id,
                    notification_type: notification_type.to_string(),
                    message: message.clone(),
                    project_id: event.project_id,
                },
            )
            .await?;
        }

        tracing::debug!(
            event_type = %event.event_type,
            project_id = ?event.project_id,
            recipients = recipients.len(),
            "Event routed to notifications"
        );

        Ok(recipients.len())
    }

    /// Explicit `recipient_ids` in the payload win; otherwise the project
    /// team. Review events also reach the document's uploader.
    async fn determine_targets(&self, event: &WorkflowEvent) -> Result<Vec<DbId>, sqlx::Error> {
        let mut targets: BTreeSet<DbId> = match payload_ids(event, "recipient_ids") {
            Some(ids) => ids.into_iter().collect(),
            None => match event.project_id {
                Some(project_id) => TeamRepo::member_user_ids(&self.pool, project_id)
                    .await?
                    .into_iter()
                    .collect(),
                None => BTreeSet::new(),
            },
        };

        if event.event_type == EVENT_DOCUMENT_REVIEWED {
            if let Some(uploader) = event.payload.get("uploaded_by").and_then(|v| v.as_i64()) {
                targets.insert(uploader);
            }
        }

        if let Some(actor) = event.actor_user_id {
            targets.remove(&actor);
        }
        Ok(targets.into_iter().collect())
    }
}

fn payload_ids(event: &WorkflowEvent, key: &str) -> Option<Vec<DbId>> {
    event
        .payload
        .get(key)
        .and_then(|v| serde_json::from_value::<Vec<DbId>>(v.clone()).ok())
}

/// Human-readable notification text for an event.
pub fn describe(event: &WorkflowEvent) -> String {
    let project = event.payload_str("project_name").unwrap_or("a project");
    let from = event.payload_str("from").unwrap_or("");
    let to = event.payload_str("to").unwrap_or("");

    match event.event_type.as_str() {
        EVENT_PROJECT_CREATED => format!("You were assigned to project \"{project}\""),
        EVENT_TEAM_MEMBER_ADDED => match event.payload_str("role") {
            Some(role) => format!("You were added to project \"{project}\" as {role}"),
            None => format!("You were added to project \"{project}\""),
        },
        EVENT_PROJECT_STATUS_CHANGED => format!(
            "Project \"{project}\" moved from {} to {}",
            status_label(from),
            status_label(to)
        ),
        EVENT_DOCUMENT_REVIEWED => format!(
            "Document \"{}\" is now {}",
            event.payload_str("document_name").unwrap_or("document"),
            document_status_label(to)
        ),
        EVENT_INSPECTION_SCHEDULED => match event.payload_str("scheduled_date") {
            Some(date) => format!("Inspection for project \"{project}\" scheduled on {date}"),
            None => format!("Inspection for project \"{project}\" scheduled"),
        },
        EVENT_INSPECTION_STATUS_CHANGED => {
            format!("Inspection for project \"{project}\" is now {to}")
        }
        other => other.to_string(),
    }
}
