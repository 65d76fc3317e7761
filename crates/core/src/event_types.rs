//! Platform event and notification type names.
//!
//! Event names are published on the event bus; notification types are
//! stored in `notifications.type`.

pub const EVENT_PROJECT_CREATED: &str = "project.created";
pub const EVENT_PROJECT_STATUS_CHANGED: &str = "project.status_changed";
pub const EVENT_TEAM_MEMBER_ADDED: &str = "project.team_member_added";
pub const EVENT_DOCUMENT_REVIEWED: &str = "document.reviewed";
pub const EVENT_DOCUMENTS_LINKED: &str = "documents.linked";
pub const EVENT_INSPECTION_SCHEDULED: &str = "inspection.scheduled";
pub const EVENT_INSPECTION_STATUS_CHANGED: &str = "inspection.status_changed";

pub const NOTIFICATION_PROJECT_ASSIGNED: &str = "project_assigned";
pub const NOTIFICATION_STATUS_CHANGED: &str = "status_changed";
pub const NOTIFICATION_DOCUMENT_REVIEWED: &str = "document_reviewed";
pub const NOTIFICATION_DOCUMENTS_LINKED: &str = "documents_linked";
pub const NOTIFICATION_INSPECTION_SCHEDULED: &str = "inspection_scheduled";
pub const NOTIFICATION_INSPECTION_UPDATED: &str = "inspection_updated";

/// Notification type to record for an event, if the event notifies anyone.
pub fn notification_type_for(event_type: &str) -> Option<&'static str> {
    match event_type {
        EVENT_PROJECT_CREATED | EVENT_TEAM_MEMBER_ADDED => Some(NOTIFICATION_PROJECT_ASSIGNED),
        EVENT_PROJECT_STATUS_CHANGED => Some(NOTIFICATION_STATUS_CHANGED),
        EVENT_DOCUMENT_REVIEWED => Some(NOTIFICATION_DOCUMENT_REVIEWED),
        EVENT_INSPECTION_SCHEDULED => Some(NOTIFICATION_INSPECTION_SCHEDULED),
        EVENT_INSPECTION_STATUS_CHANGED => Some(NOTIFICATION_INSPECTION_UPDATED),
        // Linking writes its notifications inside the triage transaction.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linked_documents_are_not_routed_again() {
        assert_eq!(notification_type_for(EVENT_DOCUMENTS_LINKED), None);
    }

    #[test]
    fn status_change_maps_to_status_notification() {
        assert_eq!(
            notification_type_for(EVENT_PROJECT_STATUS_CHANGED),
            Some(NOTIFICATION_STATUS_CHANGED)
        );
        assert_eq!(notification_type_for("unknown.event"), None);
    }
}
