//! Notification routing.
//!
//! The [`NotificationRouter`] subscribes to the event bus and writes an
//! in-app notification row for each person an event concerns.

pub mod router;

pub use router::NotificationRouter;
