//! In-process domain events for the certification workflow.
//!
//! Handlers publish a [`WorkflowEvent`] on the [`EventBus`] after a change
//! commits; subscribers (the notification router) fan it out to the people
//! on the project team.

pub mod bus;

pub use bus::{EventBus, WorkflowEvent};
