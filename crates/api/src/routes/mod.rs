pub mod client;
pub mod document;
pub mod health;
pub mod inspection;
pub mod lookups;
pub mod notification;
pub mod profile;
pub mod project;
pub mod triage;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /statuses/projects[/{status}]                    status vocabulary (public)
/// /statuses/documents[/{status}]                   document vocabulary (public)
/// /workflow/next-allowed/{status}                  team-leader table (public)
/// /wizard/validate                                 step validation (public)
/// /wizard/phase-defaults                           default durations (public)
///
/// /projects                                        list, create (admin)
/// /projects/{id}                                   get, update (admin)
/// /projects/{id}/status                            status move (reviewer)
/// /projects/{id}/phases[/{phase_number}]           list, update (admin)
/// /projects/{id}/team[/{member_id}]                list, add, remove (admin)
/// /projects/{id}/inspections                       list, schedule
/// /projects/{id}/documents                         list
///
/// /inspections/{id}                                get
/// /inspections/{id}/status                         status move
/// /inspections/{id}/responses[/{item_id}]          list, upsert
/// /inspections/{id}/photos                         list, add
///
/// /documents                                       register upload
/// /documents/{id}                                  get
/// /documents/{id}/actions                          review action
///
/// /triage/pending                                  grouped pending docs (admin)
/// /triage/new-project                              project from docs (admin)
/// /triage/link                                     link docs (admin)
///
/// /clients[/{id}]                                  list, create, get
/// /profiles                                        list (?role=)
/// /profiles/me                                     own profile
///
/// /notifications                                   list
/// /notifications/{id}/read                         mark read
/// /notifications/read-all                          mark all read
/// /notifications/unread-count                      unread count
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/statuses", lookups::statuses_router())
        .nest("/workflow", lookups::workflow_router())
        .nest("/wizard", lookups::wizard_router())
        .nest("/projects", project::router())
        .nest("/inspections", inspection::router())
        .nest("/documents", document::router())
        .nest("/triage", triage::router())
        .nest("/clients", client::router())
        .nest("/profiles", profile::router())
        .nest("/notifications", notification::router())
}
