//! Integration tests for the repository layer against a real database:
//! - Project creation with phases and team in one transaction
//! - Compare-and-set status updates
//! - Team lead bookkeeping
//! - Pending document triage (all-or-nothing linking)
//! - Checklist upsert and notifications

use serde_json::json;
use slf_core::phases::PhaseDurations;
use slf_core::types::DbId;
use slf_core::wizard::ProjectForm;
use slf_db::models::client::CreateClient;
use slf_db::models::document::CreateDocument;
use slf_db::models::inspection::{CreateInspection, UpsertChecklistResponse};
use slf_db::models::profile::CreateProfile;
use slf_db::models::project::ProjectFilter;
use slf_db::models::team::CreateTeamMember;
use slf_db::repositories::{
    ChecklistRepo, ClientRepo, DocumentRepo, InspectionRepo, NotificationRepo, PhaseRepo,
    ProfileRepo, ProjectRepo, TeamRepo, TriageRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn profile(pool: &PgPool, name: &str, role: &str, client_id: Option<DbId>) -> DbId {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            full_name: name.to_string(),
            email: format!("{}@example.test", name.to_lowercase().replace(' ', ".")),
            role: role.to_string(),
            specialization: None,
            client_id,
        },
    )
    .await
    .unwrap()
    .id
}

async fn client(pool: &PgPool, name: &str, created_by: DbId) -> DbId {
    ClientRepo::create(
        pool,
        created_by,
        &CreateClient {
            name: name.to_string(),
            company_name: None,
            email: None,
            phone: None,
            address: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn form(client_id: DbId, lead_id: DbId, inspector_id: DbId) -> ProjectForm {
    ProjectForm {
        name: Some("Gedung Serbaguna".into()),
        application_type: Some("SLF_BARU".into()),
        location: Some("Jl. Merdeka 45".into()),
        city: Some("Bandung".into()),
        client_id: Some(client_id),
        phase_durations: PhaseDurations::default(),
        project_lead_id: Some(lead_id),
        inspector_ids: vec![inspector_id],
        ..Default::default()
    }
}

async fn upload(pool: &PgPool, uploader: DbId, name: &str) -> DbId {
    DocumentRepo::create(
        pool,
        uploader,
        &CreateDocument {
            project_id: None,
            document_type: "PERMIT".to_string(),
            name: name.to_string(),
            metadata: Some(json!({"building_info": {"name": "Ruko Melati", "address": "Jl. Melati 3", "city": "Bogor"}})),
            url: None,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_writes_phases_and_team(pool: PgPool) {
    let admin = profile(&pool, "Ayu Admin", "admin_lead", None).await;
    let lead = profile(&pool, "Budi Lead", "project_lead", None).await;
    let inspector = profile(&pool, "Citra Inspector", "inspector", None).await;
    let client_id = client(&pool, "PT Maju", admin).await;

    let plan = form(client_id, lead, inspector).into_plan(admin).unwrap();
    let project = ProjectRepo::create_with_plan(&pool, &plan).await.unwrap();

    assert_eq!(project.status, "draft");
    assert_eq!(project.project_lead_id, Some(lead));
    assert_eq!(project.admin_lead_id, Some(admin));
    assert_eq!(project.phase_durations["reporting"], 10);

    let phases = PhaseRepo::list_by_project(&pool, project.id).await.unwrap();
    let numbers: Vec<i16> = phases.iter().map(|p| p.phase_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert_eq!(phases[0].status, "in_progress");
    assert!(phases[1..].iter().all(|p| p.status == "pending"));

    let team = TeamRepo::list_by_project(&pool, project.id).await.unwrap();
    let roles: Vec<&str> = team.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, vec!["admin_lead", "project_lead", "inspector"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_team_insert_rolls_back_project(pool: PgPool) {
    let admin = profile(&pool, "Ayu Admin", "admin_lead", None).await;
    let client_id = client(&pool, "PT Maju", admin).await;

    // Neither the lead nor the inspector exists.
    let plan = form(client_id, 9_999, 9_998).into_plan(admin).unwrap();
    assert!(ProjectRepo::create_with_plan(&pool, &plan).await.is_err());

    let all = ProjectRepo::list(&pool, &ProjectFilter::default()).await.unwrap();
    assert!(all.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_compare_and_set(pool: PgPool) {
    let admin = profile(&pool, "Ayu Admin", "admin_lead", None).await;
    let lead = profile(&pool, "Budi Lead", "project_lead", None).await;
    let inspector = profile(&pool, "Citra Inspector", "inspector", None).await;
    let client_id = client(&pool, "PT Maju", admin).await;
    let plan = form(client_id, lead, inspector).into_plan(admin).unwrap();
    let project = ProjectRepo::create_with_plan(&pool, &plan).await.unwrap();

    let moved = ProjectRepo::update_status_if(&pool, project.id, "draft", "submitted")
        .await
        .unwrap();
    assert_eq!(moved.unwrap().status, "submitted");

    let stale = ProjectRepo::update_status_if(&pool, project.id, "draft", "cancelled")
        .await
        .unwrap();
    assert!(stale.is_none());

    let current = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(current.status, "submitted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_member_filter_finds_team_projects(pool: PgPool) {
    let admin = profile(&pool, "Ayu Admin", "admin_lead", None).await;
    let lead = profile(&pool, "Budi Lead", "project_lead", None).await;
    let inspector = profile(&pool, "Citra Inspector", "inspector", None).await;
    let outsider = profile(&pool, "Dewi Drafter", "drafter", None).await;
    let client_id = client(&pool, "PT Maju", admin).await;
    let plan = form(client_id, lead, inspector).into_plan(admin).unwrap();
    ProjectRepo::create_with_plan(&pool, &plan).await.unwrap();

    let mine = |id| ProjectFilter {
        member_id: Some(id),
        ..Default::default()
    };
    assert_eq!(ProjectRepo::list(&pool, &mine(inspector)).await.unwrap().len(), 1);
    assert!(ProjectRepo::list(&pool, &mine(outsider)).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_adding_and_removing_lead_updates_project(pool: PgPool) {
    let admin = profile(&pool, "Ayu Admin", "admin_lead", None).await;
    let lead = profile(&pool, "Budi Lead", "project_lead", None).await;
    let new_lead = profile(&pool, "Eko Lead", "project_lead", None).await;
    let inspector = profile(&pool, "Citra Inspector", "inspector", None).await;
    let client_id = client(&pool, "PT Maju", admin).await;
    let plan = form(client_id, lead, inspector).into_plan(admin).unwrap();
    let project = ProjectRepo::create_with_plan(&pool, &plan).await.unwrap();

    let member = TeamRepo::add(
        &pool,
        project.id,
        &CreateTeamMember {
            user_id: new_lead,
            role: "project_lead".into(),
        },
        admin,
    )
    .await
    .unwrap();
    let reloaded = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(reloaded.project_lead_id, Some(new_lead));

    assert!(TeamRepo::remove(&pool, project.id, member.id).await.unwrap());
    let reloaded = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(reloaded.project_lead_id, None);
    assert!(!TeamRepo::remove(&pool, project.id, member.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_lead_replaces_previous_lead_row(pool: PgPool) {
    let admin = profile(&pool, "Ayu Admin", "admin_lead", None).await;
    let lead = profile(&pool, "Budi Lead", "project_lead", None).await;
    let new_lead = profile(&pool, "Eko Lead", "project_lead", None).await;
    let inspector = profile(&pool, "Citra Inspector", "inspector", None).await;
    let client_id = client(&pool, "PT Maju", admin).await;
    let plan = form(client_id, lead, inspector).into_plan(admin).unwrap();
    let project = ProjectRepo::create_with_plan(&pool, &plan).await.unwrap();

    TeamRepo::add(
        &pool,
        project.id,
        &CreateTeamMember {
            user_id: new_lead,
            role: "project_lead".into(),
        },
        admin,
    )
    .await
    .unwrap();

    let leads: Vec<_> = TeamRepo::list_by_project(&pool, project.id)
        .await
        .unwrap()
        .into_iter()
        .filter(|m| m.role == "project_lead")
        .map(|m| m.user_id)
        .collect();
    assert_eq!(leads, vec![new_lead]);
    assert!(!TeamRepo::has_role(&pool, project.id, lead, "project_lead")
        .await
        .unwrap());

    // Removing the only lead row leaves the project without a lead.
    let member = TeamRepo::list_by_project(&pool, project.id)
        .await
        .unwrap()
        .into_iter()
        .find(|m| m.role == "project_lead")
        .unwrap();
    assert!(TeamRepo::remove(&pool, project.id, member.id).await.unwrap());
    let reloaded = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(reloaded.project_lead_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_member_violates_unique_constraint(pool: PgPool) {
    let admin = profile(&pool, "Ayu Admin", "admin_lead", None).await;
    let lead = profile(&pool, "Budi Lead", "project_lead", None).await;
    let inspector = profile(&pool, "Citra Inspector", "inspector", None).await;
    let client_id = client(&pool, "PT Maju", admin).await;
    let plan = form(client_id, lead, inspector).into_plan(admin).unwrap();
    let project = ProjectRepo::create_with_plan(&pool, &plan).await.unwrap();

    let err = TeamRepo::add(
        &pool,
        project.id,
        &CreateTeamMember {
            user_id: inspector,
            role: "inspector".into(),
        },
        admin,
    )
    .await
    .expect_err("inspector is already on the team");
    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.constraint(), Some("uq_project_teams_member"));
}

// ---------------------------------------------------------------------------
// Triage
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pending_documents_scoped_to_admin_clients(pool: PgPool) {
    let admin = profile(&pool, "Ayu Admin", "admin_lead", None).await;
    let other_admin = profile(&pool, "Fajar Admin", "admin_lead", None).await;
    let mine = client(&pool, "PT Maju", admin).await;
    let theirs = client(&pool, "PT Lain", other_admin).await;
    let my_uploader = profile(&pool, "Gita Client", "client", Some(mine)).await;
    let their_uploader = profile(&pool, "Hadi Client", "client", Some(theirs)).await;
    let loner = profile(&pool, "Indra Client", "client", None).await;

    upload(&pool, my_uploader, "imb.pdf").await;
    upload(&pool, their_uploader, "other.pdf").await;
    upload(&pool, loner, "orphan.pdf").await;

    let client_ids = ClientRepo::ids_for_admin(&pool, admin).await.unwrap();
    assert_eq!(client_ids, vec![mine]);
    let visible = TriageRepo::list_pending_for_clients(&pool, &client_ids).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "imb.pdf");
    assert_eq!(visible[0].uploader_client_id, Some(mine));

    let everything = TriageRepo::list_all_pending(&pool).await.unwrap();
    assert_eq!(everything.len(), 3);
    assert!(everything.iter().any(|d| d.uploader_client_id.is_none()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_is_all_or_nothing(pool: PgPool) {
    let admin = profile(&pool, "Ayu Admin", "admin_lead", None).await;
    let lead = profile(&pool, "Budi Lead", "project_lead", None).await;
    let inspector = profile(&pool, "Citra Inspector", "inspector", None).await;
    let client_id = client(&pool, "PT Maju", admin).await;
    let uploader = profile(&pool, "Gita Client", "client", Some(client_id)).await;
    let plan = form(client_id, lead, inspector).into_plan(admin).unwrap();
    let project = ProjectRepo::create_with_plan(&pool, &plan).await.unwrap();

    let a = upload(&pool, uploader, "a.pdf").await;
    let b = upload(&pool, uploader, "b.pdf").await;

    // One id does not exist: nothing is linked.
    let outcome = TriageRepo::link_documents(&pool, project.id, &[a, b, 424_242], admin)
        .await
        .unwrap();
    assert!(outcome.is_none());
    let pending = TriageRepo::list_all_pending(&pool).await.unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(NotificationRepo::unread_count(&pool, uploader).await.unwrap(), 0);

    let outcome = TriageRepo::link_documents(&pool, project.id, &[a, b], admin)
        .await
        .unwrap()
        .expect("both documents are pending");
    assert_eq!(outcome.documents.len(), 2);
    assert_eq!(outcome.notified_user_ids, vec![uploader]);
    assert!(TriageRepo::list_all_pending(&pool).await.unwrap().is_empty());

    let notifications = NotificationRepo::list_for_user(&pool, uploader, true, 10, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].notification_type, "documents_linked");

    // Already linked now.
    let again = TriageRepo::link_documents(&pool, project.id, &[a], admin)
        .await
        .unwrap();
    assert!(again.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_from_documents(pool: PgPool) {
    let admin = profile(&pool, "Ayu Admin", "admin_lead", None).await;
    let client_id = client(&pool, "PT Maju", admin).await;
    let uploader = profile(&pool, "Gita Client", "client", Some(client_id)).await;
    let doc = upload(&pool, uploader, "imb.pdf").await;

    let prefill = slf_core::triage::ProjectPrefill::from_metadata(&json!({
        "building_info": {"name": "Ruko Melati", "address": "Jl. Melati 3", "city": "Bogor"}
    }));
    let fields = slf_core::triage::TriageProjectFields {
        application_type: Some("PBG_BARU".into()),
        client_id: Some(client_id),
        ..Default::default()
    };
    let plan = slf_core::triage::triage_plan(fields, prefill, admin).unwrap();

    let outcome = TriageRepo::create_project_from_documents(&pool, &plan, &[doc])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(outcome.project.name, "Ruko Melati");
    assert_eq!(outcome.project.city.as_deref(), Some("Bogor"));
    assert_eq!(outcome.documents[0].project_id, Some(outcome.project.id));
    assert_eq!(PhaseRepo::list_by_project(&pool, outcome.project.id).await.unwrap().len(), 5);
    assert!(TeamRepo::has_role(&pool, outcome.project.id, admin, "admin_lead")
        .await
        .unwrap());

    // Re-using the same document rolls back the second project entirely.
    let plan = slf_core::triage::triage_plan(
        slf_core::triage::TriageProjectFields {
            name: Some("Second".into()),
            application_type: Some("PBG_BARU".into()),
            location: Some("Jl. Kedua 2".into()),
            ..Default::default()
        },
        Default::default(),
        admin,
    )
    .unwrap();
    let none = TriageRepo::create_project_from_documents(&pool, &plan, &[doc])
        .await
        .unwrap();
    assert!(none.is_none());
    assert_eq!(ProjectRepo::list(&pool, &ProjectFilter::default()).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Inspections and notifications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inspection_lifecycle_and_checklist_upsert(pool: PgPool) {
    let admin = profile(&pool, "Ayu Admin", "admin_lead", None).await;
    let lead = profile(&pool, "Budi Lead", "project_lead", None).await;
    let inspector = profile(&pool, "Citra Inspector", "inspector", None).await;
    let client_id = client(&pool, "PT Maju", admin).await;
    let plan = form(client_id, lead, inspector).into_plan(admin).unwrap();
    let project = ProjectRepo::create_with_plan(&pool, &plan).await.unwrap();

    let inspection = InspectionRepo::create(
        &pool,
        project.id,
        &CreateInspection {
            inspector_id: inspector,
            scheduled_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            start_time: None,
            end_time: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(inspection.status, "scheduled");

    let started = InspectionRepo::update_status_if(&pool, inspection.id, "scheduled", "in_progress")
        .await
        .unwrap()
        .unwrap();
    assert!(started.completed_at.is_none());

    let answer = |value: &str| UpsertChecklistResponse {
        template_id: Some("slf-structure".into()),
        response: json!({"value": value}),
        photogeotag_data: None,
    };
    ChecklistRepo::upsert(&pool, inspection.id, "struct-01", inspector, &answer("ok"))
        .await
        .unwrap();
    ChecklistRepo::upsert(&pool, inspection.id, "struct-01", inspector, &answer("crack"))
        .await
        .unwrap();
    let responses = ChecklistRepo::list_by_inspection(&pool, inspection.id).await.unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].response["value"], "crack");

    let done = InspectionRepo::update_status_if(&pool, inspection.id, "in_progress", "completed")
        .await
        .unwrap()
        .unwrap();
    assert!(done.completed_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_notification_read_flow(pool: PgPool) {
    let user = profile(&pool, "Ayu Admin", "admin_lead", None).await;
    for message in ["one", "two"] {
        NotificationRepo::create(
            &pool,
            &slf_db::models::notification::CreateNotification {
                recipient_id: user,
                sender_id: None,
                notification_type: "status_changed".into(),
                message: message.into(),
                project_id: None,
            },
        )
        .await
        .unwrap();
    }
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 2);

    let list = NotificationRepo::list_for_user(&pool, user, false, 10, 0).await.unwrap();
    assert!(NotificationRepo::mark_read(&pool, list[0].id, user).await.unwrap());
    assert!(!NotificationRepo::mark_read(&pool, list[0].id, user).await.unwrap());
    assert_eq!(NotificationRepo::mark_all_read(&pool, user).await.unwrap(), 1);
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 0);
}
