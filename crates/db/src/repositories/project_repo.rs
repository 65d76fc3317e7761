//! Repository for the `projects` table.

use slf_core::types::DbId;
use slf_core::wizard::NewProjectPlan;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::project::{Project, ProjectFilter, UpdateProject};

/// Column list shared across queries.
pub(crate) const COLUMNS: &str = "id, name, description, client_id, application_type, status, \
     location, city, priority, project_lead_id, admin_lead_id, created_by, phase_durations, \
     created_at, updated_at";

pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project with its five phases and initial team in one transaction.
    pub async fn create_with_plan(
        pool: &PgPool,
        plan: &NewProjectPlan,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let project = Self::insert_plan(&mut tx, plan).await?;
        tx.commit().await?;
        Ok(project)
    }

    /// Write a project plan inside an open transaction.
    pub(crate) async fn insert_plan(
        tx: &mut Transaction<'_, Postgres>,
        plan: &NewProjectPlan,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects \
                (name, description, client_id, application_type, status, location, city, \
                 priority, project_lead_id, admin_lead_id, created_by, phase_durations) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&plan.name)
            .bind(&plan.description)
            .bind(plan.client_id)
            .bind(plan.application_type.as_str())
            .bind(plan.status.as_str())
            .bind(&plan.location)
            .bind(&plan.city)
            .bind(plan.priority.as_str())
            .bind(plan.project_lead_id)
            .bind(plan.admin_lead_id)
            .bind(plan.created_by)
            .bind(Json(&plan.phase_durations))
            .fetch_one(&mut **tx)
            .await?;

        for phase in &plan.phases {
            sqlx::query(
                "INSERT INTO project_phases \
                    (project_id, phase_number, phase_name, estimated_duration, status, order_index) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(project.id)
            .bind(phase.phase_number)
            .bind(phase.phase_name)
            .bind(phase.estimated_duration)
            .bind(phase.status.as_str())
            .bind(phase.order_index)
            .execute(&mut **tx)
            .await?;
        }

        for member in &plan.team {
            sqlx::query(
                "INSERT INTO project_teams (project_id, user_id, role, assigned_by) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(project.id)
            .bind(member.user_id)
            .bind(member.role.as_str())
            .bind(plan.created_by)
            .execute(&mut **tx)
            .await?;
        }

        Ok(project)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects, newest first. Unset filters match everything.
    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects p \
             WHERE ($1::text IS NULL OR p.status = $1) \
               AND ($2::bigint IS NULL OR p.client_id = $2) \
               AND ($3::bigint IS NULL \
                    OR p.admin_lead_id = $3 OR p.created_by = $3 OR p.project_lead_id = $3 \
                    OR EXISTS (SELECT 1 FROM project_teams t \
                               WHERE t.project_id = p.id AND t.user_id = $3)) \
             ORDER BY p.created_at DESC, p.id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&filter.status)
            .bind(filter.client_id)
            .bind(filter.member_id)
            .fetch_all(pool)
            .await
    }

    /// Update project details. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                client_id = COALESCE($4, client_id), \
                location = COALESCE($5, location), \
                city = COALESCE($6, city), \
                priority = COALESCE($7, priority) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.client_id)
            .bind(&input.location)
            .bind(&input.city)
            .bind(&input.priority)
            .fetch_optional(pool)
            .await
    }

    /// Move a project to `next` only if it is still in `expected`.
    ///
    /// Returns `None` when the row is missing or its status has changed.
    pub async fn update_status_if(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        next: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = $3 \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(expected)
            .bind(next)
            .fetch_optional(pool)
            .await
    }
}
