//! Repository for the `project_teams` table.

use slf_core::roles::ROLE_PROJECT_LEAD;
use slf_core::types::DbId;
use sqlx::PgPool;

use crate::models::team::{CreateTeamMember, ProjectTeamMember, TeamMemberWithProfile};

const COLUMNS: &str = "id, project_id, user_id, role, assigned_at, assigned_by";

pub struct TeamRepo;

impl TeamRepo {
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TeamMemberWithProfile>, sqlx::Error> {
        sqlx::query_as::<_, TeamMemberWithProfile>(
            "SELECT t.id, t.project_id, t.user_id, t.role, t.assigned_at, t.assigned_by, \
                    p.full_name, p.email, p.specialization \
             FROM project_teams t \
             JOIN profiles p ON p.id = t.user_id \
             WHERE t.project_id = $1 \
             ORDER BY t.assigned_at, t.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Add a member. Adding a `project_lead` replaces any previous lead row
    /// and sets `projects.project_lead_id`.
    pub async fn add(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateTeamMember,
        assigned_by: DbId,
    ) -> Result<ProjectTeamMember, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO project_teams (project_id, user_id, role, assigned_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let member = sqlx::query_as::<_, ProjectTeamMember>(&query)
            .bind(project_id)
            .bind(input.user_id)
            .bind(&input.role)
            .bind(assigned_by)
            .fetch_one(&mut *tx)
            .await?;

        if member.role == ROLE_PROJECT_LEAD {
            sqlx::query(
                "DELETE FROM project_teams \
                 WHERE project_id = $1 AND role = $2 AND user_id <> $3",
            )
            .bind(project_id)
            .bind(ROLE_PROJECT_LEAD)
            .bind(member.user_id)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE projects SET project_lead_id = $2 WHERE id = $1")
                .bind(project_id)
                .bind(member.user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(member)
    }

    /// Remove a member row. Removing the current project lead clears
    /// `projects.project_lead_id`. Returns `false` if no such member.
    pub async fn remove(
        pool: &PgPool,
        project_id: DbId,
        member_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "DELETE FROM project_teams WHERE id = $1 AND project_id = $2 RETURNING {COLUMNS}"
        );
        let removed = sqlx::query_as::<_, ProjectTeamMember>(&query)
            .bind(member_id)
            .bind(project_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(removed) = removed else {
            return Ok(false);
        };

        if removed.role == ROLE_PROJECT_LEAD {
            sqlx::query(
                "UPDATE projects SET project_lead_id = NULL \
                 WHERE id = $1 AND project_lead_id = $2",
            )
            .bind(project_id)
            .bind(removed.user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Whether `user_id` holds `role` on the project.
    pub async fn has_role(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM project_teams \
                            WHERE project_id = $1 AND user_id = $2 AND role = $3)",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(pool)
        .await
    }

    /// Whether `user_id` holds any role on the project.
    pub async fn is_member(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM project_teams WHERE project_id = $1 AND user_id = $2)",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Distinct profile ids on the project team, including the project's
    /// lead and admin columns.
    pub async fn member_user_ids(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM project_teams WHERE project_id = $1 \
             UNION \
             SELECT project_lead_id FROM projects WHERE id = $1 AND project_lead_id IS NOT NULL \
             UNION \
             SELECT admin_lead_id FROM projects WHERE id = $1 AND admin_lead_id IS NOT NULL \
             ORDER BY 1",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}
