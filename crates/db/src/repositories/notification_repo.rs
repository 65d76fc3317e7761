//! Repository for the `notifications` table.

use slf_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::notification::{CreateNotification, Notification};

const COLUMNS: &str =
    "id, recipient_id, sender_id, type, message, project_id, is_read, read_at, created_at";

const INSERT: &str = "INSERT INTO notifications (recipient_id, sender_id, type, message, project_id) \
     VALUES ($1, $2, $3, $4, $5) \
     RETURNING id";

pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification, returning the generated ID.
    pub async fn create(pool: &PgPool, input: &CreateNotification) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(INSERT)
            .bind(input.recipient_id)
            .bind(input.sender_id)
            .bind(&input.notification_type)
            .bind(&input.message)
            .bind(input.project_id)
            .fetch_one(pool)
            .await
    }

    pub(crate) async fn insert_inner(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateNotification,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(INSERT)
            .bind(input.recipient_id)
            .bind(input.sender_id)
            .bind(&input.notification_type)
            .bind(&input.message)
            .bind(input.project_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// List a user's notifications, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE recipient_id = $1 {filter} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark one of the user's notifications read. Returns `false` if it was
    /// not found for that user or was already read.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = true, read_at = NOW() \
             WHERE id = $1 AND recipient_id = $2 AND is_read = false",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns the number of notifications marked read.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = true, read_at = NOW() \
             WHERE recipient_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
