use sqlx::PgPool;

/// Connect, migrate, and verify the schema is in place.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    slf_db::health_check(&pool).await.unwrap();

    let tables = [
        "profiles",
        "clients",
        "projects",
        "project_phases",
        "project_teams",
        "documents",
        "inspections",
        "checklist_responses",
        "inspection_photos",
        "notifications",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The status CHECK constraint rejects literals outside the lifecycle.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_status_check_constraint(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO projects (name, application_type, status) VALUES ('X', 'SLF_BARU', 'approved')",
    )
    .execute(&pool)
    .await;

    let err = result.expect_err("unknown status must be rejected");
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("ck_projects_status"));
}
