use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    gearguard_db::health_check(&pool).await.unwrap();

    // Verify all entity tables exist and are queryable.
    let tables = [
        "departments",
        "categories",
        "users",
        "user_sessions",
        "teams",
        "team_members",
        "work_centers",
        "equipment",
        "maintenance_requests",
        "request_technicians",
        "worksheets",
        "activity_logs",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}
