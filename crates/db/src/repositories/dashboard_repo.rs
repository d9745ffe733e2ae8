//! Aggregate count queries backing the dashboard summary endpoint.

use sqlx::PgPool;

/// A `(value, count)` pair from a GROUP BY query.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct CountByValue {
    pub value: String,
    pub count: i64,
}

/// Provides aggregate queries for dashboard widgets.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Request counts grouped by status.
    pub async fn requests_by_status(pool: &PgPool) -> Result<Vec<CountByValue>, sqlx::Error> {
        sqlx::query_as::<_, CountByValue>(
            "SELECT status AS value, COUNT(*) AS count
             FROM maintenance_requests GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Equipment counts grouped by status.
    pub async fn equipment_by_status(pool: &PgPool) -> Result<Vec<CountByValue>, sqlx::Error> {
        sqlx::query_as::<_, CountByValue>(
            "SELECT status AS value, COUNT(*) AS count
             FROM equipment GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Open request counts (status `new` or `in_progress`) grouped by priority.
    pub async fn open_requests_by_priority(
        pool: &PgPool,
    ) -> Result<Vec<CountByValue>, sqlx::Error> {
        sqlx::query_as::<_, CountByValue>(
            "SELECT priority AS value, COUNT(*) AS count
             FROM maintenance_requests
             WHERE status IN ('new', 'in_progress')
             GROUP BY priority ORDER BY priority",
        )
        .fetch_all(pool)
        .await
    }
}
