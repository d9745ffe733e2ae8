//! Repository for the `departments` table.

use sqlx::PgPool;

use crate::models::department::{CreateDepartment, Department};

/// Provides CRUD operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// Insert a new department, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDepartment) -> Result<Department, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            "INSERT INTO departments (name, description)
             VALUES ($1, $2)
             RETURNING id, name, description",
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(pool)
        .await
    }

    /// List all departments ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>("SELECT id, name, description FROM departments ORDER BY name")
            .fetch_all(pool)
            .await
    }
}
