//! Repository for the `categories` table.

use sqlx::PgPool;

use crate::models::category::{Category, CreateCategory};

/// Provides CRUD operations for equipment categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description)
             VALUES ($1, $2)
             RETURNING id, name, description",
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(pool)
        .await
    }

    /// List all categories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories ORDER BY name")
            .fetch_all(pool)
            .await
    }
}
