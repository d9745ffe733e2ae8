//! User entity model and DTOs.

use gearguard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash and reset-token digest -- NEVER serialize this
/// to API responses directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub department_id: Option<DbId>,
    pub is_active: bool,
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Safe user representation for API responses (no secrets).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub department_id: Option<DbId>,
    pub is_active: bool,
    /// Teams this user belongs to, stitched from `team_members`.
    pub team_ids: Vec<DbId>,
    pub created_at: Timestamp,
}

impl UserResponse {
    /// Build a response from a row plus its stitched team memberships.
    pub fn from_user(user: &User, team_ids: Vec<DbId>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            department_id: user.department_id,
            is_active: user.is_active,
            team_ids,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. `password_hash` is already hashed by the
/// caller; plaintext passwords never reach this layer.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub department_id: Option<DbId>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub department_id: Option<DbId>,
    pub is_active: Option<bool>,
}
