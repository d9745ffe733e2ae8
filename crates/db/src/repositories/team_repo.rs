//! Repository for the `teams` table and the `team_members` join table.

use gearguard_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::team::{CreateTeam, Team, UpdateTeam};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, specialization, description";

/// Provides CRUD operations for teams and their member sets.
pub struct TeamRepo;

impl TeamRepo {
    /// Insert a new team with its initial member set. The team row and the
    /// join rows commit atomically.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTeam,
        member_ids: &[DbId],
    ) -> Result<Team, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO teams (name, specialization, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let team = sqlx::query_as::<_, Team>(&query)
            .bind(&input.name)
            .bind(&input.specialization)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        insert_members(&mut *tx, team.id, member_ids).await?;

        tx.commit().await?;
        Ok(team)
    }

    /// Find a team by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all teams ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams ORDER BY name");
        sqlx::query_as::<_, Team>(&query).fetch_all(pool).await
    }

    /// Update a team. Only non-`None` fields in `input` are applied.
    ///
    /// `member_ids` present replaces the member set wholesale
    /// (delete-then-reinsert, even for an empty array); `None` leaves it
    /// untouched. Both writes commit atomically.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeam,
        member_ids: Option<&[DbId]>,
    ) -> Result<Option<Team>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE teams SET
                name = COALESCE($2, name),
                specialization = COALESCE($3, specialization),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let team = sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.specialization)
            .bind(&input.description)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(team) = team else {
            return Ok(None);
        };

        if let Some(member_ids) = member_ids {
            sqlx::query("DELETE FROM team_members WHERE team_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_members(&mut *tx, id, member_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(team))
    }

    /// Member user ids for a team. No ordering guarantee.
    pub async fn member_ids(pool: &PgPool, team_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT user_id FROM team_members WHERE team_id = $1")
                .bind(team_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(user_id,)| user_id).collect())
    }

    /// All `(team_id, user_id)` membership pairs, for stitching team lists.
    pub async fn memberships(pool: &PgPool) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as("SELECT team_id, user_id FROM team_members")
            .fetch_all(pool)
            .await
    }
}

/// Insert one join row per member id within the caller's transaction.
async fn insert_members(
    tx: &mut PgConnection,
    team_id: DbId,
    member_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    for user_id in member_ids {
        sqlx::query("INSERT INTO team_members (team_id, user_id) VALUES ($1, $2)")
            .bind(team_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }
    Ok(())
}
