/// Team model and database operations
///
/// A team has exactly one owning user for its lifetime. One user may own
/// any number of teams.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE teams (
///     id TEXT NOT NULL,
///     user_id TEXT NOT NULL,
///     name TEXT NOT NULL,
///     CONSTRAINT teams_pkey PRIMARY KEY (id),
///     CONSTRAINT teams_user_id_fkey FOREIGN KEY (user_id) REFERENCES users (id)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info, warn};

use crate::db::error::{StoreError, Violation};
use crate::ids::RecordId;

/// Team row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: RecordId,

    /// Owning user
    pub user_id: RecordId,

    pub name: String,
}

impl Team {
    /// Creates a team owned by `user_id`
    ///
    /// The owner is not looked up first; the foreign key does that.
    ///
    /// # Errors
    ///
    /// - `StoreError::DuplicateTeam` for any constraint the store rejects
    ///   (unknown owner, identifier collision)
    /// - `StoreError::Database` for anything else
    pub async fn create(
        pool: &PgPool,
        user_id: &RecordId,
        name: &str,
    ) -> Result<RecordId, StoreError> {
        let id = RecordId::generate();

        let result = sqlx::query("INSERT INTO teams (id, user_id, name) VALUES ($1, $2, $3)")
            .bind(&id)
            .bind(user_id)
            .bind(name)
            .execute(pool)
            .await;

        match result {
            Ok(_) => {
                info!(team_id = %id, user_id = %user_id, "Created team");
                Ok(id)
            }
            Err(e) => match Violation::from_sqlx(&e) {
                Some(violation) => {
                    warn!(user_id = %user_id, constraint = %violation.describe(), "Team insert rejected");
                    Err(StoreError::DuplicateTeam(violation.describe()))
                }
                None => Err(StoreError::Database(e)),
            },
        }
    }

    /// Returns the owning user of `team_id`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidTeamId` if the team does not exist
    pub async fn find_owner(pool: &PgPool, team_id: &RecordId) -> Result<RecordId, StoreError> {
        let owner: Option<RecordId> = sqlx::query_scalar("SELECT user_id FROM teams WHERE id = $1")
            .bind(team_id)
            .fetch_optional(pool)
            .await?;

        debug!(team_id = %team_id, found = owner.is_some(), "Resolved team owner");
        owner.ok_or(StoreError::InvalidTeamId)
    }

    /// Lists the teams owned by `user_id`, in store order
    pub async fn list_by_user(pool: &PgPool, user_id: &RecordId) -> Result<Vec<Self>, StoreError> {
        let teams = sqlx::query_as::<_, Team>(
            "SELECT id, user_id, name FROM teams WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(teams)
    }

    /// Locks the team row for the rest of `tx`
    ///
    /// Returns false if the team does not exist. Concurrent callers locking the
    /// same team queue behind this transaction until it commits or rolls back.
    pub async fn lock_tx(
        tx: &mut Transaction<'_, Postgres>,
        team_id: &RecordId,
    ) -> Result<bool, sqlx::Error> {
        let locked: Option<RecordId> =
            sqlx::query_scalar("SELECT id FROM teams WHERE id = $1 FOR UPDATE")
                .bind(team_id)
                .fetch_optional(&mut **tx)
                .await?;

        Ok(locked.is_some())
    }
}
