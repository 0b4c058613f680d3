/// Team member model and database operations
///
/// Members are contact/school records attached to a team. A team holds at
/// most [`MAX_TEAM_MEMBERS`] of them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE team_members (
///     id TEXT NOT NULL,
///     team_id TEXT NOT NULL,
///     name TEXT NOT NULL,
///     email TEXT NOT NULL,
///     phone_number TEXT NOT NULL,
///     grade TEXT NOT NULL,
///     school_name TEXT NOT NULL,
///     city TEXT NOT NULL,
///     pin_code TEXT NOT NULL,
///     CONSTRAINT team_members_pkey PRIMARY KEY (id),
///     CONSTRAINT team_members_team_id_fkey FOREIGN KEY (team_id) REFERENCES teams (id)
/// );
/// ```
///
/// # Capacity
///
/// [`TeamMember::add`] runs existence check, count and insert in one
/// transaction that first takes a row lock on the team (`SELECT ... FOR
/// UPDATE`). Two concurrent adds to the same team are serialized on that
/// lock, so both can never observe a count of 3 and both insert.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, info, warn};

use super::team::Team;
use crate::db::error::{constraints, StoreError, Violation};
use crate::ids::RecordId;

/// Maximum number of members per team
pub const MAX_TEAM_MEMBERS: i64 = 4;

/// Fields supplied when adding a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeamMember {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub grade: String,
    pub school_name: String,
    pub city: String,
    pub pin_code: String,
}

/// Stored member details, as disclosed to the team owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeamMemberDetails {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub grade: String,
    pub school_name: String,
    pub city: String,
    pub pin_code: String,
    pub team_id: RecordId,
}

pub struct TeamMember;

impl TeamMember {
    /// Adds a member to `team_id`
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidTeamId` if the team does not exist
    /// - `StoreError::TeamFull` if it already has [`MAX_TEAM_MEMBERS`]
    /// - `StoreError::IdentifierCollision` if the generated id is taken
    /// - `StoreError::Database` for anything else
    ///
    /// Nothing is written unless the insert commits.
    pub async fn add(
        pool: &PgPool,
        team_id: &RecordId,
        member: &NewTeamMember,
    ) -> Result<RecordId, StoreError> {
        let mut tx = pool.begin().await?;

        if !Team::lock_tx(&mut tx, team_id).await? {
            debug!(team_id = %team_id, "Add member to unknown team");
            return Err(StoreError::InvalidTeamId);
        }

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM team_members WHERE team_id = $1")
                .bind(team_id)
                .fetch_one(&mut *tx)
                .await?;

        if count >= MAX_TEAM_MEMBERS {
            warn!(team_id = %team_id, count, "Add member rejected: team full");
            return Err(StoreError::TeamFull);
        }

        let id = RecordId::generate();
        let inserted = sqlx::query(
            r#"
            INSERT INTO team_members
                (id, team_id, name, email, phone_number, grade, school_name, city, pin_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&id)
        .bind(team_id)
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone_number)
        .bind(&member.grade)
        .bind(&member.school_name)
        .bind(&member.city)
        .bind(&member.pin_code)
        .execute(&mut *tx)
        .await;

        if let Err(e) = inserted {
            return Err(match Violation::from_sqlx(&e) {
                Some(v) if v.is_constraint(constraints::TEAM_MEMBERS_PKEY) => {
                    warn!(team_id = %team_id, "Generated member id collided");
                    StoreError::IdentifierCollision("team_members".to_string())
                }
                _ => StoreError::Database(e),
            });
        }

        tx.commit().await?;

        info!(team_id = %team_id, member_id = %id, members = count + 1, "Added team member");
        Ok(id)
    }

    /// Lists member identifiers of `team_id`
    ///
    /// An unknown team yields an empty list, not an error.
    pub async fn list_ids(pool: &PgPool, team_id: &RecordId) -> Result<Vec<RecordId>, StoreError> {
        let ids: Vec<RecordId> =
            sqlx::query_scalar("SELECT id FROM team_members WHERE team_id = $1")
                .bind(team_id)
                .fetch_all(pool)
                .await?;

        Ok(ids)
    }

    /// Loads one member's details
    ///
    /// Matches on both identifiers, so a member id from another team is
    /// reported exactly like a nonexistent one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoSuchMember` if no row matches both
    pub async fn find_details(
        pool: &PgPool,
        team_id: &RecordId,
        member_id: &RecordId,
    ) -> Result<TeamMemberDetails, StoreError> {
        let details = sqlx::query_as::<_, TeamMemberDetails>(
            r#"
            SELECT name, email, phone_number, grade, school_name, city, pin_code, team_id
            FROM team_members
            WHERE id = $1 AND team_id = $2
            "#,
        )
        .bind(member_id)
        .bind(team_id)
        .fetch_optional(pool)
        .await?;

        details.ok_or(StoreError::NoSuchMember)
    }
}
