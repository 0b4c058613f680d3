/// Ownership-based access control
///
/// Every privileged operation runs the same protocol before doing any work:
///
/// 1. Verify the caller's identity token. On failure stop: the caller is
///    not logged in and the store is never queried.
/// 2. For team-scoped operations, resolve the team's owner and compare it to
///    the verified identity. A missing team and a foreign team are reported
///    separately.
/// 3. Only an owner proceeds to the operation itself.
///
/// The outcome is a [`TeamAccess`], and [`AccessFlags`] renders it as the
/// boolean flags carried by every team-scoped response.
///
/// # Example
///
/// ```no_run
/// use teamreg_shared::auth::authorization::{authorize_team, TeamAccess};
/// use teamreg_shared::auth::identity::IdentityToken;
/// use teamreg_shared::ids::RecordId;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, token: IdentityToken) -> Result<(), Box<dyn std::error::Error>> {
/// let team_id = RecordId::new("555555");
///
/// match authorize_team(&pool, Some(&token), &team_id).await? {
///     TeamAccess::Owner(user_id) => println!("{} may modify {}", user_id, team_id),
///     other => println!("denied: {:?}", other.flags()),
/// }
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, warn};

use super::identity::{AuthenticationFailure, IdentityToken};
use super::secure_hash::offload;
use crate::db::error::StoreError;
use crate::ids::RecordId;
use crate::models::team::Team;

/// Result of checking a caller against a team
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamAccess {
    /// No token, or the token failed verification
    Unauthenticated,

    /// Authenticated, but the team does not exist
    UnknownTeam,

    /// Authenticated, but someone else owns the team
    NotOwner,

    /// Authenticated owner of the team
    Owner(RecordId),
}

/// Authorization flags shared by every team-scoped response
///
/// A flag that does not describe the failure keeps its `true` value, so
/// exactly the failing check shows up as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessFlags {
    pub logged_in: bool,
    pub team_created: bool,
    pub user_team_match: bool,
}

impl AccessFlags {
    pub const GRANTED: AccessFlags = AccessFlags {
        logged_in: true,
        team_created: true,
        user_team_match: true,
    };
}

impl TeamAccess {
    pub fn flags(&self) -> AccessFlags {
        match self {
            TeamAccess::Unauthenticated => AccessFlags {
                logged_in: false,
                ..AccessFlags::GRANTED
            },
            TeamAccess::UnknownTeam => AccessFlags {
                logged_in: true,
                team_created: false,
                user_team_match: false,
            },
            TeamAccess::NotOwner => AccessFlags {
                user_team_match: false,
                ..AccessFlags::GRANTED
            },
            TeamAccess::Owner(_) => AccessFlags::GRANTED,
        }
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, TeamAccess::Owner(_))
    }
}

/// Verifies the presented token, if any, on the blocking pool
///
/// An absent token fails exactly like a forged one.
pub async fn authenticate(token: Option<&IdentityToken>) -> Result<RecordId, AuthenticationFailure> {
    let token = token.ok_or(AuthenticationFailure)?.clone();

    match offload(move || Ok(token.verify())).await {
        Ok(verified) => verified,
        Err(e) => {
            warn!(error = %e, "Identity verification did not complete");
            Err(AuthenticationFailure)
        }
    }
}

/// Runs the full ownership check for `team_id`
///
/// # Errors
///
/// Only unexpected store failures are errors; every access decision is a
/// [`TeamAccess`] value.
pub async fn authorize_team(
    pool: &PgPool,
    token: Option<&IdentityToken>,
    team_id: &RecordId,
) -> Result<TeamAccess, StoreError> {
    let user_id = match authenticate(token).await {
        Ok(user_id) => user_id,
        Err(AuthenticationFailure) => return Ok(TeamAccess::Unauthenticated),
    };

    let owner = match Team::find_owner(pool, team_id).await {
        Ok(owner) => owner,
        Err(StoreError::InvalidTeamId) => return Ok(TeamAccess::UnknownTeam),
        Err(e) => return Err(e),
    };

    if owner != user_id {
        warn!(team_id = %team_id, user_id = %user_id, "Team access denied: not the owner");
        return Ok(TeamAccess::NotOwner);
    }

    debug!(team_id = %team_id, user_id = %user_id, "Team access granted");
    Ok(TeamAccess::Owner(user_id))
}
