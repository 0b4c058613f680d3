/// Team endpoints
///
/// - `POST /api/create-team`
/// - `POST /api/get-teams`
/// - `POST /api/add-team-member`
/// - `POST /api/get-team-members`
/// - `POST /api/get-team-member-details`
///
/// Team-scoped handlers run [`authorize_team`] first and return its flags
/// unchanged when the caller is not the owner; the operation itself only runs
/// for [`TeamAccess::Owner`].

use crate::{app::AppState, error::ApiResult, routes::auth::NO_ID};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use teamreg_shared::{
    auth::{
        authorization::{authenticate, authorize_team, AccessFlags, TeamAccess},
        cookies::CallerToken,
    },
    db::error::StoreError,
    ids::RecordId,
    models::{
        team::Team,
        team_member::{NewTeamMember, TeamMember, TeamMemberDetails},
    },
};

/// Team as listed to its owner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamSummary {
    pub id: String,
    pub name: String,
}

impl From<Team> for TeamSummary {
    fn from(team: Team) -> Self {
        Self {
            id: team.id.into_inner(),
            name: team.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub team_name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTeamResponse {
    pub team_id: String,
    pub success: bool,
    pub logged_in: bool,
}

/// `team_ids` carries full summaries, not bare identifiers; clients key on
/// that field name
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetTeamsResponse {
    pub team_ids: Vec<TeamSummary>,
    pub success: bool,
    pub logged_in: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddTeamMemberRequest {
    pub team_id: String,

    #[serde(flatten)]
    pub member: NewTeamMember,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddTeamMemberResponse {
    pub member_id: String,
    pub success: bool,

    #[serde(flatten)]
    pub access: AccessFlags,

    pub space_available: bool,
}

#[derive(Debug, Deserialize)]
pub struct GetTeamMembersRequest {
    pub team_id: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetTeamMembersResponse {
    pub team_member_ids: Vec<String>,
    pub success: bool,

    #[serde(flatten)]
    pub access: AccessFlags,
}

#[derive(Debug, Deserialize)]
pub struct GetTeamMemberDetailsRequest {
    pub team_id: String,
    pub team_member_id: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetTeamMemberDetailsResponse {
    pub team_member_details: Option<TeamMemberDetails>,
    pub success: bool,

    #[serde(flatten)]
    pub access: AccessFlags,

    pub team_member_exists: bool,
}

/// Create a team owned by the caller
///
/// ```text
/// POST /api/create-team
/// { "team_name": "Team A" }
/// ```
pub async fn create_team(
    State(state): State<AppState>,
    CallerToken(token): CallerToken,
    Json(req): Json<CreateTeamRequest>,
) -> ApiResult<Json<CreateTeamResponse>> {
    let Ok(user_id) = authenticate(token.as_ref()).await else {
        return Ok(Json(CreateTeamResponse {
            team_id: NO_ID.to_string(),
            success: false,
            logged_in: false,
        }));
    };

    match Team::create(&state.db, &user_id, &req.team_name).await {
        Ok(team_id) => Ok(Json(CreateTeamResponse {
            team_id: team_id.into_inner(),
            success: true,
            logged_in: true,
        })),
        Err(StoreError::DuplicateTeam(_)) => Ok(Json(CreateTeamResponse {
            team_id: NO_ID.to_string(),
            success: false,
            logged_in: true,
        })),
        Err(e) => Err(e.into()),
    }
}

/// List the caller's teams
pub async fn get_teams(
    State(state): State<AppState>,
    CallerToken(token): CallerToken,
) -> ApiResult<Json<GetTeamsResponse>> {
    let Ok(user_id) = authenticate(token.as_ref()).await else {
        return Ok(Json(GetTeamsResponse {
            team_ids: Vec::new(),
            success: false,
            logged_in: false,
        }));
    };

    let teams = Team::list_by_user(&state.db, &user_id).await?;

    Ok(Json(GetTeamsResponse {
        team_ids: teams.into_iter().map(TeamSummary::from).collect(),
        success: true,
        logged_in: true,
    }))
}

/// Add a member to one of the caller's teams
///
/// ```text
/// POST /api/add-team-member
/// {
///   "team_id": "482913",
///   "name": "Asha", "email": "asha@example.com", "phone_number": "9876543210",
///   "grade": "11", "school_name": "City High", "city": "Pune", "pin_code": "411001"
/// }
/// ```
///
/// A full team reports `space_available=false` and stores nothing.
pub async fn add_team_member(
    State(state): State<AppState>,
    CallerToken(token): CallerToken,
    Json(req): Json<AddTeamMemberRequest>,
) -> ApiResult<Json<AddTeamMemberResponse>> {
    let team_id = RecordId::new(req.team_id);
    let access = authorize_team(&state.db, token.as_ref(), &team_id).await?;

    let rejected = |access: AccessFlags, space_available: bool| {
        Json(AddTeamMemberResponse {
            member_id: NO_ID.to_string(),
            success: false,
            access,
            space_available,
        })
    };

    if !access.is_owner() {
        return Ok(rejected(access.flags(), true));
    }

    match TeamMember::add(&state.db, &team_id, &req.member).await {
        Ok(member_id) => Ok(Json(AddTeamMemberResponse {
            member_id: member_id.into_inner(),
            success: true,
            access: AccessFlags::GRANTED,
            space_available: true,
        })),
        Err(StoreError::TeamFull) => Ok(rejected(AccessFlags::GRANTED, false)),
        Err(StoreError::InvalidTeamId) => Ok(rejected(
            AccessFlags {
                team_created: false,
                ..AccessFlags::GRANTED
            },
            true,
        )),
        Err(e) => Err(e.into()),
    }
}

/// List member identifiers of one of the caller's teams
pub async fn get_team_members(
    State(state): State<AppState>,
    CallerToken(token): CallerToken,
    Json(req): Json<GetTeamMembersRequest>,
) -> ApiResult<Json<GetTeamMembersResponse>> {
    let team_id = RecordId::new(req.team_id);
    let access = authorize_team(&state.db, token.as_ref(), &team_id).await?;

    if !access.is_owner() {
        return Ok(Json(GetTeamMembersResponse {
            team_member_ids: Vec::new(),
            success: false,
            access: access.flags(),
        }));
    }

    let ids = TeamMember::list_ids(&state.db, &team_id).await?;

    Ok(Json(GetTeamMembersResponse {
        team_member_ids: ids.into_iter().map(RecordId::into_inner).collect(),
        success: true,
        access: AccessFlags::GRANTED,
    }))
}

/// Disclose one member's details to the team owner
pub async fn get_team_member_details(
    State(state): State<AppState>,
    CallerToken(token): CallerToken,
    Json(req): Json<GetTeamMemberDetailsRequest>,
) -> ApiResult<Json<GetTeamMemberDetailsResponse>> {
    let team_id = RecordId::new(req.team_id);
    let access = authorize_team(&state.db, token.as_ref(), &team_id).await?;

    if let TeamAccess::Owner(_) = access {
        let member_id = RecordId::new(req.team_member_id);

        return match TeamMember::find_details(&state.db, &team_id, &member_id).await {
            Ok(details) => Ok(Json(GetTeamMemberDetailsResponse {
                team_member_details: Some(details),
                success: true,
                access: AccessFlags::GRANTED,
                team_member_exists: true,
            })),
            Err(StoreError::NoSuchMember) => Ok(Json(GetTeamMemberDetailsResponse {
                team_member_details: None,
                success: false,
                access: AccessFlags::GRANTED,
                team_member_exists: false,
            })),
            Err(e) => Err(e.into()),
        };
    }

    Ok(Json(GetTeamMemberDetailsResponse {
        team_member_details: None,
        success: false,
        access: access.flags(),
        team_member_exists: true,
    }))
}
