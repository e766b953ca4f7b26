//! Team HTTP handlers.
//!
//! ```text
//! POST /team/add
//! GET  /team/get?team_name=backend
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewTeamMember, Team, User};
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Member entry in a team creation request.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TeamMemberPayload {
    /// Opaque user id.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Initial activity flag.
    pub is_active: bool,
}

/// Request body for `POST /team/add`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TeamRequest {
    /// Unique team name.
    pub team_name: String,
    /// Members to insert or move onto the team.
    pub members: Vec<TeamMemberPayload>,
}

/// Team member in API responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamMemberDto {
    /// Opaque user id.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Current activity flag.
    pub is_active: bool,
}

impl From<User> for TeamMemberDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            is_active: user.is_active,
        }
    }
}

/// Team in API responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamDto {
    /// Team name.
    pub team_name: String,
    /// Current roster.
    pub members: Vec<TeamMemberDto>,
}

impl From<Team> for TeamDto {
    fn from(team: Team) -> Self {
        Self {
            team_name: team.name,
            members: team.members.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response body for `POST /team/add`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamCreateResponse {
    /// The persisted team.
    pub team: TeamDto,
}

/// Query parameters for `GET /team/get`.
#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    /// Name of the team to fetch.
    pub team_name: Option<String>,
}

/// Create a team and upsert its members.
#[utoipa::path(
    post,
    path = "/team/add",
    request_body = TeamRequest,
    responses(
        (status = 201, description = "Team created", body = TeamCreateResponse),
        (status = 400, description = "Team already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["teams"],
    operation_id = "addTeam"
)]
#[post("/add")]
pub async fn add_team(
    state: web::Data<HttpState>,
    payload: web::Json<TeamRequest>,
) -> ApiResult<HttpResponse> {
    let TeamRequest { team_name, members } = payload.into_inner();
    let members: Vec<NewTeamMember> = members
        .into_iter()
        .map(|member| NewTeamMember {
            id: member.user_id,
            username: member.username,
            is_active: member.is_active,
        })
        .collect();

    let team = state.teams.create_team(&team_name, members).await?;

    Ok(HttpResponse::Created().json(TeamCreateResponse { team: team.into() }))
}

/// Fetch a team and its roster.
#[utoipa::path(
    get,
    path = "/team/get",
    params(("team_name" = Option<String>, Query, description = "Name of the team")),
    responses(
        (status = 200, description = "Team with members", body = TeamDto),
        (status = 404, description = "Team not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["teams"],
    operation_id = "getTeam"
)]
#[get("/get")]
pub async fn get_team(
    state: web::Data<HttpState>,
    query: web::Query<TeamQuery>,
) -> ApiResult<HttpResponse> {
    let Some(team_name) = query
        .into_inner()
        .team_name
        .filter(|name| !name.is_empty())
    else {
        return Err(Error::not_found("team not found").into());
    };

    let team = state.teams.team_roster(&team_name).await?;

    Ok(HttpResponse::Ok().json(TeamDto::from(team)))
}
