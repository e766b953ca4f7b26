//! User HTTP handlers.
//!
//! ```text
//! POST /users/setIsActive
//! GET  /users/getReview?user_id=u1
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, PrStatus, PullRequestSummary, User};
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /users/setIsActive`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SetIsActiveRequest {
    /// User whose flag changes.
    pub user_id: String,
    /// New activity flag.
    pub is_active: bool,
}

/// User in API responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    /// Opaque user id.
    pub user_id: String,
    /// Display name.
    pub username: String,
    /// Current team affiliation.
    pub team_name: String,
    /// Current activity flag.
    pub is_active: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            team_name: user.team_name,
            is_active: user.is_active,
        }
    }
}

/// Response body for `POST /users/setIsActive`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetIsActiveResponse {
    /// The updated user.
    pub user: UserDto,
}

/// Query parameters for `GET /users/getReview`.
#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    /// Reviewer to list pull requests for.
    pub user_id: Option<String>,
}

/// Compact pull request entry in the review listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PullRequestSummaryDto {
    /// Pull request id.
    pub pull_request_id: String,
    /// Title of the change.
    pub pull_request_name: String,
    /// Authoring user.
    pub author_id: String,
    /// Lifecycle state.
    pub status: PrStatus,
}

impl From<PullRequestSummary> for PullRequestSummaryDto {
    fn from(summary: PullRequestSummary) -> Self {
        Self {
            pull_request_id: summary.id,
            pull_request_name: summary.name,
            author_id: summary.author_id,
            status: summary.status,
        }
    }
}

/// Response body for `GET /users/getReview`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserReviewResponse {
    /// The validated reviewer id.
    pub user_id: String,
    /// Pull requests currently assigned to the reviewer.
    pub pull_requests: Vec<PullRequestSummaryDto>,
}

/// Flip a user's activity flag.
#[utoipa::path(
    post,
    path = "/users/setIsActive",
    request_body = SetIsActiveRequest,
    responses(
        (status = 200, description = "Updated user", body = SetIsActiveResponse),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "setIsActive"
)]
#[post("/setIsActive")]
pub async fn set_is_active(
    state: web::Data<HttpState>,
    payload: web::Json<SetIsActiveRequest>,
) -> ApiResult<HttpResponse> {
    let SetIsActiveRequest { user_id, is_active } = payload.into_inner();

    let user = state.users.set_active(&user_id, is_active).await?;

    Ok(HttpResponse::Ok().json(SetIsActiveResponse { user: user.into() }))
}

/// List the pull requests a user is expected to review.
#[utoipa::path(
    get,
    path = "/users/getReview",
    params(("user_id" = Option<String>, Query, description = "Reviewer id")),
    responses(
        (status = 200, description = "Review queue", body = UserReviewResponse),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getReview"
)]
#[get("/getReview")]
pub async fn get_review_queue(
    state: web::Data<HttpState>,
    query: web::Query<ReviewQuery>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = query.into_inner().user_id.filter(|id| !id.is_empty()) else {
        return Err(Error::not_found("user not found").into());
    };

    let queue = state.users.review_queue(&user_id).await?;

    Ok(HttpResponse::Ok().json(UserReviewResponse {
        user_id: queue.user_id,
        pull_requests: queue.pull_requests.into_iter().map(Into::into).collect(),
    }))
}
