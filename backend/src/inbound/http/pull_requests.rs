//! Pull request HTTP handlers.
//!
//! ```text
//! POST /pullRequest/create
//! POST /pullRequest/merge
//! POST /pullRequest/reassign
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::OpenPullRequest;
use crate::domain::{PrStatus, PullRequest};
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /pullRequest/create`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreatePullRequestRequest {
    /// Caller-supplied unique id.
    pub pull_request_id: String,
    /// Title of the change.
    pub pull_request_name: String,
    /// Authoring user.
    pub author_id: String,
}

/// Pull request in API responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PullRequestDto {
    /// Pull request id.
    pub pull_request_id: String,
    /// Title of the change.
    pub pull_request_name: String,
    /// Authoring user.
    pub author_id: String,
    /// Lifecycle state.
    pub status: PrStatus,
    /// Currently assigned reviewer ids.
    pub assigned_reviewers: Vec<String>,
    /// Creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Merge timestamp, absent until merged.
    #[serde(rename = "mergedAt", skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

impl From<PullRequest> for PullRequestDto {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.id,
            pull_request_name: pr.name,
            author_id: pr.author_id,
            status: pr.status,
            assigned_reviewers: pr.assigned_reviewers,
            created_at: pr.created_at,
            merged_at: pr.merged_at,
        }
    }
}

/// Response body for `POST /pullRequest/create`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePullRequestResponse {
    /// The persisted pull request.
    pub pr: PullRequestDto,
}

/// Request body for `POST /pullRequest/merge`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MergePullRequestRequest {
    /// Pull request to merge.
    pub pull_request_id: String,
}

/// Response body for `POST /pullRequest/merge`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MergePullRequestResponse {
    /// The merged pull request.
    pub pr: PullRequestDto,
}

/// Request body for `POST /pullRequest/reassign`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ReassignRequest {
    /// Pull request whose reviewer changes.
    pub pull_request_id: String,
    /// Reviewer to replace.
    pub old_user_id: String,
}

/// Response body for `POST /pullRequest/reassign`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReassignResponse {
    /// The refreshed pull request.
    pub pr: PullRequestDto,
    /// Id of the newly assigned reviewer.
    pub replaced_by: String,
}

/// Create a pull request with auto-assigned reviewers.
#[utoipa::path(
    post,
    path = "/pullRequest/create",
    request_body = CreatePullRequestRequest,
    responses(
        (status = 201, description = "Pull request created", body = CreatePullRequestResponse),
        (status = 404, description = "Author not found", body = ErrorBody),
        (status = 409, description = "Pull request already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["pull-requests"],
    operation_id = "createPullRequest"
)]
#[post("/create")]
pub async fn create_pull_request(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePullRequestRequest>,
) -> ApiResult<HttpResponse> {
    let CreatePullRequestRequest {
        pull_request_id,
        pull_request_name,
        author_id,
    } = payload.into_inner();

    let pr = state
        .pull_requests
        .open(OpenPullRequest {
            id: pull_request_id,
            name: pull_request_name,
            author_id,
        })
        .await?;

    Ok(HttpResponse::Created().json(CreatePullRequestResponse { pr: pr.into() }))
}

/// Idempotently merge a pull request.
#[utoipa::path(
    post,
    path = "/pullRequest/merge",
    request_body = MergePullRequestRequest,
    responses(
        (status = 200, description = "Merged pull request", body = MergePullRequestResponse),
        (status = 404, description = "Pull request not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["pull-requests"],
    operation_id = "mergePullRequest"
)]
#[post("/merge")]
pub async fn merge_pull_request(
    state: web::Data<HttpState>,
    payload: web::Json<MergePullRequestRequest>,
) -> ApiResult<HttpResponse> {
    let pr = state
        .pull_requests
        .merge(&payload.pull_request_id)
        .await?;

    Ok(HttpResponse::Ok().json(MergePullRequestResponse { pr: pr.into() }))
}

/// Replace one assigned reviewer with a fresh draw.
#[utoipa::path(
    post,
    path = "/pullRequest/reassign",
    request_body = ReassignRequest,
    responses(
        (status = 200, description = "Reviewer replaced", body = ReassignResponse),
        (status = 404, description = "Pull request or reviewer not found", body = ErrorBody),
        (status = 409, description = "Merged, not assigned, or no candidate", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["pull-requests"],
    operation_id = "reassignReviewer"
)]
#[post("/reassign")]
pub async fn reassign_reviewer(
    state: web::Data<HttpState>,
    payload: web::Json<ReassignRequest>,
) -> ApiResult<HttpResponse> {
    let ReassignRequest {
        pull_request_id,
        old_user_id,
    } = payload.into_inner();

    let outcome = state
        .pull_requests
        .reassign(&pull_request_id, &old_user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ReassignResponse {
        pr: outcome.pull_request.into(),
        replaced_by: outcome.replaced_by,
    }))
}
