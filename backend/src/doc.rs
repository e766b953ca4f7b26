//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct that generates the OpenAPI specification
//! for the REST API: all inbound endpoints plus the DTO and error schemas.
//! Debug builds serve the generated document as JSON.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PR reviewer service API",
        description = "Reviewer assignment and pull request lifecycle over team rosters."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::teams::add_team,
        crate::inbound::http::teams::get_team,
        crate::inbound::http::users::set_is_active,
        crate::inbound::http::users::get_review_queue,
        crate::inbound::http::pull_requests::create_pull_request,
        crate::inbound::http::pull_requests::merge_pull_request,
        crate::inbound::http::pull_requests::reassign_reviewer,
        crate::inbound::http::stats::assignments_by_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::error::ErrorCode,
        crate::domain::pull_request::PrStatus,
        crate::inbound::http::error::ErrorBody,
        crate::inbound::http::error::ErrorItem,
        crate::inbound::http::teams::TeamMemberPayload,
        crate::inbound::http::teams::TeamRequest,
        crate::inbound::http::teams::TeamMemberDto,
        crate::inbound::http::teams::TeamDto,
        crate::inbound::http::teams::TeamCreateResponse,
        crate::inbound::http::users::SetIsActiveRequest,
        crate::inbound::http::users::UserDto,
        crate::inbound::http::users::SetIsActiveResponse,
        crate::inbound::http::users::PullRequestSummaryDto,
        crate::inbound::http::users::UserReviewResponse,
        crate::inbound::http::pull_requests::CreatePullRequestRequest,
        crate::inbound::http::pull_requests::PullRequestDto,
        crate::inbound::http::pull_requests::CreatePullRequestResponse,
        crate::inbound::http::pull_requests::MergePullRequestRequest,
        crate::inbound::http::pull_requests::MergePullRequestResponse,
        crate::inbound::http::pull_requests::ReassignRequest,
        crate::inbound::http::pull_requests::ReassignResponse,
        crate::inbound::http::stats::UserAssignmentStatDto,
        crate::inbound::http::stats::StatsAssignmentsResponse,
    )),
    tags(
        (name = "teams", description = "Team creation and rosters"),
        (name = "users", description = "User activity and review queues"),
        (name = "pull-requests", description = "Pull request lifecycle"),
        (name = "stats", description = "Assignment statistics"),
        (name = "health", description = "Probe endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/team/add",
            "/team/get",
            "/users/setIsActive",
            "/users/getReview",
            "/pullRequest/create",
            "/pullRequest/merge",
            "/pullRequest/reassign",
            "/stats/assignments",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|path| path.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
