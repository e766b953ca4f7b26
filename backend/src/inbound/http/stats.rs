//! Assignment statistics HTTP handler.
//!
//! ```text
//! GET /stats/assignments
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ReviewerAssignmentStat;
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Per-user assignment count in API responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserAssignmentStatDto {
    /// Reviewer id.
    pub user_id: String,
    /// Number of pull requests currently assigned.
    pub assignments: i64,
}

impl From<ReviewerAssignmentStat> for UserAssignmentStatDto {
    fn from(stat: ReviewerAssignmentStat) -> Self {
        Self {
            user_id: stat.user_id,
            assignments: stat.assignments,
        }
    }
}

/// Response body for `GET /stats/assignments`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsAssignmentsResponse {
    /// Live counts grouped by reviewer.
    pub stats: Vec<UserAssignmentStatDto>,
}

/// Live reviewer-assignment counts.
#[utoipa::path(
    get,
    path = "/stats/assignments",
    responses(
        (status = 200, description = "Assignment counts", body = StatsAssignmentsResponse),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["stats"],
    operation_id = "assignmentStats"
)]
#[get("/assignments")]
pub async fn assignments_by_user(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let stats = state.stats.assignment_counts().await?;

    Ok(HttpResponse::Ok().json(StatsAssignmentsResponse {
        stats: stats.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::MockAssignmentStatsQuery;
    use crate::inbound::http::test_utils;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn stats_are_returned_as_a_flat_list() {
        let mut stats = MockAssignmentStatsQuery::new();
        stats.expect_assignment_counts().times(1).return_once(|| {
            Ok(vec![
                ReviewerAssignmentStat {
                    user_id: "u2".to_owned(),
                    assignments: 3,
                },
                ReviewerAssignmentStat {
                    user_id: "u3".to_owned(),
                    assignments: 1,
                },
            ])
        });
        let state = test_utils::state().stats(stats).build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/stats").service(assignments_by_user)),
        )
        .await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/stats/assignments")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(
            body.pointer("/stats/0/assignments").and_then(Value::as_i64),
            Some(3)
        );
    }

    #[actix_web::test]
    async fn aggregation_failures_surface_as_internal() {
        let mut stats = MockAssignmentStatsQuery::new();
        stats
            .expect_assignment_counts()
            .times(1)
            .return_once(|| Err(Error::internal("aggregation failed")));
        let state = test_utils::state().stats(stats).build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/stats").service(assignments_by_user)),
        )
        .await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/stats/assignments")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(
            body.pointer("/error/code").and_then(Value::as_str),
            Some("INTERNAL")
        );
        // Detail stays in the logs, not in the payload.
        assert_eq!(
            body.pointer("/error/message").and_then(Value::as_str),
            Some("internal error")
        );
    }
}
