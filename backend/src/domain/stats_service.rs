//! Assignment statistics service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{AssignmentStatsQuery, PullRequestRepository};
use crate::domain::pull_request_service::map_pull_request_repository_error;
use crate::domain::{Error, ReviewerAssignmentStat};

/// Read-only service implementing [`AssignmentStatsQuery`].
#[derive(Clone)]
pub struct StatsService<P> {
    pr_repo: Arc<P>,
}

impl<P> StatsService<P> {
    /// Create a new service over the pull request repository.
    pub fn new(pr_repo: Arc<P>) -> Self {
        Self { pr_repo }
    }
}

#[async_trait]
impl<P> AssignmentStatsQuery for StatsService<P>
where
    P: PullRequestRepository,
{
    async fn assignment_counts(&self) -> Result<Vec<ReviewerAssignmentStat>, Error> {
        self.pr_repo
            .assignment_counts()
            .await
            .map_err(map_pull_request_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPullRequestRepository, PullRequestRepositoryError};

    #[tokio::test]
    async fn returns_live_counts_from_the_repository() {
        let mut pr_repo = MockPullRequestRepository::new();
        pr_repo.expect_assignment_counts().times(1).return_once(|| {
            Ok(vec![ReviewerAssignmentStat {
                user_id: "u2".to_owned(),
                assignments: 3,
            }])
        });

        let service = StatsService::new(Arc::new(pr_repo));

        let stats = service.assignment_counts().await.expect("stats ok");
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.first().map(|s| s.assignments), Some(3));
    }

    #[tokio::test]
    async fn repository_failures_surface_as_internal() {
        let mut pr_repo = MockPullRequestRepository::new();
        pr_repo
            .expect_assignment_counts()
            .times(1)
            .return_once(|| Err(PullRequestRepositoryError::query("aggregation failed")));

        let service = StatsService::new(Arc::new(pr_repo));

        let error = service.assignment_counts().await.expect_err("internal");
        assert_eq!(error.code(), ErrorCode::Internal);
    }
}
