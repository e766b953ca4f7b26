//! User administration service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    PullRequestRepository, ReviewQueue, UserManagement, UserRepository, UserRepositoryError,
};
use crate::domain::pull_request_service::map_pull_request_repository_error;
use crate::domain::team_service::map_user_repository_error;
use crate::domain::{Error, User};

/// Service implementing [`UserManagement`] over the persistence ports.
#[derive(Clone)]
pub struct UserService<U, P> {
    user_repo: Arc<U>,
    pr_repo: Arc<P>,
}

impl<U, P> UserService<U, P> {
    /// Create a new service with the given repositories.
    pub fn new(user_repo: Arc<U>, pr_repo: Arc<P>) -> Self {
        Self { user_repo, pr_repo }
    }
}

#[async_trait]
impl<U, P> UserManagement for UserService<U, P>
where
    U: UserRepository,
    P: PullRequestRepository,
{
    async fn set_active(&self, user_id: &str, is_active: bool) -> Result<User, Error> {
        self.user_repo
            .set_active(user_id, is_active)
            .await
            .map_err(map_user_repository_error)
    }

    async fn review_queue(&self, user_id: &str) -> Result<ReviewQueue, Error> {
        let user = match self.user_repo.get_by_id(user_id).await {
            Ok(user) => user,
            Err(UserRepositoryError::NotFound { .. }) => {
                return Err(Error::not_found("user not found"));
            }
            Err(other) => return Err(map_user_repository_error(other)),
        };

        let pull_requests = self
            .pr_repo
            .list_by_reviewer(&user.id)
            .await
            .map_err(map_pull_request_repository_error)?;

        Ok(ReviewQueue {
            user_id: user.id,
            pull_requests,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPullRequestRepository, MockUserRepository};
    use crate::domain::{ErrorCode, PrStatus, PullRequestSummary};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn user(id: &str, active: bool) -> User {
        User {
            id: id.to_owned(),
            username: format!("user-{id}"),
            team_name: "backend".to_owned(),
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn make_service(
        user_repo: MockUserRepository,
        pr_repo: MockPullRequestRepository,
    ) -> UserService<MockUserRepository, MockPullRequestRepository> {
        UserService::new(Arc::new(user_repo), Arc::new(pr_repo))
    }

    #[tokio::test]
    async fn set_active_returns_the_updated_user() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_set_active()
            .with(eq("u1"), eq(false))
            .times(1)
            .return_once(|id, active| Ok(user(id, active)));
        let pr_repo = MockPullRequestRepository::new();

        let service = make_service(user_repo, pr_repo);

        let updated = service.set_active("u1", false).await.expect("update ok");
        assert!(!updated.is_active);
        assert_eq!(updated.id, "u1");
    }

    #[tokio::test]
    async fn set_active_on_unknown_user_is_not_found() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_set_active()
            .times(1)
            .return_once(|id, _| Err(UserRepositoryError::not_found(id)));
        let pr_repo = MockPullRequestRepository::new();

        let service = make_service(user_repo, pr_repo);

        let error = service.set_active("ghost", true).await.expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn review_queue_lists_assigned_pull_requests() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_get_by_id()
            .with(eq("u2"))
            .times(1)
            .return_once(|id| Ok(user(id, true)));
        let mut pr_repo = MockPullRequestRepository::new();
        pr_repo
            .expect_list_by_reviewer()
            .with(eq("u2"))
            .times(1)
            .return_once(|_| {
                Ok(vec![PullRequestSummary {
                    id: "pr-1".to_owned(),
                    name: "fix".to_owned(),
                    author_id: "u1".to_owned(),
                    status: PrStatus::Open,
                }])
            });

        let service = make_service(user_repo, pr_repo);

        let queue = service.review_queue("u2").await.expect("queue ok");
        assert_eq!(queue.user_id, "u2");
        assert_eq!(queue.pull_requests.len(), 1);
    }

    #[tokio::test]
    async fn review_queue_for_unknown_user_is_not_found() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_get_by_id()
            .times(1)
            .return_once(|id| Err(UserRepositoryError::not_found(id)));
        let mut pr_repo = MockPullRequestRepository::new();
        pr_repo.expect_list_by_reviewer().never();

        let service = make_service(user_repo, pr_repo);

        let error = service.review_queue("ghost").await.expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
