//! Pull request lifecycle engine.
//!
//! Owns the reviewer-assignment rules: who may review what, how a
//! replacement is drawn under churn, and how racing mutations against the
//! same pull request stay consistent. Concurrency is handled optimistically:
//! the repository reports zero-rows-affected writes as conflicts, which this
//! service re-classifies into the matching domain kind instead of retrying.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    OpenPullRequest, PullRequestLifecycle, PullRequestRepository, PullRequestRepositoryError,
    RandomSource, Reassignment, UserRepository, UserRepositoryError,
};
use crate::domain::team_service::map_user_repository_error;
use crate::domain::{Error, PrStatus, PullRequest, selection};

/// Upper bound on auto-assigned reviewers per pull request.
pub const MAX_ASSIGNED_REVIEWERS: usize = 2;

/// Service implementing [`PullRequestLifecycle`] over the persistence ports.
#[derive(Clone)]
pub struct PullRequestService<P, U> {
    pr_repo: Arc<P>,
    user_repo: Arc<U>,
    rng: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
}

impl<P, U> PullRequestService<P, U> {
    /// Create a new service with the given repositories, randomness, and
    /// clock.
    pub fn new(
        pr_repo: Arc<P>,
        user_repo: Arc<U>,
        rng: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            pr_repo,
            user_repo,
            rng,
            clock,
        }
    }
}

pub(super) fn map_pull_request_repository_error(error: PullRequestRepositoryError) -> Error {
    match error {
        PullRequestRepositoryError::DuplicateId { .. } => {
            Error::pr_exists("pull request already exists")
        }
        PullRequestRepositoryError::NotFound { .. } => Error::not_found("pull request not found"),
        PullRequestRepositoryError::ReviewerNotAssigned { .. } => {
            Error::not_assigned("reviewer not assigned to pull request")
        }
        PullRequestRepositoryError::Connection { message }
        | PullRequestRepositoryError::Query { message } => {
            Error::internal(format!("pull request repository error: {message}"))
        }
    }
}

#[async_trait]
impl<P, U> PullRequestLifecycle for PullRequestService<P, U>
where
    P: PullRequestRepository,
    U: UserRepository,
{
    async fn open(&self, request: OpenPullRequest) -> Result<PullRequest, Error> {
        if self
            .pr_repo
            .exists(&request.id)
            .await
            .map_err(map_pull_request_repository_error)?
        {
            return Err(Error::pr_exists("pull request already exists"));
        }

        let author = match self.user_repo.get_by_id(&request.author_id).await {
            Ok(user) => user,
            Err(UserRepositoryError::NotFound { .. }) => {
                return Err(Error::not_found("author not found"));
            }
            Err(other) => return Err(map_user_repository_error(other)),
        };

        if author.team_name.is_empty() {
            return Err(Error::not_found("author has no team"));
        }

        let candidates = self
            .user_repo
            .active_team_members_except(&author.team_name, &request.author_id)
            .await
            .map_err(map_user_repository_error)?;

        // 0, 1, or 2 reviewers depending on pool size; all are valid.
        let assigned =
            selection::choose_reviewers(&candidates, MAX_ASSIGNED_REVIEWERS, self.rng.as_ref());

        let pr = PullRequest {
            id: request.id.clone(),
            name: request.name,
            author_id: request.author_id,
            status: PrStatus::Open,
            assigned_reviewers: assigned,
            created_at: self.clock.utc(),
            merged_at: None,
        };

        match self.pr_repo.create(&pr).await {
            Ok(()) => {}
            // Lost an exists/create race; same outcome as the precondition.
            Err(PullRequestRepositoryError::DuplicateId { .. }) => {
                return Err(Error::pr_exists("pull request already exists"));
            }
            Err(other) => return Err(map_pull_request_repository_error(other)),
        }

        // Re-read the persisted entity so the response reflects storage,
        // not the in-memory draft.
        self.pr_repo
            .get_by_id(&request.id)
            .await
            .map_err(map_pull_request_repository_error)
    }

    async fn reassign(&self, pr_id: &str, old_reviewer_id: &str) -> Result<Reassignment, Error> {
        let pr = match self.pr_repo.get_by_id(pr_id).await {
            Ok(pr) => pr,
            Err(PullRequestRepositoryError::NotFound { .. }) => {
                return Err(Error::not_found("pull request not found"));
            }
            Err(other) => return Err(map_pull_request_repository_error(other)),
        };

        match self.user_repo.get_by_id(old_reviewer_id).await {
            Ok(_) => {}
            Err(UserRepositoryError::NotFound { .. }) => {
                return Err(Error::not_found("reviewer not found"));
            }
            Err(other) => return Err(map_user_repository_error(other)),
        }

        if pr.is_merged() {
            return Err(Error::pr_merged("pull request already merged"));
        }

        let assigned: HashSet<&str> = pr
            .assigned_reviewers
            .iter()
            .map(String::as_str)
            .collect();
        if !assigned.contains(old_reviewer_id) {
            return Err(Error::not_assigned("reviewer not assigned to pull request"));
        }

        // The pool comes from the replaced reviewer's CURRENT team, read
        // fresh here: membership changes since PR creation are honoured.
        let team_name = match self.user_repo.team_of_user(old_reviewer_id).await {
            Ok(name) => name,
            Err(UserRepositoryError::NotFound { .. }) => {
                return Err(Error::not_found("reviewer not found"));
            }
            Err(other) => return Err(map_user_repository_error(other)),
        };

        let candidates = self
            .user_repo
            .active_team_members_except(&team_name, old_reviewer_id)
            .await
            .map_err(map_user_repository_error)?;

        let eligible: Vec<&crate::domain::User> = candidates
            .iter()
            .filter(|candidate| !assigned.contains(candidate.id.as_str()))
            .collect();

        if eligible.is_empty() {
            return Err(Error::no_candidate("no replacement candidate"));
        }

        let index = self.rng.pick_index(eligible.len());
        let Some(replacement) = eligible.get(index) else {
            return Err(Error::internal("selection index out of range"));
        };
        let replaced_by = replacement.id.clone();

        match self
            .pr_repo
            .reassign_reviewer(pr_id, old_reviewer_id, &replaced_by)
            .await
        {
            Ok(updated) => Ok(Reassignment {
                pull_request: updated,
                replaced_by,
            }),
            // The link vanished between the read and the swap; same outcome
            // as if it had never been assigned.
            Err(PullRequestRepositoryError::ReviewerNotAssigned { .. }) => {
                Err(Error::not_assigned("reviewer not assigned to pull request"))
            }
            Err(other) => Err(map_pull_request_repository_error(other)),
        }
    }

    async fn merge(&self, pr_id: &str) -> Result<PullRequest, Error> {
        let pr = match self.pr_repo.get_by_id(pr_id).await {
            Ok(pr) => pr,
            Err(PullRequestRepositoryError::NotFound { .. }) => {
                return Err(Error::not_found("pull request not found"));
            }
            Err(other) => return Err(map_pull_request_repository_error(other)),
        };

        // Idempotent: a merged PR is returned as-is, timestamp untouched.
        if pr.is_merged() {
            return Ok(pr);
        }

        match self.pr_repo.mark_merged(pr_id, self.clock.utc()).await {
            Ok(merged) => Ok(merged),
            Err(PullRequestRepositoryError::NotFound { .. }) => {
                // The conditional update matched nothing: either a
                // concurrent merge won, or the PR vanished. Re-read to
                // tell the two apart.
                let current = match self.pr_repo.get_by_id(pr_id).await {
                    Ok(pr) => pr,
                    Err(PullRequestRepositoryError::NotFound { .. }) => {
                        return Err(Error::not_found("pull request not found"));
                    }
                    Err(other) => return Err(map_pull_request_repository_error(other)),
                };
                if current.is_merged() {
                    Ok(current)
                } else {
                    Err(Error::not_found("pull request not found"))
                }
            }
            Err(other) => Err(map_pull_request_repository_error(other)),
        }
    }
}

#[cfg(test)]
#[path = "pull_request_service_tests.rs"]
mod tests;
