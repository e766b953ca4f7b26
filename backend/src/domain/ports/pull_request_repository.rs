//! Driven port for pull request persistence.
//!
//! Multi-write operations (create with reviewer links, reviewer swap) are
//! atomic inside the adapter; partial application must never be observable.
//! Lost-update races surface as zero-rows-affected outcomes mapped to the
//! matching variant here, never as silent success.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{PullRequest, PullRequestSummary, ReviewerAssignmentStat};

use super::define_port_error;

define_port_error! {
    /// Errors raised by pull request repository adapters.
    pub enum PullRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "pull request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "pull request repository query failed: {message}",
        /// A pull request with this id already exists.
        DuplicateId { id: String } =>
            "pull request {id} already exists",
        /// No pull request with this id (or a conditional write matched
        /// zero rows).
        NotFound { id: String } =>
            "pull request {id} not found",
        /// The reviewer link to remove was not present when the swap ran.
        ReviewerNotAssigned { pr_id: String, reviewer_id: String } =>
            "reviewer {reviewer_id} is not assigned to pull request {pr_id}",
    }
}

/// Port for pull request storage and the reviewer-link relation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Persist a new pull request and its reviewer links in one atomic unit.
    async fn create(&self, pr: &PullRequest) -> Result<(), PullRequestRepositoryError>;

    /// Fetch a pull request with its current reviewer set.
    async fn get_by_id(&self, id: &str) -> Result<PullRequest, PullRequestRepositoryError>;

    /// Conditionally mark an open pull request merged.
    ///
    /// The update is scoped to `status = OPEN`, so `merged_at` can be
    /// written at most once. Zero rows affected surfaces as
    /// [`PullRequestRepositoryError::NotFound`]; the caller decides whether
    /// a concurrent merge already handled it.
    async fn mark_merged(
        &self,
        id: &str,
        merged_at: DateTime<Utc>,
    ) -> Result<PullRequest, PullRequestRepositoryError>;

    /// Atomically replace one reviewer link with another.
    ///
    /// Removing zero rows means the link changed under a concurrent request
    /// and surfaces as [`PullRequestRepositoryError::ReviewerNotAssigned`].
    async fn reassign_reviewer(
        &self,
        pr_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<PullRequest, PullRequestRepositoryError>;

    /// Pull requests currently assigned to a reviewer.
    async fn list_by_reviewer(
        &self,
        reviewer_id: &str,
    ) -> Result<Vec<PullRequestSummary>, PullRequestRepositoryError>;

    /// Whether a pull request with this id exists.
    async fn exists(&self, id: &str) -> Result<bool, PullRequestRepositoryError>;

    /// Live reviewer-assignment counts grouped by reviewer.
    async fn assignment_counts(
        &self,
    ) -> Result<Vec<ReviewerAssignmentStat>, PullRequestRepositoryError>;
}
