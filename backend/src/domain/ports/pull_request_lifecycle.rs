//! Driving port for the pull request lifecycle engine.

use async_trait::async_trait;

use crate::domain::{Error, PullRequest};

/// Inputs for opening a pull request.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPullRequest {
    /// Caller-supplied unique id.
    pub id: String,
    /// Title of the change.
    pub name: String,
    /// Id of the authoring user.
    pub author_id: String,
}

/// Result of a reviewer swap.
#[derive(Debug, Clone, PartialEq)]
pub struct Reassignment {
    /// The refreshed pull request after the swap.
    pub pull_request: PullRequest,
    /// Id of the newly assigned reviewer.
    pub replaced_by: String,
}

/// Use-cases mutating a pull request: open with auto-assigned reviewers,
/// swap a reviewer, merge.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestLifecycle: Send + Sync {
    /// Create a pull request and auto-assign up to two reviewers from the
    /// author's active teammates.
    async fn open(&self, request: OpenPullRequest) -> Result<PullRequest, Error>;

    /// Replace one currently assigned reviewer with a fresh draw from the
    /// replaced reviewer's current team.
    async fn reassign(&self, pr_id: &str, old_reviewer_id: &str) -> Result<Reassignment, Error>;

    /// Idempotently mark a pull request merged.
    async fn merge(&self, pr_id: &str) -> Result<PullRequest, Error>;
}
