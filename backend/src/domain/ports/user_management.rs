//! Driving port for user administration and per-reviewer listings.

use async_trait::async_trait;

use crate::domain::{Error, PullRequestSummary, User};

/// Pull requests a user is currently expected to review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewQueue {
    /// The reviewer's id, echoed back from the validated user.
    pub user_id: String,
    /// Pull requests with a live assignment link to this reviewer.
    pub pull_requests: Vec<PullRequestSummary>,
}

/// Use-cases for user activity and review listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserManagement: Send + Sync {
    /// Flip a user's activity flag and return the updated user.
    async fn set_active(&self, user_id: &str, is_active: bool) -> Result<User, Error>;

    /// The pull requests currently assigned to a user for review.
    async fn review_queue(&self, user_id: &str) -> Result<ReviewQueue, Error>;
}
