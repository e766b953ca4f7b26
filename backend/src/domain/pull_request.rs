//! Pull request entity and derived read models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

/// Lifecycle state of a pull request.
///
/// `Merged` is terminal: once reached, the reviewer set is frozen and no
/// further reassignment is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrStatus {
    /// Open for review; reviewers may still be swapped.
    Open,
    /// Merged; `merged_at` is set and the entity is immutable.
    Merged,
}

impl PrStatus {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }

    /// Parse the storage representation, defaulting to `Open` on values this
    /// version does not know about (logged, never silent).
    pub fn from_storage(value: &str) -> Self {
        match value {
            "OPEN" => Self::Open,
            "MERGED" => Self::Merged,
            other => {
                warn!(value = other, "unrecognised pull request status, defaulting to OPEN");
                Self::Open
            }
        }
    }
}

impl std::fmt::Display for PrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pull request with its currently assigned reviewers.
///
/// ## Invariants
/// - `id` is globally unique; creation fails when it already exists.
/// - `author_id` never appears in `assigned_reviewers`.
/// - `assigned_reviewers` holds at most two distinct user ids, each an
///   active member of the author's team at assignment time.
/// - `merged_at` is written exactly once, at the OPEN→MERGED transition.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
    /// Opaque caller-supplied identifier.
    pub id: String,
    /// Title of the change.
    pub name: String,
    /// Id of the authoring user.
    pub author_id: String,
    /// Current lifecycle state.
    pub status: PrStatus,
    /// Reviewer ids; order-insignificant for semantics, kept stable for
    /// display.
    pub assigned_reviewers: Vec<String>,
    /// Creation time, assigned by the lifecycle engine.
    pub created_at: DateTime<Utc>,
    /// Merge time; `None` until the terminal transition.
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Whether the terminal transition has happened.
    pub fn is_merged(&self) -> bool {
        self.status == PrStatus::Merged
    }
}

/// Compact pull request view for per-reviewer listings.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestSummary {
    /// Pull request id.
    pub id: String,
    /// Title of the change.
    pub name: String,
    /// Id of the authoring user.
    pub author_id: String,
    /// Current lifecycle state.
    pub status: PrStatus,
}

/// Live count of reviewer-assignment links for one user.
///
/// Derived from the current link relation only; reassignment moves counts
/// going forward and never adjusts history, because no history is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerAssignmentStat {
    /// Reviewer id.
    pub user_id: String,
    /// Number of pull requests currently assigned.
    pub assignments: i64,
}
