//! Driving port for assignment statistics.

use async_trait::async_trait;

use crate::domain::{Error, ReviewerAssignmentStat};

/// Read-only aggregation over the live reviewer-link relation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentStatsQuery: Send + Sync {
    /// Current assignment counts grouped by reviewer.
    async fn assignment_counts(&self) -> Result<Vec<ReviewerAssignmentStat>, Error>;
}
