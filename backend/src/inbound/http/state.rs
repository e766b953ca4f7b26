//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AssignmentStatsQuery, PullRequestLifecycle, TeamManagement, UserManagement,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Team creation and roster lookup.
    pub teams: Arc<dyn TeamManagement>,
    /// User activity and review listings.
    pub users: Arc<dyn UserManagement>,
    /// Pull request lifecycle engine.
    pub pull_requests: Arc<dyn PullRequestLifecycle>,
    /// Assignment statistics.
    pub stats: Arc<dyn AssignmentStatsQuery>,
}
