//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories, randomness) are implemented by outbound
//! adapters; driving ports (use-case traits) are implemented by the domain
//! services and consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod assignment_stats;
mod pull_request_lifecycle;
mod pull_request_repository;
mod random_source;
mod team_management;
mod team_repository;
mod user_management;
mod user_repository;

#[cfg(test)]
pub use assignment_stats::MockAssignmentStatsQuery;
pub use assignment_stats::AssignmentStatsQuery;
#[cfg(test)]
pub use pull_request_lifecycle::MockPullRequestLifecycle;
pub use pull_request_lifecycle::{OpenPullRequest, PullRequestLifecycle, Reassignment};
#[cfg(test)]
pub use pull_request_repository::MockPullRequestRepository;
pub use pull_request_repository::{PullRequestRepository, PullRequestRepositoryError};
pub use random_source::{RandomSource, SequenceRandomSource};
#[cfg(test)]
pub use team_management::MockTeamManagement;
pub use team_management::TeamManagement;
#[cfg(test)]
pub use team_repository::MockTeamRepository;
pub use team_repository::{TeamRepository, TeamRepositoryError};
#[cfg(test)]
pub use user_management::MockUserManagement;
pub use user_management::{ReviewQueue, UserManagement};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
