//! Driven port for team persistence.

use async_trait::async_trait;

use crate::domain::Team;

use super::define_port_error;

define_port_error! {
    /// Errors raised by team repository adapters.
    pub enum TeamRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "team repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "team repository query failed: {message}",
        /// A team with this name already exists.
        DuplicateName { name: String } =>
            "team {name} already exists",
        /// No team with this name.
        NotFound { name: String } =>
            "team {name} not found",
    }
}

/// Port for team storage and roster lookup.
///
/// Creating the team row and upserting its members are separate operations
/// (the latter goes through [`super::UserRepository`]); the service layer
/// sequences them. Roster reads join users by their `team_name` reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a new team row.
    ///
    /// Returns [`TeamRepositoryError::DuplicateName`] when the name is
    /// already taken, including when a concurrent create wins the race.
    async fn create(&self, name: &str) -> Result<(), TeamRepositoryError>;

    /// Fetch a team together with its current member list.
    async fn get_with_members(&self, name: &str) -> Result<Team, TeamRepositoryError>;

    /// Whether a team with this name exists.
    async fn exists(&self, name: &str) -> Result<bool, TeamRepositoryError>;
}
