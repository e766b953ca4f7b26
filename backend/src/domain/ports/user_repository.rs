//! Driven port for user persistence.

use async_trait::async_trait;

use crate::domain::{NewTeamMember, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// No user with this id.
        NotFound { id: String } =>
            "user {id} not found",
    }
}

/// Port for user storage, membership upserts, and candidate-pool reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id.
    async fn get_by_id(&self, id: &str) -> Result<User, UserRepositoryError>;

    /// Insert or update the given users as members of `team_name`.
    ///
    /// Existing rows are moved onto the team and refreshed
    /// (username/activity), new rows are created.
    async fn upsert_members(
        &self,
        team_name: &str,
        members: &[NewTeamMember],
    ) -> Result<(), UserRepositoryError>;

    /// Flip a user's activity flag and return the updated entity.
    async fn set_active(&self, id: &str, is_active: bool) -> Result<User, UserRepositoryError>;

    /// Active members of `team_name`, excluding `exclude_id`, in stable
    /// id order.
    async fn active_team_members_except(
        &self,
        team_name: &str,
        exclude_id: &str,
    ) -> Result<Vec<User>, UserRepositoryError>;

    /// Current team affiliation of a user.
    async fn team_of_user(&self, id: &str) -> Result<String, UserRepositoryError>;
}
