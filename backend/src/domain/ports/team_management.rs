//! Driving port for team administration.

use async_trait::async_trait;

use crate::domain::{Error, NewTeamMember, Team};

/// Use-cases for creating teams and reading rosters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamManagement: Send + Sync {
    /// Create a team and upsert its members.
    ///
    /// Fails with the team-exists kind when the name is already taken.
    /// Returns the persisted roster.
    async fn create_team(&self, name: &str, members: Vec<NewTeamMember>) -> Result<Team, Error>;

    /// Fetch a team and its current member list.
    async fn team_roster(&self, name: &str) -> Result<Team, Error>;
}
