//! Team aggregate.

use crate::domain::User;

/// A team and its current member list.
///
/// The member list is a read-time join over the users table: the team row
/// stores only the name, and membership is derived from each user's
/// `team_name` reference. Team names are unique and immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    /// Unique team name.
    pub name: String,
    /// Members currently referencing this team.
    pub members: Vec<User>,
}

/// Member payload accepted by team creation.
///
/// Carries only what the caller controls; audit timestamps and the team
/// reference are filled in by the persistence layer during the upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTeamMember {
    /// Opaque user identifier.
    pub id: String,
    /// Display name.
    pub username: String,
    /// Initial activity flag.
    pub is_active: bool,
}
