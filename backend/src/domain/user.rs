//! User entity.
//!
//! A user belongs to exactly one team at a time; `team_name` is a
//! denormalized reference resolved by query, never an ownership pointer.
//! Users are never deleted — deactivation is the only removal-equivalent,
//! which is what keeps historical reviewer links resolvable.

use chrono::{DateTime, Utc};

/// A registered user and their standing within the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Opaque caller-supplied identifier, unique across all teams.
    pub id: String,
    /// Human-readable name; not required to be unique.
    pub username: String,
    /// Name of the team the user currently belongs to.
    pub team_name: String,
    /// Inactive users are excluded from every candidate pool.
    pub is_active: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
