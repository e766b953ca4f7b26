//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation. Regenerate or
//! update this file whenever a migration changes the schema.

diesel::table! {
    /// Teams table.
    ///
    /// Stores only the unique team name plus audit timestamps; membership is
    /// derived from `users.team_name`, never embedded here.
    teams (team_name) {
        /// Primary key: unique, immutable team name.
        team_name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// User accounts table.
    users (user_id) {
        /// Primary key: opaque caller-supplied identifier.
        user_id -> Varchar,
        /// Display name.
        username -> Varchar,
        /// Denormalized reference to the owning team.
        team_name -> Varchar,
        /// Inactive users never enter candidate pools.
        is_active -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Pull requests table.
    pull_requests (id) {
        /// Primary key: opaque caller-supplied identifier.
        id -> Varchar,
        /// Title of the change.
        name -> Varchar,
        /// Id of the authoring user.
        author_id -> Varchar,
        /// Lifecycle state, `OPEN` or `MERGED`.
        status -> Varchar,
        /// Creation timestamp assigned by the lifecycle engine.
        created_at -> Timestamptz,
        /// Merge timestamp; null until the terminal transition.
        merged_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Reviewer-assignment link relation.
    ///
    /// One row per live assignment; reassignment deletes and inserts rows
    /// here inside a single transaction.
    pr_reviewers (pr_id, reviewer_id) {
        /// Pull request being reviewed.
        pr_id -> Varchar,
        /// Assigned reviewer.
        reviewer_id -> Varchar,
    }
}

diesel::joinable!(pr_reviewers -> pull_requests (pr_id));

diesel::allow_tables_to_appear_in_same_query!(pull_requests, pr_reviewers,);
