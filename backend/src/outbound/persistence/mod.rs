//! Persistence adapters implementing the driven ports over PostgreSQL.

mod diesel_pull_request_repository;
mod diesel_team_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
pub mod schema;

pub use diesel_pull_request_repository::DieselPullRequestRepository;
pub use diesel_team_repository::DieselTeamRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
