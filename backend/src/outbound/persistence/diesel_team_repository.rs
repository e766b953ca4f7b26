//! PostgreSQL-backed `TeamRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::Team;
use crate::domain::ports::{TeamRepository, TeamRepositoryError};

use super::models::{NewTeamRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{teams, users};

/// Diesel-backed implementation of the [`TeamRepository`] port.
#[derive(Clone)]
pub struct DieselTeamRepository {
    pool: DbPool,
}

impl DieselTeamRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TeamRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            TeamRepositoryError::connection(message)
        }
    }
}

impl From<diesel::result::Error> for TeamRepositoryError {
    fn from(error: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        debug!(error = %error, "team query failed");
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::connection("database connection error")
            }
            _ => Self::query("database error"),
        }
    }
}

#[async_trait]
impl TeamRepository for DieselTeamRepository {
    async fn create(&self, name: &str) -> Result<(), TeamRepositoryError> {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = Utc::now();
        let row = NewTeamRow {
            team_name: name,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(teams::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|error| match error {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    TeamRepositoryError::duplicate_name(name)
                }
                other => other.into(),
            })?;

        Ok(())
    }

    async fn get_with_members(&self, name: &str) -> Result<Team, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let team_name = name.to_owned();

        // Both reads observe one snapshot so a roster change mid-read
        // cannot produce a phantom member list.
        conn.transaction::<Team, TeamRepositoryError, _>(|conn| {
            async move {
                let found: Option<String> = teams::table
                    .find(&team_name)
                    .select(teams::team_name)
                    .first(conn)
                    .await
                    .optional()?;

                let Some(found) = found else {
                    return Err(TeamRepositoryError::not_found(team_name));
                };

                let members: Vec<UserRow> = users::table
                    .filter(users::team_name.eq(&found))
                    .order(users::user_id.asc())
                    .select(UserRow::as_select())
                    .load(conn)
                    .await?;

                Ok(Team {
                    name: found,
                    members: members.into_iter().map(Into::into).collect(),
                })
            }
            .scope_boxed()
        })
        .await
    }

    async fn exists(&self, name: &str) -> Result<bool, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(teams::table.find(name)))
            .get_result(&mut conn)
            .await
            .map_err(TeamRepositoryError::from)
    }
}
