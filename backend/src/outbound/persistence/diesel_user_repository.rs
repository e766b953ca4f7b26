//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewTeamMember, User};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

impl From<diesel::result::Error> for UserRepositoryError {
    fn from(error: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        debug!(error = %error, "user query failed");
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::connection("database connection error")
            }
            _ => Self::query("database error"),
        }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn get_by_id(&self, id: &str) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(UserRepositoryError::from)?;

        row.map(Into::into)
            .ok_or_else(|| UserRepositoryError::not_found(id))
    }

    async fn upsert_members(
        &self,
        team_name: &str,
        members: &[NewTeamMember],
    ) -> Result<(), UserRepositoryError> {
        if members.is_empty() {
            return Ok(());
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = Utc::now();
        let rows: Vec<NewUserRow<'_>> = members
            .iter()
            .map(|member| NewUserRow {
                user_id: &member.id,
                username: &member.username,
                team_name,
                is_active: member.is_active,
                created_at: now,
                updated_at: now,
            })
            .collect();

        diesel::insert_into(users::table)
            .values(&rows)
            .on_conflict(users::user_id)
            .do_update()
            .set((
                users::username.eq(excluded(users::username)),
                users::team_name.eq(excluded(users::team_name)),
                users::is_active.eq(excluded(users::is_active)),
                users::updated_at.eq(excluded(users::updated_at)),
            ))
            .execute(&mut conn)
            .await
            .map_err(UserRepositoryError::from)?;

        Ok(())
    }

    async fn set_active(&self, id: &str, is_active: bool) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = diesel::update(users::table.find(id))
            .set((
                users::is_active.eq(is_active),
                users::updated_at.eq(Utc::now()),
            ))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(UserRepositoryError::from)?;

        row.map(Into::into)
            .ok_or_else(|| UserRepositoryError::not_found(id))
    }

    async fn active_team_members_except(
        &self,
        team_name: &str,
        exclude_id: &str,
    ) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::team_name.eq(team_name))
            .filter(users::is_active.eq(true))
            .filter(users::user_id.ne(exclude_id))
            .order(users::user_id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(UserRepositoryError::from)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn team_of_user(&self, id: &str) -> Result<String, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let team_name: Option<String> = users::table
            .find(id)
            .select(users::team_name)
            .first(&mut conn)
            .await
            .optional()
            .map_err(UserRepositoryError::from)?;

        team_name.ok_or_else(|| UserRepositoryError::not_found(id))
    }
}
