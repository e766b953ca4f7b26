//! PostgreSQL-backed `PullRequestRepository` implementation using Diesel.
//!
//! Multi-write operations run inside `diesel-async` transactions so partial
//! application is never observable: a pull request appears together with its
//! reviewer links, and a reviewer swap removes the old link and inserts the
//! new one as a unit. Zero-rows-affected writes are surfaced as the matching
//! port error, which the domain re-classifies into a conflict.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{count_star, exists};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{PullRequestRepository, PullRequestRepositoryError};
use crate::domain::{PrStatus, PullRequest, PullRequestSummary, ReviewerAssignmentStat};

use super::models::{NewPrReviewerRow, NewPullRequestRow, PullRequestRow};
use super::pool::{DbPool, PoolError};
use super::schema::{pr_reviewers, pull_requests};

/// Diesel-backed implementation of the [`PullRequestRepository`] port.
#[derive(Clone)]
pub struct DieselPullRequestRepository {
    pool: DbPool,
}

impl DieselPullRequestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PullRequestRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PullRequestRepositoryError::connection(message)
        }
    }
}

impl From<diesel::result::Error> for PullRequestRepositoryError {
    fn from(error: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        debug!(error = %error, "pull request query failed");
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::connection("database connection error")
            }
            _ => Self::query("database error"),
        }
    }
}

#[async_trait]
impl PullRequestRepository for DieselPullRequestRepository {
    async fn create(&self, pr: &PullRequest) -> Result<(), PullRequestRepositoryError> {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pr = pr.clone();

        conn.transaction::<(), PullRequestRepositoryError, _>(|conn| {
            async move {
                let row = NewPullRequestRow {
                    id: &pr.id,
                    name: &pr.name,
                    author_id: &pr.author_id,
                    status: pr.status.as_str(),
                    created_at: pr.created_at,
                    merged_at: pr.merged_at,
                };

                diesel::insert_into(pull_requests::table)
                    .values(&row)
                    .execute(conn)
                    .await
                    .map_err(|error| match error {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            PullRequestRepositoryError::duplicate_id(pr.id.clone())
                        }
                        other => other.into(),
                    })?;

                let links: Vec<NewPrReviewerRow<'_>> = pr
                    .assigned_reviewers
                    .iter()
                    .map(|reviewer_id| NewPrReviewerRow {
                        pr_id: &pr.id,
                        reviewer_id,
                    })
                    .collect();

                if !links.is_empty() {
                    diesel::insert_into(pr_reviewers::table)
                        .values(&links)
                        .execute(conn)
                        .await?;
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn get_by_id(&self, id: &str) -> Result<PullRequest, PullRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pr_id = id.to_owned();

        // Entity and links are read in one snapshot so a concurrent swap
        // cannot yield a half-updated reviewer set.
        conn.transaction::<PullRequest, PullRequestRepositoryError, _>(|conn| {
            async move {
                let row: Option<PullRequestRow> = pull_requests::table
                    .find(&pr_id)
                    .select(PullRequestRow::as_select())
                    .first(conn)
                    .await
                    .optional()?;

                let Some(row) = row else {
                    return Err(PullRequestRepositoryError::not_found(pr_id));
                };

                let reviewers: Vec<String> = pr_reviewers::table
                    .filter(pr_reviewers::pr_id.eq(&pr_id))
                    .order(pr_reviewers::reviewer_id.asc())
                    .select(pr_reviewers::reviewer_id)
                    .load(conn)
                    .await?;

                Ok(row.into_pull_request(reviewers))
            }
            .scope_boxed()
        })
        .await
    }

    async fn mark_merged(
        &self,
        id: &str,
        merged_at: DateTime<Utc>,
    ) -> Result<PullRequest, PullRequestRepositoryError> {
        {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;

            // Scoped to OPEN so a racing merge can never rewrite the
            // timestamp; zero rows means the caller lost the race or the
            // pull request never existed.
            let affected = diesel::update(
                pull_requests::table
                    .filter(pull_requests::id.eq(id))
                    .filter(pull_requests::status.eq(PrStatus::Open.as_str())),
            )
            .set((
                pull_requests::status.eq(PrStatus::Merged.as_str()),
                pull_requests::merged_at.eq(merged_at),
            ))
            .execute(&mut conn)
            .await
            .map_err(PullRequestRepositoryError::from)?;

            if affected == 0 {
                return Err(PullRequestRepositoryError::not_found(id));
            }
        }

        self.get_by_id(id).await
    }

    async fn reassign_reviewer(
        &self,
        pr_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<PullRequest, PullRequestRepositoryError> {
        {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let pr_id = pr_id.to_owned();
            let old_reviewer_id = old_reviewer_id.to_owned();
            let new_reviewer_id = new_reviewer_id.to_owned();

            conn.transaction::<(), PullRequestRepositoryError, _>(|conn| {
                async move {
                    let removed = diesel::delete(
                        pr_reviewers::table
                            .filter(pr_reviewers::pr_id.eq(&pr_id))
                            .filter(pr_reviewers::reviewer_id.eq(&old_reviewer_id)),
                    )
                    .execute(conn)
                    .await?;

                    // The link changed under a concurrent request; roll the
                    // whole swap back rather than inserting a stray link.
                    if removed == 0 {
                        return Err(PullRequestRepositoryError::reviewer_not_assigned(
                            pr_id,
                            old_reviewer_id,
                        ));
                    }

                    diesel::insert_into(pr_reviewers::table)
                        .values(NewPrReviewerRow {
                            pr_id: &pr_id,
                            reviewer_id: &new_reviewer_id,
                        })
                        .execute(conn)
                        .await?;

                    Ok(())
                }
                .scope_boxed()
            })
            .await?;
        }

        self.get_by_id(pr_id).await
    }

    async fn list_by_reviewer(
        &self,
        reviewer_id: &str,
    ) -> Result<Vec<PullRequestSummary>, PullRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(String, String, String, String)> = pr_reviewers::table
            .inner_join(pull_requests::table)
            .filter(pr_reviewers::reviewer_id.eq(reviewer_id))
            .select((
                pull_requests::id,
                pull_requests::name,
                pull_requests::author_id,
                pull_requests::status,
            ))
            .order(pull_requests::id.asc())
            .load(&mut conn)
            .await
            .map_err(PullRequestRepositoryError::from)?;

        Ok(rows
            .into_iter()
            .map(|(id, name, author_id, status)| PullRequestSummary {
                id,
                name,
                author_id,
                status: PrStatus::from_storage(&status),
            })
            .collect())
    }

    async fn exists(&self, id: &str) -> Result<bool, PullRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(pull_requests::table.find(id)))
            .get_result(&mut conn)
            .await
            .map_err(PullRequestRepositoryError::from)
    }

    async fn assignment_counts(
        &self,
    ) -> Result<Vec<ReviewerAssignmentStat>, PullRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(String, i64)> = pr_reviewers::table
            .group_by(pr_reviewers::reviewer_id)
            .select((pr_reviewers::reviewer_id, count_star()))
            .order(pr_reviewers::reviewer_id.asc())
            .load(&mut conn)
            .await
            .map_err(PullRequestRepositoryError::from)?;

        Ok(rows
            .into_iter()
            .map(|(user_id, assignments)| ReviewerAssignmentStat {
                user_id,
                assignments,
            })
            .collect())
    }
}
