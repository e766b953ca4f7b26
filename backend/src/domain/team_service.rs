//! Team administration service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    TeamManagement, TeamRepository, TeamRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{Error, NewTeamMember, Team};

/// Service implementing [`TeamManagement`] over the persistence ports.
#[derive(Clone)]
pub struct TeamService<T, U> {
    team_repo: Arc<T>,
    user_repo: Arc<U>,
}

impl<T, U> TeamService<T, U> {
    /// Create a new service with the given repositories.
    pub fn new(team_repo: Arc<T>, user_repo: Arc<U>) -> Self {
        Self {
            team_repo,
            user_repo,
        }
    }
}

pub(super) fn map_team_repository_error(error: TeamRepositoryError) -> Error {
    match error {
        TeamRepositoryError::DuplicateName { .. } => Error::team_exists("team already exists"),
        TeamRepositoryError::NotFound { .. } => Error::not_found("team not found"),
        TeamRepositoryError::Connection { message } | TeamRepositoryError::Query { message } => {
            Error::internal(format!("team repository error: {message}"))
        }
    }
}

pub(super) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::NotFound { .. } => Error::not_found("user not found"),
        UserRepositoryError::Connection { message } | UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<T, U> TeamManagement for TeamService<T, U>
where
    T: TeamRepository,
    U: UserRepository,
{
    async fn create_team(&self, name: &str, members: Vec<NewTeamMember>) -> Result<Team, Error> {
        if self
            .team_repo
            .exists(name)
            .await
            .map_err(map_team_repository_error)?
        {
            return Err(Error::team_exists("team already exists"));
        }

        // A concurrent create between the check and the insert still loses
        // on the unique key and maps to the same team-exists kind.
        self.team_repo
            .create(name)
            .await
            .map_err(map_team_repository_error)?;

        self.user_repo
            .upsert_members(name, &members)
            .await
            .map_err(map_user_repository_error)?;

        self.team_repo
            .get_with_members(name)
            .await
            .map_err(map_team_repository_error)
    }

    async fn team_roster(&self, name: &str) -> Result<Team, Error> {
        self.team_repo
            .get_with_members(name)
            .await
            .map_err(map_team_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockTeamRepository, MockUserRepository};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn roster(name: &str) -> Team {
        Team {
            name: name.to_owned(),
            members: vec![crate::domain::User {
                id: "u1".to_owned(),
                username: "ada".to_owned(),
                team_name: name.to_owned(),
                is_active: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }],
        }
    }

    fn make_service(
        team_repo: MockTeamRepository,
        user_repo: MockUserRepository,
    ) -> TeamService<MockTeamRepository, MockUserRepository> {
        TeamService::new(Arc::new(team_repo), Arc::new(user_repo))
    }

    #[tokio::test]
    async fn create_team_upserts_members_and_returns_roster() {
        let expected = roster("backend");
        let mut team_repo = MockTeamRepository::new();
        team_repo
            .expect_exists()
            .with(eq("backend"))
            .times(1)
            .return_once(|_| Ok(false));
        team_repo
            .expect_create()
            .with(eq("backend"))
            .times(1)
            .return_once(|_| Ok(()));
        let returned = expected.clone();
        team_repo
            .expect_get_with_members()
            .times(1)
            .return_once(move |_| Ok(returned));
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_upsert_members()
            .times(1)
            .return_once(|_, _| Ok(()));

        let service = make_service(team_repo, user_repo);
        let members = vec![NewTeamMember {
            id: "u1".to_owned(),
            username: "ada".to_owned(),
            is_active: true,
        }];

        let team = service
            .create_team("backend", members)
            .await
            .expect("create ok");
        assert_eq!(team, expected);
    }

    #[tokio::test]
    async fn create_team_rejects_existing_name() {
        let mut team_repo = MockTeamRepository::new();
        team_repo.expect_exists().times(1).return_once(|_| Ok(true));
        team_repo.expect_create().never();
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_upsert_members().never();

        let service = make_service(team_repo, user_repo);

        let error = service
            .create_team("backend", Vec::new())
            .await
            .expect_err("conflict");
        assert_eq!(error.code(), ErrorCode::TeamExists);
    }

    #[tokio::test]
    async fn create_team_race_on_insert_maps_to_team_exists() {
        let mut team_repo = MockTeamRepository::new();
        team_repo.expect_exists().times(1).return_once(|_| Ok(false));
        team_repo
            .expect_create()
            .times(1)
            .return_once(|_| Err(TeamRepositoryError::duplicate_name("backend")));
        let user_repo = MockUserRepository::new();

        let service = make_service(team_repo, user_repo);

        let error = service
            .create_team("backend", Vec::new())
            .await
            .expect_err("conflict");
        assert_eq!(error.code(), ErrorCode::TeamExists);
    }

    #[tokio::test]
    async fn team_roster_maps_missing_team_to_not_found() {
        let mut team_repo = MockTeamRepository::new();
        team_repo
            .expect_get_with_members()
            .times(1)
            .return_once(|_| Err(TeamRepositoryError::not_found("ghosts")));
        let user_repo = MockUserRepository::new();

        let service = make_service(team_repo, user_repo);

        let error = service.team_roster("ghosts").await.expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn repository_failures_surface_as_internal() {
        let mut team_repo = MockTeamRepository::new();
        team_repo
            .expect_get_with_members()
            .times(1)
            .return_once(|_| Err(TeamRepositoryError::connection("pool exhausted")));
        let user_repo = MockUserRepository::new();

        let service = make_service(team_repo, user_repo);

        let error = service.team_roster("backend").await.expect_err("internal");
        assert_eq!(error.code(), ErrorCode::Internal);
    }
}
