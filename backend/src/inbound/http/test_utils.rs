//! Test helpers for HTTP handler tests.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    MockAssignmentStatsQuery, MockPullRequestLifecycle, MockTeamManagement, MockUserManagement,
};

use super::state::HttpState;

/// Builder assembling an [`HttpState`] from mocked driving ports.
///
/// Ports left unset get a fresh mock with no expectations, so an unexpected
/// call fails the test loudly.
#[derive(Default)]
pub(crate) struct StateBuilder {
    teams: Option<MockTeamManagement>,
    users: Option<MockUserManagement>,
    pull_requests: Option<MockPullRequestLifecycle>,
    stats: Option<MockAssignmentStatsQuery>,
}

impl StateBuilder {
    pub(crate) fn teams(mut self, mock: MockTeamManagement) -> Self {
        self.teams = Some(mock);
        self
    }

    pub(crate) fn users(mut self, mock: MockUserManagement) -> Self {
        self.users = Some(mock);
        self
    }

    pub(crate) fn pull_requests(mut self, mock: MockPullRequestLifecycle) -> Self {
        self.pull_requests = Some(mock);
        self
    }

    pub(crate) fn stats(mut self, mock: MockAssignmentStatsQuery) -> Self {
        self.stats = Some(mock);
        self
    }

    pub(crate) fn build(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            teams: Arc::new(self.teams.unwrap_or_default()),
            users: Arc::new(self.users.unwrap_or_default()),
            pull_requests: Arc::new(self.pull_requests.unwrap_or_default()),
            stats: Arc::new(self.stats.unwrap_or_default()),
        })
    }
}

pub(crate) fn state() -> StateBuilder {
    StateBuilder::default()
}
