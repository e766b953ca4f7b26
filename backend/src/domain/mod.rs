//! Domain entities, rules, and services.
//!
//! Everything in here is transport and storage agnostic: state lives behind
//! the driven ports in [`ports`], and the services implement the driving
//! ports the HTTP adapter consumes. The reviewer-assignment rules — who may
//! review what, how replacements are drawn under churn, how racing mutations
//! stay consistent — live in this module and nowhere else.

pub mod error;
pub mod ports;
pub mod pull_request;
pub mod selection;
pub mod team;
pub mod user;

mod pull_request_service;
mod stats_service;
mod team_service;
mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::pull_request::{PrStatus, PullRequest, PullRequestSummary, ReviewerAssignmentStat};
pub use self::pull_request_service::{MAX_ASSIGNED_REVIEWERS, PullRequestService};
pub use self::stats_service::StatsService;
pub use self::team::{NewTeamMember, Team};
pub use self::team_service::TeamService;
pub use self::user::User;
pub use self::user_service::UserService;
