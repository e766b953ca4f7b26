//! Server construction and wiring.
//!
//! Builds the dependency graph pool → repositories → services → HTTP state,
//! registers the routes, and runs the Actix server. Readiness flips only
//! after migrations have applied and the pool is up.

mod config;

pub use config::{AppConfig, ConfigError, Environment};

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use backend::domain::ports::{
    AssignmentStatsQuery, PullRequestLifecycle, TeamManagement, UserManagement,
};
use backend::domain::{PullRequestService, StatsService, TeamService, UserService};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::pull_requests::{
    create_pull_request, merge_pull_request, reassign_reviewer,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::stats::assignments_by_user;
use backend::inbound::http::teams::{add_team, get_team};
use backend::inbound::http::users::{get_review_queue, set_is_active};
use backend::outbound::persistence::{
    DbPool, DieselPullRequestRepository, DieselTeamRepository, DieselUserRepository, PoolConfig,
    run_pending_migrations,
};
use backend::outbound::random::EntropyRandomSource;
use backend::{Deadline, Trace};

/// Assemble the HTTP state over database-backed adapters.
pub fn build_http_state(pool: &DbPool) -> HttpState {
    let team_repo = Arc::new(DieselTeamRepository::new(pool.clone()));
    let user_repo = Arc::new(DieselUserRepository::new(pool.clone()));
    let pr_repo = Arc::new(DieselPullRequestRepository::new(pool.clone()));
    let rng = Arc::new(EntropyRandomSource::new());
    let clock = Arc::new(DefaultClock);

    let teams: Arc<dyn TeamManagement> =
        Arc::new(TeamService::new(team_repo, user_repo.clone()));
    let users: Arc<dyn UserManagement> =
        Arc::new(UserService::new(user_repo.clone(), pr_repo.clone()));
    let pull_requests: Arc<dyn PullRequestLifecycle> = Arc::new(PullRequestService::new(
        pr_repo.clone(),
        user_repo,
        rng,
        clock,
    ));
    let stats: Arc<dyn AssignmentStatsQuery> = Arc::new(StatsService::new(pr_repo));

    HttpState {
        teams,
        users,
        pull_requests,
        stats,
    }
}

/// Register every REST endpoint on the application.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/team").service(add_team).service(get_team))
        .service(
            web::scope("/users")
                .service(set_is_active)
                .service(get_review_queue),
        )
        .service(
            web::scope("/pullRequest")
                .service(create_pull_request)
                .service(merge_pull_request)
                .service(reassign_reviewer),
        )
        .service(web::scope("/stats").service(assignments_by_user))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    cfg.route("/api-docs/openapi.json", web::get().to(openapi_json));
}

#[cfg(debug_assertions)]
async fn openapi_json() -> actix_web::HttpResponse {
    use utoipa::OpenApi;

    actix_web::HttpResponse::Ok().json(backend::ApiDoc::openapi())
}

/// Run the HTTP server until shutdown.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    run_pending_migrations(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;

    let pool = DbPool::new(
        PoolConfig::new(&config.database_url).with_max_size(config.pool_size),
    )
    .await
    .map_err(std::io::Error::other)?;

    let state = web::Data::new(build_http_state(&pool));
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();
    let deadline = config.request_deadline;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Deadline::new(deadline))
            .wrap(Trace)
            .configure(routes)
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr, "server started");
    server.run().await
}
