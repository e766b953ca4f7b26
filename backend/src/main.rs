//! Service entry point: configuration, tracing, migrations, HTTP server.

mod server;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppConfig, run};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    init_tracing(&config);
    run(config).await
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let result = if config.environment.is_prod() {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).try_init()
    };
    if let Err(error) = result {
        warn!(error = %error, "tracing init failed");
    }
}
