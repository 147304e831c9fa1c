//! Backend entry-point: loads settings, prepares storage and serves the REST
//! API with its OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use groundwork::inbound::http::health::HealthState;
use groundwork::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use groundwork::settings::Settings;
use server::{ServerConfig, create_server};

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter()));
    let result = if settings.in_production {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).compact().try_init()
    };
    if let Err(error) = result {
        warn!(%error, "tracing init failed");
    }
}

async fn connect_database(settings: &Settings) -> std::io::Result<Option<DbPool>> {
    let Some(database_url) = settings.database_url().map_err(std::io::Error::other)? else {
        return Ok(None);
    };
    let applied = run_pending_migrations(&database_url)
        .await
        .map_err(|err| std::io::Error::other(format!("database migrations failed: {err}")))?;
    info!(applied, "database migrations applied");

    let pool_config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(format!("database pool setup failed: {err}")))?;
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = Settings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    init_tracing(&settings);

    if settings.in_production && settings.secret_key().is_placeholder() {
        warn!("APP_SECRET_KEY is unset; running in production with the placeholder secret");
    }
    info!(debug = settings.debug(), ?settings, "settings loaded");

    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(&settings, bind_addr);
    match connect_database(&settings).await? {
        Some(pool) => config = config.with_db_pool(pool),
        None => warn!("no database configured; articles are kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");
    let result = server.await;
    health_state.mark_draining();
    result
}
