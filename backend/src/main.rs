//! Backend entry-point: configuration, database readiness, and the HTTP server.
//!
//! Startup order matters: the database must answer a probe checkout and the
//! embedded migrations must have run before the image store opens and the
//! listener binds, so the readiness endpoint never reports a half-wired
//! process.

use std::time::Duration;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::config::AppSettings;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, PoolError};
use backend::outbound::storage::CapStdImageStore;
use backend::server::{ServerConfig, build_http_state, create_server};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load configuration")?;
    let bind_addr = settings
        .bind_address
        .parse()
        .wrap_err_with(|| format!("invalid bind address '{}'", settings.bind_address))?;

    let pool = connect_with_retry(&settings).await?;
    run_migrations(settings.database_url()).await?;

    let images = CapStdImageStore::open(settings.storage_root())
        .wrap_err("failed to open the image storage root")?;

    let http_state = build_http_state(pool, images, &settings);
    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, http_state)
        .with_docs(settings.enable_docs)
        .with_permissive_cors(settings.permissive_cors);

    info!(address = %bind_addr, docs = settings.enable_docs, "starting HTTP server");
    create_server(health_state, config)
        .wrap_err("failed to bind the HTTP listener")?
        .await
        .wrap_err("HTTP server terminated abnormally")
}

/// Build the pool and probe one checkout so startup fails fast when the
/// database is down, retrying with exponential backoff before giving up.
async fn connect_with_retry(settings: &AppSettings) -> Result<DbPool> {
    let attempts = settings.db_retry_attempts.max(1);
    let mut delay = Duration::from_millis(settings.db_retry_base_delay_ms);
    let mut attempt = 1u32;

    loop {
        match probe_database(settings).await {
            Ok(pool) => {
                info!(attempt, "database is ready");
                return Ok(pool);
            }
            Err(error) if attempt < attempts => {
                warn!(attempt, delay = ?delay, error = %error, "database not ready; retrying");
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
                attempt += 1;
            }
            Err(error) => {
                return Err(eyre!(error))
                    .wrap_err_with(|| format!("database unreachable after {attempts} attempt(s)"));
            }
        }
    }
}

async fn probe_database(settings: &AppSettings) -> Result<DbPool, PoolError> {
    let config = PoolConfig::new(settings.database_url()).with_max_size(settings.db_pool_max_size);
    let pool = DbPool::new(config).await?;
    let probe = pool.get().await?;
    drop(probe);
    Ok(pool)
}

/// Run the embedded migrations over a short-lived synchronous connection.
async fn run_migrations(database_url: String) -> Result<()> {
    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut conn = PgConnection::establish(&database_url)
            .wrap_err("failed to open the migration connection")?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|error| eyre!("failed to run migrations: {error}"))?;
        if !applied.is_empty() {
            info!(count = applied.len(), "applied pending migrations");
        }
        Ok(())
    })
    .await
    .wrap_err("migration task failed")?
}
