/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config → dependencies → Router
 * - middleware wiring (http layers, authentication)
 * - axum::serve()
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v0::handlers::health::health;
use crate::config::Config;
use crate::middleware;
use crate::repos::{CertificateStore, PgCertificateStore, PgUserStore, UserStore};
use crate::services::auth::build_resolver_chain;
use crate::services::cache::{CacheClient, ValkeyClient};
use crate::services::flags::FeatureFlags;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG=info,certificates_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        app_env = ?config.app_env,
        addr = %config.addr,
        enforce_jwt_scopes = config.enforce_jwt_scopes,
        "starting certificates API"
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to DATABASE_URL")?;

    let cache = ValkeyClient::new(&config.redis_url)
        .await
        .context("failed to connect to REDIS_URL")?;

    assemble_state(
        config,
        Arc::new(PgUserStore::new(db.clone())),
        Arc::new(PgCertificateStore::new(db)),
        cache,
    )
}

/// Wire already-connected stores into an `AppState`.
pub fn assemble_state<C: CacheClient>(
    config: &Config,
    users: Arc<dyn UserStore>,
    certificates: Arc<dyn CertificateStore>,
    cache: C,
) -> Result<AppState> {
    let identity = build_resolver_chain(config, users, cache)
        .context("failed to build access token verifier")?;
    let flags = Arc::new(FeatureFlags::new(config.enforce_jwt_scopes));

    Ok(AppState::new(identity, certificates, flags))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let certificates = middleware::auth::access::apply(api::v0::routes(), state.clone());

    let router = Router::new()
        .route("/health", get(health))
        .nest("/certificates/v0", certificates)
        .with_state(state);

    middleware::http::apply(
        router,
        Duration::from_secs(config.request_timeout_seconds),
    )
}
