//! Process wiring: store selection, authentication, and the HTTP listener.

use crate::board::{
    adapters::{
        memory::InMemoryBoardStore,
        postgres::{PostgresBoardStore, apply_migrations, build_pool},
    },
    ports::BoardStore,
};
use crate::config::{BoardSettings, StorageBackend};
use crate::rpc::{AppState, Authenticator, RpcRouter, StaticTokenAuthenticator, build_router};
use eyre::WrapErr;
use mockable::DefaultClock;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serves the board until Ctrl-C.
///
/// # Errors
///
/// Returns an error when the token table is malformed, the database pool
/// cannot be built, or the listener cannot bind.
pub async fn serve(settings: &BoardSettings) -> eyre::Result<()> {
    let authenticator = StaticTokenAuthenticator::from_config(&settings.auth.tokens)
        .wrap_err("invalid auth.tokens entry")?;
    if authenticator.is_empty() {
        tracing::warn!("no bearer tokens configured; every call will be rejected");
    }
    let authenticator: Arc<dyn Authenticator> = Arc::new(authenticator);

    match settings.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("using in-memory store");
            run(Arc::new(InMemoryBoardStore::new()), authenticator, settings).await
        }
        StorageBackend::Postgres => {
            let url = settings.database_url()?.to_owned();
            let pool_size = settings.storage.pool_size;
            let pool = tokio::task::spawn_blocking(move || build_pool(&url, pool_size))
                .await
                .wrap_err("pool construction task failed")?
                .wrap_err("failed to connect to PostgreSQL")?;
            tracing::info!(pool_size, "using PostgreSQL store");
            run(Arc::new(PostgresBoardStore::new(pool)), authenticator, settings).await
        }
    }
}

async fn run<S>(
    store: Arc<S>,
    authenticator: Arc<dyn Authenticator>,
    settings: &BoardSettings,
) -> eyre::Result<()>
where
    S: BoardStore + 'static,
{
    let router = Arc::new(RpcRouter::new(store, Arc::new(DefaultClock)));
    let app = build_router(
        AppState::new(router, authenticator),
        settings.server.permissive_cors,
    );

    let addr = settings.listen_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server terminated unexpectedly")?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for Ctrl-C");
    }
}

/// Creates the board tables in the configured `PostgreSQL` database.
///
/// # Errors
///
/// Returns an error when no database URL is configured or a statement fails.
pub async fn migrate(settings: &BoardSettings) -> eyre::Result<()> {
    let url = settings.database_url()?.to_owned();
    let pool_size = settings.storage.pool_size;
    tokio::task::spawn_blocking(move || -> eyre::Result<()> {
        let pool = build_pool(&url, pool_size).wrap_err("failed to connect to PostgreSQL")?;
        let mut connection = pool.get().wrap_err("failed to check out a connection")?;
        apply_migrations(&mut connection).wrap_err("failed to create board tables")
    })
    .await
    .wrap_err("migration task failed")??;
    tracing::info!("board tables ready");
    Ok(())
}
