//! users_api - User Management Backend API
//!
//! Wires the storage adapter, the event hooks and the use-case handlers
//! together and serves them over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use users_api::api::{self, AppState};
use users_api::hooks::{log_user_event, EventHooks};
use users_api::repository::{
    InMemoryUserStore, PgUserFinder, PgUserRepository, UserFinder, UserRepository,
};
use users_api::{db, Config, StorageBackend};

/// Initialize tracing/logging
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "users_api=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Storage handles for the configured backend
async fn build_storage(
    config: &Config,
) -> anyhow::Result<(Arc<dyn UserRepository>, Arc<dyn UserFinder>, Option<PgPool>)> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            let store = InMemoryUserStore::new();
            let finder: Arc<dyn UserFinder> = Arc::new(store.finder());
            let repository: Arc<dyn UserRepository> = Arc::new(store);
            Ok((repository, finder, None))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for Postgres storage"))?;

            tracing::info!("Connecting to database...");
            let pool = db::connect(database_url, config.database_max_connections).await?;
            db::verify_connection(&pool).await?;

            if config.run_migrations {
                db::migrate(&pool).await?;
            }
            if !db::check_schema(&pool).await? {
                tracing::error!("Database schema is not complete. Please run migrations.");
                return Err(anyhow::anyhow!("Database schema incomplete"));
            }
            tracing::info!("Database connected successfully");

            let repository: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
            let finder: Arc<dyn UserFinder> = Arc::new(PgUserFinder::new(pool.clone()));
            Ok((repository, finder, Some(pool)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.is_production());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!(storage = ?config.storage, "Starting users_api server");

    let (repository, finder, pool) = build_storage(&config).await?;
    let hooks = EventHooks::new().with_hook("log", log_user_event);
    let app = api::build_app(AppState::new(repository, finder, hooks));

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down...");
    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database connections closed. Goodbye!");
    }

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
