//! Serves workload reports and executor recommendations over HTTP.
//!
//! Configuration is read from the environment (see [`tasktrack::config`]).
//! When `DATABASE_URL` is set the server reads from `PostgreSQL`; otherwise it
//! uses an in-memory store, optionally seeded from `TASKTRACK_SEED_PATH`.

use mockable::DefaultClock;
use tasktrack::api::{self, AppState};
use tasktrack::config::{ConfigError, ServiceConfig, StorageConfig};
use tasktrack::recommendation::{domain::RecommendationPolicy, services::RecommendationService};
use tasktrack::tracker::{
    adapters::{
        memory::{InMemoryTrackerRepository, SeedError, load_seed_file},
        postgres::PostgresTrackerRepository,
    },
    ports::{TrackerRepository, TrackerRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "tasktrack=info,tower_http=info";

/// Errors that stop the server.
#[derive(Debug, Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Repository(#[from] TrackerRepositoryError),
    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> Result<(), ServerError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env()?;
    let runtime = Builder::new_multi_thread().enable_all().build()?;

    match &config.storage {
        StorageConfig::Postgres {
            database_url,
            pool_size,
        } => {
            let repository = PostgresTrackerRepository::connect(database_url, *pool_size)?;
            tracing::info!(pool_size, "using PostgreSQL storage");
            runtime.block_on(serve(&config, repository))
        }
        StorageConfig::InMemory { seed_path } => {
            let repository = match seed_path {
                Some(path) => {
                    let document = load_seed_file(path)?;
                    InMemoryTrackerRepository::from_seed(document, &DefaultClock)?
                }
                None => InMemoryTrackerRepository::new(),
            };
            tracing::info!(seeded = seed_path.is_some(), "using in-memory storage");
            runtime.block_on(serve(&config, repository))
        }
    }
}

async fn serve<R>(config: &ServiceConfig, repository: R) -> Result<(), ServerError>
where
    R: TrackerRepository + 'static,
{
    let policy: RecommendationPolicy = config.policy;
    let service = RecommendationService::new(Arc::new(repository), policy);
    let app = api::router(AppState::new(service));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, parent_tolerance = policy.parent_tolerance(), "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
