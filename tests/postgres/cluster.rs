//! Locates the `PostgreSQL` server the integration tests run against.
//!
//! `TASKTRACK_TEST_DATABASE_URL` selects an existing server. Without it an
//! embedded cluster is started once per test binary and shared by every test.

use postgresql_embedded::{PostgreSQL, Settings};
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};

/// Boxed error type for fallible helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming an external test database.
pub const TEST_DATABASE_URL_VAR: &str = "TASKTRACK_TEST_DATABASE_URL";

static EMBEDDED_CLUSTER: OnceLock<Result<EmbeddedCluster, String>> = OnceLock::new();

/// Embedded server kept alive for the lifetime of the test binary.
struct EmbeddedCluster {
    url: String,
    _runtime: Runtime,
    _postgres: PostgreSQL,
}

impl EmbeddedCluster {
    fn start() -> Result<Self, BoxError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let mut postgres = PostgreSQL::new(Settings::default());
        runtime.block_on(async {
            postgres.setup().await?;
            postgres.start().await
        })?;
        let url = postgres.settings().url("postgres");
        tracing::info!("embedded PostgreSQL cluster started");
        Ok(Self {
            url,
            _runtime: runtime,
            _postgres: postgres,
        })
    }
}

/// Returns the URL of the database the tests create their schemas in.
///
/// The embedded cluster starts on its own thread so that callers already
/// running inside a Tokio runtime can block on its start-up.
///
/// # Errors
///
/// Returns an error if no external database is configured and the embedded
/// cluster fails to start.
pub fn database_url() -> Result<String, BoxError> {
    if let Ok(url) = std::env::var(TEST_DATABASE_URL_VAR) {
        return Ok(url);
    }
    let cluster = EMBEDDED_CLUSTER.get_or_init(|| {
        std::thread::spawn(|| EmbeddedCluster::start().map_err(|err| err.to_string()))
            .join()
            .unwrap_or_else(|_| Err("embedded PostgreSQL start-up panicked".to_owned()))
    });
    match cluster {
        Ok(embedded) => Ok(embedded.url.clone()),
        Err(reason) => Err(format!("failed to start embedded PostgreSQL: {reason}").into()),
    }
}
