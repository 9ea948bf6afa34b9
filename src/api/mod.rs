//! HTTP surface over the recommendation service.
//!
//! Exposes two read-only reports and a liveness probe:
//!
//! - `GET /important_tasks/`
//! - `GET /busy_employees/`
//! - `GET /health`

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{EMPTY_IMPORTANT_TASKS_MESSAGE, ImportantTasksResponse};

use crate::recommendation::services::RecommendationService;
use crate::tracker::ports::TrackerRepository;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
pub struct AppState<R>
where
    R: TrackerRepository,
{
    recommendations: Arc<RecommendationService<R>>,
}

impl<R> AppState<R>
where
    R: TrackerRepository,
{
    /// Wraps a recommendation service for use by the router.
    #[must_use]
    pub fn new(recommendations: RecommendationService<R>) -> Self {
        Self {
            recommendations: Arc::new(recommendations),
        }
    }
}

impl<R> Clone for AppState<R>
where
    R: TrackerRepository,
{
    fn clone(&self) -> Self {
        Self {
            recommendations: Arc::clone(&self.recommendations),
        }
    }
}

/// Builds the application router with request tracing.
#[must_use]
pub fn router<R>(state: AppState<R>) -> Router
where
    R: TrackerRepository + 'static,
{
    Router::new()
        .route("/important_tasks/", get(handlers::important_tasks::<R>))
        .route("/busy_employees/", get(handlers::busy_employees::<R>))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
