//! Request handlers.

use super::{ApiError, AppState};
use crate::recommendation::services::{BusyEmployee, ImportantTaskView};
use crate::tracker::ports::TrackerRepository;
use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::{Value, json};

/// Message returned when no task is important.
pub const EMPTY_IMPORTANT_TASKS_MESSAGE: &str = "No important tasks found";

/// Body of `GET /important_tasks/`.
///
/// A plain array when tasks exist, otherwise an object carrying a message and
/// an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ImportantTasksResponse {
    /// At least one important task.
    Found(Vec<ImportantTaskView>),
    /// No important tasks.
    Empty {
        /// Human-readable explanation.
        message: &'static str,
        /// Always empty.
        important_tasks: Vec<ImportantTaskView>,
    },
}

impl From<Vec<ImportantTaskView>> for ImportantTasksResponse {
    fn from(tasks: Vec<ImportantTaskView>) -> Self {
        if tasks.is_empty() {
            Self::Empty {
                message: EMPTY_IMPORTANT_TASKS_MESSAGE,
                important_tasks: tasks,
            }
        } else {
            Self::Found(tasks)
        }
    }
}

pub(super) async fn important_tasks<R>(
    State(state): State<AppState<R>>,
) -> Result<Json<ImportantTasksResponse>, ApiError>
where
    R: TrackerRepository + 'static,
{
    let report = state.recommendations.important_tasks().await?;
    Ok(Json(report.into_tasks().into()))
}

pub(super) async fn busy_employees<R>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<BusyEmployee>>, ApiError>
where
    R: TrackerRepository + 'static,
{
    Ok(Json(state.recommendations.busy_employees().await?))
}

#[expect(clippy::unused_async, reason = "axum handlers must be async")]
pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
