//! HTTP handlers for the Task API.
//!
//! Each handler performs one independent store operation. Not-found results
//! map to 404, data-access faults to 5xx via [`ApiErrorResponse`].

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use super::dto::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use super::error::ApiErrorResponse;
use crate::domain::TaskId;
use crate::infrastructure::TaskRepository;

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
///
/// Uses a trait object so the backend (in-memory or `PostgreSQL`) can be
/// chosen at runtime by `RepositoryFactory`.
#[derive(Clone)]
pub struct AppState {
    /// Task repository for persistence.
    pub task_repository: Arc<dyn TaskRepository>,
}

impl AppState {
    /// Creates a new `AppState` around the given repository.
    #[must_use]
    pub fn new(task_repository: Arc<dyn TaskRepository>) -> Self {
        Self { task_repository }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AppState")
            .field("task_repository", &"Arc<dyn TaskRepository>")
            .finish()
    }
}

fn task_id_from(path: Result<Path<i64>, PathRejection>) -> Result<TaskId, ApiErrorResponse> {
    let Path(id) = path?;
    Ok(TaskId::new(id))
}

fn not_found(id: TaskId) -> ApiErrorResponse {
    ApiErrorResponse::not_found(format!("Task {id} not found"))
}

// =============================================================================
// POST /api/tasks
// =============================================================================

/// Creates a new task.
///
/// # Request Body
///
/// ```json
/// { "title": "Task title", "description": "Optional description" }
/// ```
///
/// # Response
///
/// - **201 Created**: Task created, body carries the generated `id`
/// - **400 Bad Request**: Missing or invalid title, malformed JSON
/// - **5xx**: Repository operation failed
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on validation or repository failure.
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiErrorResponse> {
    let Json(request) = payload?;
    let task = request.into_task()?;

    let created = state.task_repository.save(task).await?;
    tracing::debug!(task_id = ?created.id, "Task created");

    Ok((StatusCode::CREATED, Json(TaskResponse::from(created))))
}

// =============================================================================
// GET /api/tasks
// =============================================================================

/// Lists every task. Order is unspecified.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the repository fails.
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskResponse>>, ApiErrorResponse> {
    let tasks = state.task_repository.find_all().await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

// =============================================================================
// GET /api/tasks/{id}
// =============================================================================

/// Fetches one task.
///
/// # Response
///
/// - **200 OK**: Task found
/// - **404 Not Found**: No task with this ID
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the task is absent or the repository fails.
pub async fn get_task(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let id = task_id_from(path)?;

    let task = state
        .task_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// PUT /api/tasks/{id}
// =============================================================================

/// Partially updates a task.
///
/// Only non-null fields in the body overwrite the stored record.
///
/// # Response
///
/// - **200 OK**: Updated task
/// - **400 Bad Request**: Blank or too-long title, malformed JSON
/// - **404 Not Found**: No task with this ID, including one deleted while
///   the update was in flight
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on validation failure, absence or repository failure.
pub async fn update_task(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let id = task_id_from(path)?;
    let Json(request) = payload?;
    let patch = request.into_patch()?;

    let existing = state
        .task_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if patch.is_empty() {
        return Ok(Json(TaskResponse::from(existing)));
    }

    // The row can disappear between the read and the write.
    let updated = state
        .task_repository
        .update(existing.apply(patch))
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::debug!(task_id = %id, "Task updated");

    Ok(Json(TaskResponse::from(updated)))
}

// =============================================================================
// DELETE /api/tasks/{id}
// =============================================================================

/// Deletes a task. Idempotent: a missing task still yields 204.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the path is invalid or the repository fails.
pub async fn delete_task(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = task_id_from(path)?;
    state.task_repository.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// GET /health
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Number of stored tasks, proving the store is reachable.
    pub tasks: u64,
}

/// Health check endpoint.
///
/// ```json
/// { "status": "healthy", "version": "0.1.0", "tasks": 3 }
/// ```
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the store cannot be reached.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiErrorResponse> {
    let tasks = state.task_repository.count().await?;
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tasks,
    }))
}

// =============================================================================
// Tests
// =============================================================================
