//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, and not every file uses every helper.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use futures::future::BoxFuture;
use http_body_util::BodyExt;
use tower::ServiceExt;

use task_api::api::{AppState, create_router};
use task_api::domain::{Task, TaskId};
use task_api::infrastructure::{InMemoryTaskRepository, RepositoryError, TaskRepository};

// =============================================================================
// App Creation Helpers
// =============================================================================

/// Creates a router over a fresh in-memory repository.
pub fn create_test_app() -> Router {
    create_router(AppState::new(Arc::new(InMemoryTaskRepository::new())))
}

/// Creates a router over a repository whose every operation fails.
pub fn create_failing_app(error: RepositoryError) -> Router {
    create_router(AppState::new(Arc::new(FailingTaskRepository { error })))
}

/// Creates a router whose repository loses each task right after it is read.
pub fn create_vanishing_app() -> (Router, InMemoryTaskRepository) {
    let inner = InMemoryTaskRepository::new();
    let repository = VanishingTaskRepository {
        inner: inner.clone(),
    };
    (create_router(AppState::new(Arc::new(repository))), inner)
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Sends a request and returns the status and parsed JSON body (`Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

/// Sends a prepared request and returns the status and parsed JSON body.
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Creates a task through the API and returns the response body.
pub async fn create_task(app: &Router, title: &str, description: Option<&str>) -> serde_json::Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/tasks",
        Some(serde_json::json!({ "title": title, "description": description })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

// =============================================================================
// Failing Repository
// =============================================================================

/// Repository stub that fails every call with the configured error.
pub struct FailingTaskRepository {
    pub error: RepositoryError,
}

impl FailingTaskRepository {
    fn fail<T: Send + 'static>(&self) -> BoxFuture<'_, Result<T, RepositoryError>> {
        let error = self.error.clone();
        Box::pin(async move { Err(error) })
    }
}

impl TaskRepository for FailingTaskRepository {
    fn find_all(&self) -> BoxFuture<'_, Result<Vec<Task>, RepositoryError>> {
        self.fail()
    }

    fn find_by_id(&self, _id: TaskId) -> BoxFuture<'_, Result<Option<Task>, RepositoryError>> {
        self.fail()
    }

    fn save(&self, _task: Task) -> BoxFuture<'_, Result<Task, RepositoryError>> {
        self.fail()
    }

    fn update(&self, _task: Task) -> BoxFuture<'_, Result<Option<Task>, RepositoryError>> {
        self.fail()
    }

    fn exists_by_id(&self, _id: TaskId) -> BoxFuture<'_, Result<bool, RepositoryError>> {
        self.fail()
    }

    fn delete_by_id(&self, _id: TaskId) -> BoxFuture<'_, Result<(), RepositoryError>> {
        self.fail()
    }

    fn count(&self) -> BoxFuture<'_, Result<u64, RepositoryError>> {
        self.fail()
    }
}

// =============================================================================
// Vanishing Repository
// =============================================================================

/// Repository that deletes a task immediately after `find_by_id` reads it,
/// as if another request removed it concurrently.
pub struct VanishingTaskRepository {
    pub inner: InMemoryTaskRepository,
}

impl TaskRepository for VanishingTaskRepository {
    fn find_all(&self) -> BoxFuture<'_, Result<Vec<Task>, RepositoryError>> {
        self.inner.find_all()
    }

    fn find_by_id(&self, id: TaskId) -> BoxFuture<'_, Result<Option<Task>, RepositoryError>> {
        Box::pin(async move {
            let found = self.inner.find_by_id(id).await?;
            self.inner.delete_by_id(id).await?;
            Ok(found)
        })
    }

    fn save(&self, task: Task) -> BoxFuture<'_, Result<Task, RepositoryError>> {
        self.inner.save(task)
    }

    fn update(&self, task: Task) -> BoxFuture<'_, Result<Option<Task>, RepositoryError>> {
        self.inner.update(task)
    }

    fn exists_by_id(&self, id: TaskId) -> BoxFuture<'_, Result<bool, RepositoryError>> {
        self.inner.exists_by_id(id)
    }

    fn delete_by_id(&self, id: TaskId) -> BoxFuture<'_, Result<(), RepositoryError>> {
        self.inner.delete_by_id(id)
    }

    fn count(&self) -> BoxFuture<'_, Result<u64, RepositoryError>> {
        self.inner.count()
    }
}
