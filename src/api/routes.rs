//! Routing definitions for the Task API.
//!
//! This module defines all API routes and configures the Axum router
//! with handlers, middleware, and state.

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use axum::routing::get;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_task, delete_task, get_task, health_check, list_tasks, update_task,
};

// =============================================================================
// Router Creation
// =============================================================================

/// Creates the API router with all routes and tracing, without CORS.
///
/// # Examples
///
/// ```ignore
/// let state = AppState::new(Arc::new(InMemoryTaskRepository::new()));
/// let router = create_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Creates the CORS layer for the given browser origin.
///
/// Credentials are allowed, so headers and methods are mirrored from the
/// preflight request instead of using a wildcard.
///
/// # Errors
///
/// Returns `InvalidHeaderValue` if `allowed_origin` is not a valid header value.
pub fn create_cors_layer(allowed_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(allowed_origin)?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::InMemoryTaskRepository;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use tower::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::new(Arc::new(InMemoryTaskRepository::new())))
    }

    #[rstest]
    #[tokio::test]
    async fn health_check_returns_json() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_route_returns_404() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn cors_preflight_allows_configured_origin() {
        let cors = create_cors_layer("http://localhost:3000").unwrap();
        let app = create_test_app().layer(cors);

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/tasks")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }

    #[rstest]
    fn cors_rejects_invalid_origin() {
        assert!(create_cors_layer("bad\norigin").is_err());
    }
}
