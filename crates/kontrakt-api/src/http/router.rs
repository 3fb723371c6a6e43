//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Webhook: one event in, one reply out
        .route(
            "/sessions/{conversation_id}/events",
            post(handlers::event::post_event),
        )
        // Contract history and document download
        .route("/contracts", get(handlers::contract::list_contracts))
        .route(
            "/contracts/{id}/document",
            get(handlers::contract::download_document),
        )
        .route("/health", get(handlers::health))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
