//! HTTP handlers.

pub mod contract;
pub mod event;

/// GET /api/v1/health - liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
