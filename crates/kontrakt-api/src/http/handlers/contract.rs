//! Contract history and document download handlers.
//!
//! Endpoints:
//! - GET /api/v1/contracts               - List recent contract summaries
//! - GET /api/v1/contracts/{id}/document - Download the stored document

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use kontrakt_core::repository::ContractRepository;
use kontrakt_core::store::DocumentStore;
use kontrakt_types::contract::ContractRecord;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for contract listing.
#[derive(Debug, Deserialize)]
pub struct ContractListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

/// GET /api/v1/contracts - List recent contract summaries, newest first.
pub async fn list_contracts(
    State(state): State<AppState>,
    Query(query): Query<ContractListQuery>,
) -> Result<Json<ApiResponse<Vec<ContractRecord>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let records = state
        .intake
        .repo()
        .list_recent(query.limit.clamp(1, 100))
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(records, request_id, elapsed)
        .with_link("self", "/api/v1/contracts");
    Ok(Json(resp))
}

/// GET /api/v1/contracts/{id}/document - Stream the stored document bytes.
pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let record = state
        .intake
        .repo()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("contract {id}")))?;

    let bytes = state.intake.store().load(&record.file_ref).await?;

    let filename = record
        .file_ref
        .rsplit('/')
        .next()
        .unwrap_or("contract.pdf");
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}
