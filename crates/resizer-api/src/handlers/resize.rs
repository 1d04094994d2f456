//! Resize endpoints

use crate::error::{HttpError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{RawPathParams, State},
    Json,
};
use resizer_processing::{ResizeRequest, ResizeResponse};
use std::sync::Arc;

/// `POST /resize` with `{ "name": "<percent-encoded name>" }`
pub async fn resize(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ResizeRequest>,
) -> Result<Json<ResizeResponse>, HttpError> {
    let response = state.resize.handle(request).await?;
    Ok(Json(response))
}

/// `GET /resize/{name}`
///
/// The raw (still percent-encoded) segment is forwarded so the name is
/// decoded exactly once, by the parser.
pub async fn resize_by_path(
    State(state): State<Arc<AppState>>,
    params: RawPathParams,
) -> Result<Json<ResizeResponse>, HttpError> {
    let name = params
        .iter()
        .find(|(key, _)| *key == "name")
        .map(|(_, value)| value.to_string())
        .unwrap_or_default();

    let response = state.resize.handle(ResizeRequest { name }).await?;
    Ok(Json(response))
}
