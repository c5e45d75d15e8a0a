//! Upload handler: run a submitted file through the load pipeline.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap},
    Json,
};
use csvview::{accept_file, CsvView, RawFile, ViewerSnapshot};
use serde::Deserialize;
use tracing::{info, warn};

use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// Original file name, as picked in the browser.
    pub name: Option<String>,
}

/// Accept a raw file body and replace the viewer state with the result.
///
/// A second upload while one is running is rejected with 409 and leaves the
/// state untouched. A failed load keeps the previous table and records the
/// error message. The load runs in its own task holding the gate, so a client
/// that disconnects mid-load cannot leave the state stuck in `loading`.
pub async fn upload_file(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ViewerSnapshot>, ApiError> {
    let permit = state.gate.try_acquire()?;

    let mut raw = RawFile::from_bytes(params.name.unwrap_or_default(), body.to_vec());
    if let Some(mime_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        raw = raw.with_mime_type(mime_type);
    }

    let task_state = state.clone();
    tokio::spawn(async move {
        let _permit = permit;
        load_upload(&task_state, raw).await
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
}

async fn load_upload(state: &AppState, raw: RawFile) -> Result<Json<ViewerSnapshot>, ApiError> {
    let name = raw.name().to_string();

    if let Err(e) = accept_file(raw.name(), raw.mime_type()) {
        warn!(file = %name, "rejected upload: {}", e);
        let message = e.user_message();
        state.replace(|viewer| viewer.failed(message)).await;
        return Err(e.into());
    }

    state.replace(|viewer| viewer.begin_loading()).await;

    let config = (*state.config).clone();
    let outcome = tokio::task::spawn_blocking(move || CsvView::with_config(config).load(&raw))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()));

    match outcome {
        Ok(Ok(result)) => {
            info!(
                file = %name,
                rows = result.stats.total_rows,
                encoding = %result.encoding,
                "upload loaded"
            );
            state.replace(|viewer| viewer.loaded(result)).await;
            Ok(Json(state.snapshot().await))
        }
        Ok(Err(e)) => {
            warn!(file = %name, "upload failed: {}", e);
            let message = e.user_message();
            state.replace(|viewer| viewer.failed(message)).await;
            Err(e.into())
        }
        Err(e) => {
            state
                .replace(|viewer| viewer.failed("Error processing CSV file."))
                .await;
            Err(e)
        }
    }
}
