//! Viewer state handler.

use axum::{extract::State, Json};
use csvview::ViewerSnapshot;

use crate::server::state::AppState;

/// Get what the page should currently show.
pub async fn get_state(State(state): State<AppState>) -> Json<ViewerSnapshot> {
    Json(state.snapshot().await)
}
