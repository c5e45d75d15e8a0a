//! Report handler for the PDF and print views.

use axum::{extract::State, Json};
use chrono::Utc;
use csvview::{export_file_name, Report};
use serde::Serialize;

use crate::server::state::AppState;

#[derive(Serialize)]
pub struct ReportResponse {
    /// Suggested name for the saved PDF.
    pub file_name: String,
    pub report: Report,
}

/// Build the report for whatever is currently shown.
pub async fn get_report(State(state): State<AppState>) -> Json<ReportResponse> {
    let viewer = state.viewer.read().await;
    let now = Utc::now();
    let stats = viewer.stats();

    Json(ReportResponse {
        file_name: export_file_name(stats.map(|s| s.file_name.as_str()), "pdf", now),
        report: Report::new(&viewer.display_table(), stats, now),
    })
}
