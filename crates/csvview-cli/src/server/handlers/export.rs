//! Export handler: download the shown table.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use chrono::Utc;
use csvview::export::write_table;
use csvview::{export_file_name, OutputFormat};
use serde::Deserialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
}

/// Serve the displayed table as an attachment.
pub async fn export_table(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, ApiError> {
    let format: OutputFormat = match params.format {
        Some(f) => f.parse().map_err(ApiError::BadRequest)?,
        None => OutputFormat::default(),
    };

    let viewer = state.viewer.read().await;
    let file_name = export_file_name(
        viewer.stats().map(|s| s.file_name.as_str()),
        format.extension(),
        Utc::now(),
    );

    let mut body = Vec::new();
    write_table(&viewer.display_table(), format, &mut body)?;

    Ok((
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", header_safe(&file_name)),
            ),
        ],
        body,
    ))
}

/// Keep the name usable inside a quoted header value.
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_safe_replaces_quotes_and_non_ascii() {
        assert_eq!(header_safe("a\"b.csv"), "a_b.csv");
        assert_eq!(header_safe("relatório_report.csv"), "relat_rio_report.csv");
        assert_eq!(header_safe("my file.csv"), "my file.csv");
    }
}
