//! Axum application setup.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use super::state::AppState;
use crate::web::static_handler;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/state", get(handlers::get_state))
        .route(
            "/upload",
            post(handlers::upload_file).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/report", get(handlers::get_report))
        .route("/export", get(handlers::export_table));

    Router::new()
        .nest("/api", api_routes)
        .fallback(static_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server. Returns after Ctrl+C.
pub async fn run_server(
    state: AppState,
    port: u16,
    max_upload_bytes: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state, max_upload_bytes);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use csvview::ViewerConfig;
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    const LIMIT: usize = 1024 * 1024;

    fn router(state: &AppState) -> Router {
        create_router(state.clone(), LIMIT)
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), LIMIT).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn upload(name: &str, content_type: &str, body: &'static [u8]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/upload?name={}", name))
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_initial_state_is_sample() {
        let state = AppState::new(ViewerConfig::default());
        let response = router(&state)
            .oneshot(Request::get("/api/state").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["sample"], true);
        assert_eq!(body["summary"]["total_rows"], 7);
        assert_eq!(body["summary"]["file_size"], "N/A");
    }

    #[tokio::test]
    async fn test_upload_replaces_table() {
        let state = AppState::new(ViewerConfig::default());
        let response = router(&state)
            .oneshot(upload(
                "people.csv",
                "text/csv",
                b"name,age\nAlice,30\n\nBob,25\n",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["sample"], false);
        assert_eq!(body["summary"]["total_rows"], 2);
        assert_eq!(body["summary"]["encoding"], "UTF-8");
        assert_eq!(body["table"]["rows"][1]["name"], "Bob");
        assert!(!state.gate.is_busy());
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_previous_table() {
        let state = AppState::new(ViewerConfig::default());
        router(&state)
            .oneshot(upload("a.csv", "text/csv", b"x,y\n1,2\n"))
            .await
            .unwrap();

        let response = router(&state)
            .oneshot(upload("empty.csv", "text/csv", b"\n\n"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["message"], "CSV file is empty or contains no valid data.");

        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.table.headers, vec!["x", "y"]);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("CSV file is empty or contains no valid data.")
        );
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_csv() {
        let state = AppState::new(ViewerConfig::default());
        let response = router(&state)
            .oneshot(upload("notes.txt", "text/plain", b"a,b\n1,2\n"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "unsupported_file");
        assert_eq!(body["message"], "Please select a valid CSV file.");
        assert!(state.snapshot().await.sample);
    }

    #[tokio::test]
    async fn test_abandoned_upload_still_completes() {
        let state = AppState::new(ViewerConfig::default());
        let request = router(&state).oneshot(upload("a.csv", "text/csv", b"x,y\n1,2\n"));

        // The client gives up before the response arrives.
        let _ = tokio::time::timeout(Duration::from_millis(1), request).await;

        for _ in 0..200 {
            if !state.gate.is_busy() && !state.snapshot().await.sample {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let snapshot = state.snapshot().await;
        assert!(!snapshot.loading);
        assert!(!snapshot.sample);
        assert_eq!(snapshot.table.headers, vec!["x", "y"]);
        assert!(!state.gate.is_busy());
    }

    #[tokio::test]
    async fn test_upload_accepted_by_mime_type() {
        let state = AppState::new(ViewerConfig::default());
        let response = router(&state)
            .oneshot(upload("export", "text/csv; charset=utf-8", b"x,y\n1,2\n"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["stats"]["file_name"], "export");
    }

    #[tokio::test]
    async fn test_upload_while_busy_conflicts() {
        let state = AppState::new(ViewerConfig::default());
        let _permit = state.gate.try_acquire().unwrap();

        let response = router(&state)
            .oneshot(upload("a.csv", "text/csv", b"x,y\n1,2\n"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let snapshot = state.snapshot().await;
        assert!(snapshot.sample);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_report_names_pdf_after_source() {
        let state = AppState::new(ViewerConfig::default());
        router(&state)
            .oneshot(upload("invoices.csv", "text/csv", b"id,total\n1,10\n"))
            .await
            .unwrap();

        let response = router(&state)
            .oneshot(Request::get("/api/report").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["file_name"], "invoices_report.pdf");
        assert_eq!(body["report"]["stats"]["total_rows"], 1);
    }

    #[tokio::test]
    async fn test_export_sample_as_tsv() {
        let state = AppState::new(ViewerConfig::default());
        let response = router(&state)
            .oneshot(
                Request::get("/api/export?format=tsv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("csv_report_"));
        assert!(disposition.ends_with(".tsv\""));

        let bytes = to_bytes(response.into_body(), LIMIT).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Invoice\tStatus\tMethod\tAmount\n"));
    }

    #[tokio::test]
    async fn test_export_unknown_format() {
        let state = AppState::new(ViewerConfig::default());
        let response = router(&state)
            .oneshot(
                Request::get("/api/export?format=xlsx")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fallback_serves_index() {
        let state = AppState::new(ViewerConfig::default());
        let response = router(&state)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
    }
}
