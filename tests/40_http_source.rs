mod common;

use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;
use structure_tree::hierarchy::build_tree;
use structure_tree::source::{HttpSource, NodeSource, SourceError};

async fn structure_nodes(headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "Bearer secret")
        .unwrap_or(false);

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Invalid or missing token" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": common::organization() })),
    )
}

async fn spawn_api() -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let app = Router::new()
        .route("/api/structure-nodes", get(structure_nodes))
        .route("/api/broken", get(|| async { StatusCode::BAD_GATEWAY }));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://127.0.0.1:{}", port))
}

#[tokio::test]
async fn fetches_and_unwraps_envelope() -> Result<()> {
    let base = spawn_api().await?;
    let source = HttpSource::new(
        &format!("{}/api/structure-nodes", base),
        Some("secret".into()),
        Duration::from_secs(5),
    )?;

    let nodes = source.load().await?;
    assert_eq!(nodes.len(), 5);

    let forest = build_tree(&nodes);
    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].children.len(), 2);
    Ok(())
}

#[tokio::test]
async fn api_error_message_is_surfaced() -> Result<()> {
    let base = spawn_api().await?;
    let source = HttpSource::new(
        &format!("{}/api/structure-nodes", base),
        None,
        Duration::from_secs(5),
    )?;

    let err = source.load().await.unwrap_err();
    assert!(
        matches!(&err, SourceError::Api(msg) if msg == "Invalid or missing token"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[tokio::test]
async fn non_envelope_failure_reports_status() -> Result<()> {
    let base = spawn_api().await?;
    let source = HttpSource::new(&format!("{}/api/broken", base), None, Duration::from_secs(5))?;

    let err = source.load().await.unwrap_err();
    assert!(matches!(err, SourceError::Status { status: 502, .. }), "unexpected error: {err}");
    Ok(())
}

#[test]
fn rejects_non_http_urls() {
    assert!(matches!(
        HttpSource::new("ftp://example.com/nodes", None, Duration::from_secs(1)),
        Err(SourceError::InvalidUrl { .. })
    ));
    assert!(matches!(
        HttpSource::new("not a url", None, Duration::from_secs(1)),
        Err(SourceError::InvalidUrl { .. })
    ));
}
