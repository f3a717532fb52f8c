//! Inbound HTTP surface: `/metrics` for Prometheus and a landing page on `/`.

use crate::application::PowerCollector;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub const METRICS_PATH: &str = "/metrics";

pub const INDEX_HTML: &str = r#"<html>
<head><title>Panasonic Exporter</title></head>
<body>
<h1>Panasonic Breaker Box Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
</body>
</html>
"#;

pub fn router(collector: Arc<PowerCollector>) -> Router {
    Router::new()
        .route("/", get(index))
        .route(METRICS_PATH, get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(collector)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// The scrape runs as its own task: a scraper that hangs up mid-request must
/// not cancel the fetch, its logging or its error accounting.
async fn metrics(State(collector): State<Arc<PowerCollector>>) -> Response {
    let content_type = collector.metrics().content_type();
    let scrape = tokio::spawn(async move { collector.scrape_and_render().await });

    match scrape.await {
        Ok(Ok(body)) => ([(header::CONTENT_TYPE, content_type)], body).into_response(),
        Ok(Err(e)) => {
            error!("Failed to encode metrics: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            error!("Scrape task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(addr: SocketAddr, router: Router) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not start HTTP server on {}", addr))?;
    info!("Exporter listening on http://{}{}", addr, METRICS_PATH);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received. Exiting...");
}
