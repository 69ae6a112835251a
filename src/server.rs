//! HTTP Server and Metrics Collection
//!
//! This module implements the Prometheus exporter HTTP server and the collection loop.
//!
//! # Architecture
//!
//! - **HTTP Server**: Axum-based server exposing `/metrics`, `/health`, and `/` endpoints
//! - **Collection Loop**: Background task that periodically collects every configured printer
//! - **State Management**: The last completed pass is published behind an `RwLock`
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET /metrics` - Prometheus metrics of the last completed pass
//! - `GET /health` - Health check (200 if at least one printer was up, 503 otherwise)
//!
//! # Metrics Collection
//!
//! Each pass writes into a fresh [`MetricsCollector`], so a printer that went away or
//! finished its job leaves no stale series behind. When the pass is done the fresh
//! collector replaces the published one in a single write.

use crate::collectors::{self, PassSummary};
use crate::config::Config;
use crate::error::ExporterError;
use crate::metrics::MetricsCollector;
use crate::prusalink::{ClientConfig, EndpointClient};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{interval, Duration};
use tracing::{error, info};

/// Result of the last completed pass
struct Published {
    metrics: MetricsCollector,
    summary: Option<PassSummary>,
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    client: Arc<EndpointClient>,
    published: Arc<RwLock<Published>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = EndpointClient::new(ClientConfig {
            timeout: config.exporter.scrape_timeout(),
        })?;

        Ok(Self {
            config: Arc::new(config),
            client: Arc::new(client),
            published: Arc::new(RwLock::new(Published {
                metrics: MetricsCollector::new()?,
                summary: None,
            })),
        })
    }

    /// Run one collection pass over all printers and publish its result.
    pub async fn collect_once(&self) -> anyhow::Result<PassSummary> {
        let metrics = MetricsCollector::new()?;
        let summary =
            collectors::collect_all(self.client.clone(), &self.config.printers, &metrics).await;

        let mut published = self.published.write().await;
        *published = Published {
            metrics,
            summary: Some(summary),
        };
        Ok(summary)
    }

    /// Summary of the last completed pass, `None` before the first one.
    pub async fn last_summary(&self) -> Option<PassSummary> {
        self.published.read().await.summary
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let state = AppState::new(config)?;

    // Start background metrics collection
    let collection_state = state.clone();
    tokio::spawn(async move {
        collect_metrics_loop(collection_state).await;
    });

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ExporterError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app).await.map_err(ExporterError::Io)?;

    Ok(())
}

async fn collect_metrics_loop(state: AppState) {
    let mut ticker = interval(Duration::from_secs(
        state.config.exporter.collect_interval_seconds,
    ));

    loop {
        ticker.tick().await;

        info!(
            "Collecting metrics from {} printer(s)",
            state.config.printers.len()
        );
        if let Err(e) = state.collect_once().await {
            error!("Failed to collect metrics: {}", e);
        }
    }
}

async fn root_handler() -> impl IntoResponse {
    r#"<html>
<head><title>Prusa Exporter</title></head>
<body>
<h1>Prusa Prometheus Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    let published = state.published.read().await;
    match published.metrics.render() {
        Ok(metrics) => metrics.into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.last_summary().await {
        Some(summary) if summary.up > 0 => (StatusCode::OK, "OK"),
        Some(_) => (StatusCode::SERVICE_UNAVAILABLE, "No printer reachable"),
        None => (StatusCode::SERVICE_UNAVAILABLE, "No collection pass yet"),
    }
}
