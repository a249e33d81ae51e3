//! Prometheus metrics for the recurring task reset worker.
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_router, ResetMetrics};
//!
//! init_metrics()?;
//! ResetMetrics::record_run(true, 12, 0, 85);
//!
//! let app = Router::new().merge(metrics_router());
//! ```

pub mod reset;

pub use reset::ResetMetrics;

use axum::{Router, routing::get};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder once per process.
///
/// Later calls return the existing handle. Until this runs, metric macros
/// are no-ops.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;
        info!("Prometheus metrics recorder initialized");
        reset::describe();
        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

/// Router exposing `GET /metrics`
pub fn metrics_router() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}
