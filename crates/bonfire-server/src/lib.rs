#![forbid(unsafe_code)]
//! Catalog service over a pluggable document store: axum HTTP surface,
//! store backends, configuration, and request telemetry. The binary entry
//! point lives in `main.rs`; everything here is also reachable from tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::sync::Mutex;

mod config;
mod http;
mod store;
mod telemetry;

pub use config::{validate_startup_config_contract, ServerConfig};
pub use store::{DocumentStore, MemoryStore, SqliteStore, StoreError, StoreUri};

/// Per-process request telemetry, exposed as text by `/metrics`. Counters
/// and latency samples are keyed by route template, not concrete path, so
/// cardinality stays bounded.
#[derive(Default)]
pub(crate) struct RequestMetrics {
    counts: Mutex<HashMap<(String, u16), u64>>,
    latency_ns: Mutex<HashMap<String, Vec<u64>>>,
    storage_failures: AtomicU64,
}

impl RequestMetrics {
    pub(crate) async fn observe_request(&self, route: &str, status: StatusCode, latency: Duration) {
        {
            let mut counts = self.counts.lock().await;
            *counts
                .entry((route.to_string(), status.as_u16()))
                .or_insert(0) += 1;
        }
        let mut latency_ns = self.latency_ns.lock().await;
        latency_ns
            .entry(route.to_string())
            .or_default()
            .push(u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX));
    }

    pub(crate) fn observe_storage_failure(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn storage_failures_total(&self) -> u64 {
        self.storage_failures.load(Ordering::Relaxed)
    }
}

/// Shared per-request state. Cloning is cheap; everything mutable sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub api: ServerConfig,
    pub ready: Arc<AtomicBool>,
    pub(crate) metrics: Arc<RequestMetrics>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_config(store, ServerConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<dyn DocumentStore>, api: ServerConfig) -> Self {
        Self {
            store,
            api,
            ready: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

/// Builds the full catalog router. Title and category path segments are
/// parsed inside the handlers so unknown segments produce the JSON error
/// envelope instead of a bare 404.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/readyz", get(http::handlers::readyz_handler))
        .route("/metrics", get(telemetry::metrics_handler))
        .route(
            "/:title/:category",
            get(http::items::list_items_handler).post(http::items::create_item_handler),
        )
        .route(
            "/:title/:category/:id",
            get(http::items::get_item_handler)
                .put(http::items::update_item_handler)
                .delete(http::items::delete_item_handler),
        )
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
