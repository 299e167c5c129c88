// SPDX-License-Identifier: Apache-2.0

//! Prometheus-style text exposition of the hand-rolled request metrics.
//! Percentiles are computed on demand from raw samples; snapshot sizes
//! stay tiny because routes are templates, not concrete paths.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::http::handlers::{make_request_id, with_request_id};
use crate::AppState;

const METRIC_SUBSYSTEM: &str = "catalog";

fn percentile_ns(values: &[u64], pct: f64) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let rank = ((sorted.len() - 1) as f64 * pct).round() as usize;
    sorted.get(rank).copied().unwrap_or(0)
}

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let request_id = make_request_id(&state);
    let version = env!("CARGO_PKG_VERSION");
    let mut out = String::new();

    let counts = state.metrics.counts.lock().await.clone();
    let mut count_keys: Vec<(String, u16)> = counts.keys().cloned().collect();
    count_keys.sort();
    for key in count_keys {
        let value = counts.get(&key).copied().unwrap_or(0);
        let (route, status) = key;
        out.push_str(&format!(
            "bonfire_http_requests_total{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{version}\",route=\"{route}\",status=\"{status}\"}} {value}\n"
        ));
    }

    let latency = state.metrics.latency_ns.lock().await.clone();
    let mut routes: Vec<String> = latency.keys().cloned().collect();
    routes.sort();
    for route in routes {
        let Some(samples) = latency.get(&route) else {
            continue;
        };
        for (pct, name) in [(0.50, "p50"), (0.95, "p95"), (0.99, "p99")] {
            let seconds = percentile_ns(samples, pct) as f64 / 1e9;
            out.push_str(&format!(
                "bonfire_http_request_latency_{name}_seconds{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{version}\",route=\"{route}\"}} {seconds:.9}\n"
            ));
        }
    }

    out.push_str(&format!(
        "bonfire_storage_failures_total{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{version}\"}} {}\n",
        state.metrics.storage_failures_total()
    ));

    let resp = (StatusCode::OK, out).into_response();
    state
        .metrics
        .observe_request("/metrics", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

#[cfg(test)]
mod tests {
    use super::percentile_ns;

    #[test]
    fn percentile_of_empty_samples_is_zero() {
        assert_eq!(percentile_ns(&[], 0.5), 0);
    }

    #[test]
    fn percentiles_pick_from_sorted_samples() {
        let samples = [50, 10, 40, 30, 20];
        assert_eq!(percentile_ns(&samples, 0.5), 30);
        assert_eq!(percentile_ns(&samples, 0.0), 10);
        assert_eq!(percentile_ns(&samples, 1.0), 50);
    }

    #[test]
    fn single_sample_serves_every_percentile() {
        for pct in [0.0, 0.5, 0.95, 0.99, 1.0] {
            assert_eq!(percentile_ns(&[7], pct), 7);
        }
    }
}
