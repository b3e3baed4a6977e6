//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hello_requests_total` (counter): greetings served since process start
//!
//! Each [`GreeterMetrics`] owns a private Prometheus recorder instead of
//! installing a global one, so servers started side by side (as in tests)
//! never share counts.

use metrics::Counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Name of the greeting counter.
pub const REQUESTS_TOTAL: &str = "hello_requests_total";

/// Content type of the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Greeting counter plus the handle used to render it.
pub struct GreeterMetrics {
    requests: Counter,
    handle: PrometheusHandle,
}

impl GreeterMetrics {
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        let requests = metrics::with_local_recorder(&recorder, || {
            metrics::describe_counter!(REQUESTS_TOTAL, "Total Hello Requests");
            metrics::counter!(REQUESTS_TOTAL)
        });

        Self { requests, handle }
    }

    /// Count one greeting. Atomic, so concurrent calls are never lost.
    pub fn record_greeting(&self) {
        self.requests.increment(1);
    }

    /// Render all metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl Default for GreeterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GreeterMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreeterMetrics").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn counter_value(rendered: &str) -> Option<u64> {
        rendered
            .lines()
            .find_map(|line| line.strip_prefix("hello_requests_total "))
            .and_then(|value| value.trim().parse().ok())
    }

    #[test]
    fn test_counter_starts_at_zero() {
        let metrics = GreeterMetrics::new();
        assert_eq!(counter_value(&metrics.render()), Some(0));
    }

    #[test]
    fn test_render_includes_help_and_type() {
        let rendered = GreeterMetrics::new().render();
        assert!(rendered.contains("# HELP hello_requests_total Total Hello Requests"));
        assert!(rendered.contains("# TYPE hello_requests_total counter"));
    }

    #[test]
    fn test_instances_are_isolated() {
        let a = GreeterMetrics::new();
        let b = GreeterMetrics::new();
        a.record_greeting();
        a.record_greeting();

        assert_eq!(counter_value(&a.render()), Some(2));
        assert_eq!(counter_value(&b.render()), Some(0));
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let metrics = Arc::new(GreeterMetrics::new());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let metrics = metrics.clone();
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        metrics.record_greeting();
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        assert_eq!(counter_value(&metrics.render()), Some(8_000));
    }
}
