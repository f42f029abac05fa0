use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    agent_calls_total: AtomicU64,
    unknown_agent_total: AtomicU64,
    service_errors_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub agent_calls_total: u64,
    pub unknown_agent_total: u64,
    pub service_errors_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_agent_call(&self) {
        self.agent_calls_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_unknown_agent(&self) {
        self.unknown_agent_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_service_error(&self) {
        self.service_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: requests,
            agent_calls_total: self.agent_calls_total.load(Ordering::Relaxed),
            unknown_agent_total: self.unknown_agent_total.load(Ordering::Relaxed),
            service_errors_total: self.service_errors_total.load(Ordering::Relaxed),
            avg_latency_millis: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,advisor_api=info,advisor_agents=info,advisor_search=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_latency_is_per_request() {
        let metrics = AppMetrics::default();
        assert_eq!(metrics.snapshot().avg_latency_millis, 0.0);

        metrics.inc_request();
        metrics.inc_request();
        metrics.observe_latency(Duration::from_millis(30));
        metrics.observe_latency(Duration::from_millis(10));
        metrics.inc_unknown_agent();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_total, 2);
        assert_eq!(snapshot.unknown_agent_total, 1);
        assert_eq!(snapshot.avg_latency_millis, 20.0);
    }
}
