use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// Process-wide counters for the triage engine. Shared by every session and
/// surfaced through the health endpoint.
#[derive(Debug, Default)]
pub struct AppMetrics {
    sessions_started_total: AtomicU64,
    messages_total: AtomicU64,
    emergency_total: AtomicU64,
    fallback_total: AtomicU64,
    total_engine_micros: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub sessions_started_total: u64,
    pub messages_total: u64,
    pub emergency_total: u64,
    pub fallback_total: u64,
    pub avg_engine_micros: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_session(&self) {
        self.sessions_started_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_message(&self) {
        self.messages_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_emergency(&self) {
        self.emergency_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts Default-topic replies, the "nothing matched" outcome.
    pub fn inc_fallback(&self) {
        self.fallback_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_engine_latency(&self, duration: Duration) {
        self.total_engine_micros
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let messages = self.messages_total.load(Ordering::Relaxed);
        let micros = self.total_engine_micros.load(Ordering::Relaxed);

        MetricsSnapshot {
            sessions_started_total: self.sessions_started_total.load(Ordering::Relaxed),
            messages_total: messages,
            emergency_total: self.emergency_total.load(Ordering::Relaxed),
            fallback_total: self.fallback_total.load(Ordering::Relaxed),
            avg_engine_micros: if messages == 0 {
                0.0
            } else {
                micros as f64 / messages as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,mitra_api=info,mitra_session=info",
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
    fn snapshot_reflects_counters() {
        let metrics = AppMetrics::default();
        metrics.inc_session();
        metrics.inc_message();
        metrics.inc_message();
        metrics.inc_emergency();
        metrics.observe_engine_latency(Duration::from_micros(40));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.sessions_started_total, 1);
        assert_eq!(snapshot.messages_total, 2);
        assert_eq!(snapshot.emergency_total, 1);
        assert_eq!(snapshot.fallback_total, 0);
        assert!((snapshot.avg_engine_micros - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_metrics_average_is_zero() {
        assert_eq!(AppMetrics::default().snapshot().avg_engine_micros, 0.0);
    }
}
