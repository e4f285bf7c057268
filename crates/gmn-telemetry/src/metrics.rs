//! Prometheus metrics.
//!
//! All metrics follow the naming convention: `gmn_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};
use std::time::Instant;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // SIGN-IN
    // =========================================================================

    /// Sign-in attempts started by the user
    pub static ref SIGN_IN_ATTEMPTS: Counter = Counter::new(
        "gmn_gate_sign_in_attempts_total",
        "Total sign-in attempts"
    ).expect("metric creation failed");

    /// Sign-in results
    pub static ref SIGN_IN_OUTCOMES: CounterVec = CounterVec::new(
        Opts::new("gmn_gate_sign_in_outcomes_total", "Sign-in results by outcome"),
        &["outcome"]  // authorized, no_balance, mismatch, rejected, ...
    ).expect("metric creation failed");

    /// Balance reads that failed at the node
    pub static ref BALANCE_QUERY_FAILURES: Counter = Counter::new(
        "gmn_gate_balance_query_failures_total",
        "Token balance reads that returned an error"
    ).expect("metric creation failed");

    // =========================================================================
    // CHAIN RPC
    // =========================================================================

    /// JSON-RPC calls
    pub static ref RPC_CALLS: CounterVec = CounterVec::new(
        Opts::new("gmn_rpc_calls_total", "JSON-RPC calls by method and result"),
        &["method", "result"]
    ).expect("metric creation failed");

    /// JSON-RPC latency
    pub static ref RPC_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new("gmn_rpc_duration_seconds", "JSON-RPC round trip time")
            .buckets(exponential_buckets(0.005, 2.0, 12).expect("valid buckets")),
        &["method"]
    ).expect("metric creation failed");

    // =========================================================================
    // SESSION + CONTENT
    // =========================================================================

    /// Wallet session events seen by the gate
    pub static ref SESSION_EVENTS: CounterVec = CounterVec::new(
        Opts::new("gmn_session_events_total", "Wallet session events by kind"),
        &["kind"]
    ).expect("metric creation failed");

    /// CMS requests
    pub static ref CONTENT_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("gmn_content_requests_total", "CMS requests by kind and result"),
        &["kind", "result"]
    ).expect("metric creation failed");
}

/// Register every metric with [`REGISTRY`]. Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(SIGN_IN_ATTEMPTS.clone()),
        Box::new(SIGN_IN_OUTCOMES.clone()),
        Box::new(BALANCE_QUERY_FAILURES.clone()),
        Box::new(RPC_CALLS.clone()),
        Box::new(RPC_DURATION.clone()),
        Box::new(SESSION_EVENTS.clone()),
        Box::new(CONTENT_REQUESTS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Records one RPC call on drop: latency, plus an `error` result unless
/// [`RpcTimer::succeed`] was called.
pub struct RpcTimer {
    method: &'static str,
    start: Instant,
    ok: bool,
}

impl RpcTimer {
    pub fn start(method: &'static str) -> Self {
        Self {
            method,
            start: Instant::now(),
            ok: false,
        }
    }

    pub fn succeed(mut self) {
        self.ok = true;
    }
}

impl Drop for RpcTimer {
    fn drop(&mut self) {
        RPC_DURATION
            .with_label_values(&[self.method])
            .observe(self.start.elapsed().as_secs_f64());
        let result = if self.ok { "ok" } else { "error" };
        RPC_CALLS.with_label_values(&[self.method, result]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_twice() {
        assert!(register_metrics().is_ok());
        assert!(register_metrics().is_ok());
    }

    #[test]
    fn test_counter_increment() {
        SIGN_IN_ATTEMPTS.inc();
        assert!(SIGN_IN_ATTEMPTS.get() >= 1.0);
    }

    #[test]
    fn test_rpc_timer_records_result() {
        let before_ok = RPC_CALLS.with_label_values(&["eth_test", "ok"]).get();
        let before_err = RPC_CALLS.with_label_values(&["eth_test", "error"]).get();

        RpcTimer::start("eth_test").succeed();
        drop(RpcTimer::start("eth_test"));

        assert_eq!(RPC_CALLS.with_label_values(&["eth_test", "ok"]).get(), before_ok + 1.0);
        assert_eq!(RPC_CALLS.with_label_values(&["eth_test", "error"]).get(), before_err + 1.0);
    }

    #[test]
    fn test_encode_contains_registered_metric() {
        register_metrics().unwrap();
        SIGN_IN_OUTCOMES.with_label_values(&["authorized"]).inc();
        let text = encode_metrics().unwrap();
        assert!(text.contains("gmn_gate_sign_in_outcomes_total"));
    }
}
