//! # GMN Telemetry
//!
//! Structured logging through `tracing-subscriber` and Prometheus
//! counters for the sign-in flow, chain RPC and CMS access.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gmn_telemetry::{init_telemetry, TelemetryConfig};
//!
//! init_telemetry(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GMN_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `GMN_JSON_LOGS` | `false` | JSON lines instead of pretty output |
//! | `GMN_CONSOLE_OUTPUT` | `true` | Write logs to stderr |

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod config;
mod logging;
pub mod metrics;

pub use config::{parse_flag, TelemetryConfig};
pub use logging::{env_filter, init_logging};
pub use metrics::{
    encode_metrics, register_metrics, RpcTimer, BALANCE_QUERY_FAILURES, CONTENT_REQUESTS,
    RPC_CALLS, SESSION_EVENTS, SIGN_IN_ATTEMPTS, SIGN_IN_OUTCOMES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics, then install the log subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
