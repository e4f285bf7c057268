//! # Adapters Layer

pub mod tracing_notifier;
