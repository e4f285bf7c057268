//! # Runtime Adapters
//!
//! Decorators and sinks that only make sense in the running binary.

pub mod console;
pub mod metered;

pub use console::ConsoleNotifier;
pub use metered::{MeteredBalances, MeteredRpc};
