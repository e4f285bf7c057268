//! # Ports Layer
//!
//! - **Inbound (Driving)**: `TokenBalanceReader`, consumed by the token gate
//! - **Outbound (Driven)**: `EthRpc`, the node this subsystem talks to

pub mod inbound;
pub mod outbound;
