//! # Ports Layer
//!
//! - **Inbound (Driving)**: `WalletSigner`, the signing identity

pub mod inbound;
