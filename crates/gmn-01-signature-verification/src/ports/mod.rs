//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that the token gate calls

pub mod inbound;
