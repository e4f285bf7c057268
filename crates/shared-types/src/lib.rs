//! # Shared Types Crate
//!
//! Value types used across the gmn-gate subsystems.
//!
//! ## Design Principles
//!
//! - **Bytes, not strings**: addresses and signatures are parsed once at the
//!   edge and compared as raw bytes afterwards. Two spellings of the same
//!   address (checksummed, lowercase, uppercase) are therefore equal.
//! - **Checksummed output**: every `Display` of an [`Address`] is EIP-55.

pub mod entities;
pub mod errors;
pub mod networks;

pub use entities::*;
pub use errors::*;
pub use networks::{Network, NETWORKS};
