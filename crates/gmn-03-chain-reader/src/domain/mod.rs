//! # Domain Layer
//!
//! Pure encoding and value types; no I/O.

pub mod abi;
pub mod entities;
pub mod errors;
