//! # Domain Layer
//!
//! Challenge construction, the authorization state machine and outcome
//! types. No I/O.

pub mod challenge;
pub mod errors;
pub mod notification;
pub mod outcome;
pub mod state;
