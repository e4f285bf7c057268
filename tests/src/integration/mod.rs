//! Cross-subsystem flows.

pub mod content_flow;
pub mod mint_flow;
pub mod session_flow;
pub mod sign_in_flow;
