//! # Adapters Layer

pub mod sanity;
