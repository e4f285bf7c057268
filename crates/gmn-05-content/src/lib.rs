//! # Content Subsystem (GMN-05)
//!
//! Reads blog posts from a Sanity dataset and renders the listing in
//! which only authorized token holders get a link to each post.
//!
//! ```text
//! ┌──────────────┐  GROQ over HTTPS   ┌────────────────┐
//! │ SanityClient │ ─────────────────→ │ {project}.api… │
//! └──────┬───────┘                    └────────────────┘
//!        │ ContentSource
//! ┌──────▼────────┐   can_view()   ┌─────────────┐
//! │ContentService │ ─────────────→ │ ContentGate │
//! └───────────────┘                └─────────────┘
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::sanity::{SanityClient, SanityConfig};
pub use domain::errors::ContentError;
pub use domain::listing::{render_listing, ListingEntry};
pub use domain::post::{Block, ImageAsset, MainImage, PostDetail, PostSummary, Slug, Span};
pub use ports::outbound::{ContentSource, MockContentSource};
pub use service::ContentService;
