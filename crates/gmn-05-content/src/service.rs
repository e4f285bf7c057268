//! # Content Service
//!
//! Listing is public; opening a post requires the gate.

use crate::domain::errors::ContentError;
use crate::domain::groq::is_valid_slug;
use crate::domain::listing::{render_listing, ListingEntry};
use crate::domain::post::PostDetail;
use crate::ports::outbound::ContentSource;
use gmn_04_token_gate::ContentGate;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ContentService {
    source: Arc<dyn ContentSource>,
    gate: Arc<dyn ContentGate>,
}

impl ContentService {
    pub fn new(source: Arc<dyn ContentSource>, gate: Arc<dyn ContentGate>) -> Self {
        Self { source, gate }
    }

    /// All posts matching `search`, with view paths only when authorized.
    pub async fn listing(&self, search: Option<&str>) -> Result<Vec<ListingEntry>, ContentError> {
        let posts = self.source.list_posts().await?;
        let entries = render_listing(&posts, self.gate.as_ref(), search);
        debug!(
            fetched = posts.len(),
            shown = entries.len(),
            gated = !self.gate.can_view(),
            "Rendered listing"
        );
        Ok(entries)
    }

    /// The detail view behind a listing link.
    ///
    /// # Errors
    /// `Locked` before anything is fetched when the gate is closed.
    pub async fn open_post(&self, slug: &str) -> Result<PostDetail, ContentError> {
        if !self.gate.can_view() {
            info!(slug, "Post requested without authorization");
            return Err(ContentError::Locked);
        }
        if !is_valid_slug(slug) {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }
        self.source
            .post_by_slug(slug)
            .await?
            .ok_or_else(|| ContentError::NotFound(slug.to_string()))
    }
}
