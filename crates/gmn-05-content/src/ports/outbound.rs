//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::errors::ContentError;
use crate::domain::post::{PostDetail, PostSummary};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Read access to the CMS.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<PostSummary>, ContentError>;

    /// `Ok(None)` when no post has this slug.
    async fn post_by_slug(&self, slug: &str) -> Result<Option<PostDetail>, ContentError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

#[derive(Default)]
pub struct MockContentSource {
    pub posts: Mutex<Vec<PostDetail>>,
    pub should_fail: bool,
    fetches: AtomicUsize,
}

impl MockContentSource {
    pub fn new(posts: Vec<PostDetail>) -> Self {
        Self {
            posts: Mutex::new(posts),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ContentError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(ContentError::Connection("mock CMS offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentSource for MockContentSource {
    async fn list_posts(&self) -> Result<Vec<PostSummary>, ContentError> {
        self.check()?;
        Ok(self
            .posts
            .lock()
            .iter()
            .map(|p| PostSummary {
                title: p.title.clone(),
                slug: p.slug.clone(),
                name: p.name.clone(),
                main_image: p.main_image.clone(),
            })
            .collect())
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<PostDetail>, ContentError> {
        self.check()?;
        Ok(self
            .posts
            .lock()
            .iter()
            .find(|p| p.slug.current == slug)
            .cloned())
    }
}
