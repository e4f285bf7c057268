//! Gated listing: every post is listed, only authorized viewers get a
//! path to the detail view.

use crate::domain::post::PostSummary;
use gmn_04_token_gate::ContentGate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub title: String,
    pub author: Option<String>,
    pub image_url: Option<String>,
    /// `/{slug}` for authorized viewers; absent otherwise.
    pub view_path: Option<String>,
}

/// Render `posts`, keeping those whose title contains `search`
/// (case-insensitive). A blank search keeps everything.
pub fn render_listing(
    posts: &[PostSummary],
    gate: &dyn ContentGate,
    search: Option<&str>,
) -> Vec<ListingEntry> {
    let can_view = gate.can_view();
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    posts
        .iter()
        .filter(|p| {
            needle
                .as_deref()
                .map_or(true, |n| p.title.to_lowercase().contains(n))
        })
        .map(|p| ListingEntry {
            title: p.title.clone(),
            author: p.name.clone(),
            image_url: p.image_url().map(str::to_string),
            view_path: can_view.then(|| format!("/{}", p.slug.current)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::Slug;
    use gmn_04_token_gate::StaticGate;

    fn post(title: &str, slug: &str) -> PostSummary {
        PostSummary {
            title: title.to_string(),
            slug: Slug {
                current: slug.to_string(),
            },
            name: Some("Ada".to_string()),
            main_image: None,
        }
    }

    #[test]
    fn test_closed_gate_omits_paths() {
        let posts = vec![post("One", "one"), post("Two", "two")];
        let entries = render_listing(&posts, &StaticGate::closed(), None);

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.view_path.is_none()));
    }

    #[test]
    fn test_open_gate_exposes_paths() {
        let posts = vec![post("One", "one"), post("Two", "two")];
        let entries = render_listing(&posts, &StaticGate::open(), None);

        assert_eq!(entries[0].view_path.as_deref(), Some("/one"));
        assert_eq!(entries[1].view_path.as_deref(), Some("/two"));
    }

    #[test]
    fn test_gate_is_read_at_render_time() {
        let posts = vec![post("One", "one")];
        let gate = StaticGate::open();
        assert!(render_listing(&posts, &gate, None)[0].view_path.is_some());

        gate.set_open(false);
        assert!(render_listing(&posts, &gate, None)[0].view_path.is_none());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let posts = vec![post("Token Gating 101", "gating"), post("Minting", "mint")];

        let entries = render_listing(&posts, &StaticGate::closed(), Some("  gAtInG "));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Token Gating 101");

        assert_eq!(render_listing(&posts, &StaticGate::closed(), Some("")).len(), 2);
    }
}
