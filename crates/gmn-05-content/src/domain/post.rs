//! Post documents as returned by the GROQ projections in [`super::groq`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainImage {
    pub asset: Option<ImageAsset>,
}

/// One entry of the posts listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,
    pub slug: Slug,
    /// Author name, dereferenced from the author document.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "mainImage", default)]
    pub main_image: Option<MainImage>,
}

impl PostSummary {
    pub fn image_url(&self) -> Option<&str> {
        image_url(self.main_image.as_ref())
    }
}

/// Inline run of text inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,
}

/// Portable Text block. Non-text blocks keep their `_type` and no spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "_type", default)]
    pub kind: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub children: Vec<Span>,
}

impl Block {
    pub fn text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Full post for the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "mainImage", default)]
    pub main_image: Option<MainImage>,
    #[serde(rename = "authorImage", default)]
    pub author_image: Option<String>,
    #[serde(default)]
    pub body: Vec<Block>,
}

impl PostDetail {
    pub fn image_url(&self) -> Option<&str> {
        image_url(self.main_image.as_ref())
    }

    /// Text blocks joined by blank lines.
    pub fn body_text(&self) -> String {
        self.body
            .iter()
            .filter(|b| b.kind == "block")
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn image_url(image: Option<&MainImage>) -> Option<&str> {
    image
        .and_then(|i| i.asset.as_ref())
        .map(|a| a.url.as_str())
}
