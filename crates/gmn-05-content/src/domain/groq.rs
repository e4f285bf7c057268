//! GROQ queries against the `post` document type.

/// Listing projection: title, slug, author name, main image URL.
pub const LIST_POSTS: &str = r#"*[_type == "post"]{
  title,
  slug,
  "name": author->name,
  mainImage{
    asset->{
      _id,
      url
    }
  }
}"#;

/// Detail projection for the post bound to `$slug`. Yields `null` when
/// nothing matches.
pub const POST_BY_SLUG: &str = r#"*[slug.current == $slug]{
  title,
  slug,
  mainImage{
    asset->{
      _id,
      url
    }
  },
  body,
  "name": author->name,
  "authorImage": author->image.asset->url
}[0]"#;

/// Slugs are lowercase words joined by `-` or `_`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 200
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}
