//! # Stub CMS
//!
//! Answers the two GROQ queries the content subsystem issues, from an
//! in-memory post list, in the CMS's `{"result": ...}` envelope.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use gmn_05_content::{Block, ImageAsset, MainImage, PostDetail, Slug, Span};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

struct CmsState {
    posts: Mutex<Vec<PostDetail>>,
    failing: AtomicBool,
    queries: AtomicUsize,
}

/// Handle to a running stub CMS. The server stops when dropped.
pub struct StubCms {
    pub url: String,
    state: Arc<CmsState>,
    server: JoinHandle<()>,
}

impl StubCms {
    pub async fn start(posts: Vec<PostDetail>) -> Self {
        let state = Arc::new(CmsState {
            posts: Mutex::new(posts),
            failing: AtomicBool::new(false),
            queries: AtomicUsize::new(0),
        });

        let router = Router::new()
            .route("/v1/data/query/production", get(handle_query))
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub cms");
        let addr = listener.local_addr().expect("stub cms address");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            url: format!("http://{addr}"),
            state,
            server,
        }
    }

    /// Answer every query with a 500.
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    pub fn query_count(&self) -> usize {
        self.state.queries.load(Ordering::SeqCst)
    }
}

impl Drop for StubCms {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle_query(
    State(state): State<Arc<CmsState>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.queries.fetch_add(1, Ordering::SeqCst);
    if state.failing.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": {"description": "dataset unavailable"}})),
        );
    }

    let Some(query) = params.get("query") else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "missing query"})),
        );
    };

    let posts = state.posts.lock();
    let result = if query.contains("slug.current == $slug") {
        let wanted: String = params
            .get("$slug")
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();
        posts
            .iter()
            .find(|p| p.slug.current == wanted)
            .map(|p| serde_json::to_value(p).unwrap_or(Value::Null))
            .unwrap_or(Value::Null)
    } else {
        Value::Array(posts.iter().map(summary).collect())
    };
    (StatusCode::OK, Json(json!({ "result": result })))
}

fn summary(post: &PostDetail) -> Value {
    json!({
        "title": post.title,
        "slug": {"current": post.slug.current},
        "name": post.name,
        "mainImage": post.main_image,
    })
}

/// A post with one paragraph and an image.
pub fn sample_post(title: &str, slug: &str, author: &str) -> PostDetail {
    PostDetail {
        title: title.to_string(),
        slug: Slug {
            current: slug.to_string(),
        },
        name: Some(author.to_string()),
        main_image: Some(MainImage {
            asset: Some(ImageAsset {
                id: format!("image-{slug}"),
                url: format!("https://cdn.example/{slug}.png"),
            }),
        }),
        author_image: None,
        body: vec![Block {
            kind: "block".to_string(),
            style: Some("normal".to_string()),
            children: vec![Span {
                text: format!("{title} body"),
            }],
        }],
    }
}
