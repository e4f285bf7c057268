//! Sanity HTTP query API client.

use crate::domain::errors::ContentError;
use crate::domain::groq::{LIST_POSTS, POST_BY_SLUG};
use crate::domain::post::{PostDetail, PostSummary};
use crate::ports::outbound::ContentSource;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Project the posts live in.
pub const DEFAULT_PROJECT_ID: &str = "w58hb608";
pub const DEFAULT_DATASET: &str = "production";
/// API version used when the client is created without one.
pub const DEFAULT_API_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Query the edge cache (`apicdn`) instead of the live API.
    pub use_cdn: bool,
    pub timeout: Duration,
    /// Replaces `https://{project}.api[cdn].sanity.io`.
    pub endpoint: Option<String>,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            use_cdn: true,
            timeout: Duration::from_secs(10),
            endpoint: None,
        }
    }
}

impl SanityConfig {
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.project_id.is_empty()
            || !self.project_id.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(ContentError::Config(format!(
                "project id '{}' must be alphanumeric",
                self.project_id
            )));
        }
        if self.dataset.is_empty()
            || !self
                .dataset
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
        {
            return Err(ContentError::Config(format!(
                "dataset '{}' must be lowercase alphanumeric",
                self.dataset
            )));
        }
        Ok(())
    }

    /// `…/v{api_version}/data/query/{dataset}`
    pub fn query_url(&self) -> String {
        let base = self.endpoint.clone().unwrap_or_else(|| {
            let host = if self.use_cdn { "apicdn" } else { "api" };
            format!("https://{}.{host}.sanity.io", self.project_id)
        });
        format!(
            "{}/v{}/data/query/{}",
            base.trim_end_matches('/'),
            self.api_version.trim_start_matches('v'),
            self.dataset
        )
    }
}

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    description: Option<String>,
}

pub struct SanityClient {
    http: Client,
    config: SanityConfig,
    query_url: String,
}

impl SanityClient {
    pub fn new(config: SanityConfig) -> Result<Self, ContentError> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ContentError::Config(e.to_string()))?;
        let query_url = config.query_url();

        Ok(Self {
            http,
            config,
            query_url,
        })
    }

    pub fn config(&self) -> &SanityConfig {
        &self.config
    }

    /// Run `groq` with `$name` parameters bound to JSON-encoded values.
    async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>, ContentError> {
        let mut pairs = vec![("query".to_string(), groq.to_string())];
        for (name, value) in params {
            let encoded =
                serde_json::to_string(value).map_err(|e| ContentError::Parse(e.to_string()))?;
            pairs.push((format!("${name}"), encoded));
        }

        debug!(url = %self.query_url, params = params.len(), "CMS query");
        let response = self.http.get(&self.query_url).query(&pairs).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ContentError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: QueryResponse<T> =
            serde_json::from_str(&body).map_err(|e| ContentError::Parse(e.to_string()))?;
        Ok(parsed.result)
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(ErrorDetail {
                description: Some(d),
            }),
            ..
        }) => d,
        Ok(ErrorBody {
            message: Some(m), ..
        }) => m,
        _ => body.chars().take(200).collect(),
    }
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn list_posts(&self) -> Result<Vec<PostSummary>, ContentError> {
        Ok(self.query(LIST_POSTS, &[]).await?.unwrap_or_default())
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<PostDetail>, ContentError> {
        self.query(POST_BY_SLUG, &[("slug", slug)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_url_uses_cdn() {
        assert_eq!(
            SanityConfig::default().query_url(),
            "https://w58hb608.apicdn.sanity.io/v1/data/query/production"
        );
    }

    #[test]
    fn test_live_api_and_dated_version() {
        let config = SanityConfig {
            use_cdn: false,
            api_version: "v2021-10-21".to_string(),
            ..SanityConfig::default()
        };
        assert_eq!(
            config.query_url(),
            "https://w58hb608.api.sanity.io/v2021-10-21/data/query/production"
        );
    }

    #[test]
    fn test_endpoint_override() {
        let config = SanityConfig {
            endpoint: Some("http://127.0.0.1:8080/".to_string()),
            ..SanityConfig::default()
        };
        assert_eq!(
            config.query_url(),
            "http://127.0.0.1:8080/v1/data/query/production"
        );
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let bad_project = SanityConfig {
            project_id: "w58/hb".to_string(),
            ..SanityConfig::default()
        };
        assert!(matches!(bad_project.validate(), Err(ContentError::Config(_))));

        let bad_dataset = SanityConfig {
            dataset: "Prod Data".to_string(),
            ..SanityConfig::default()
        };
        assert!(bad_dataset.validate().is_err());
        assert!(SanityConfig::default().validate().is_ok());
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error":{"description":"expected '}' following object body"}}"#),
            "expected '}' following object body"
        );
        assert_eq!(error_message(r#"{"message":"Not found"}"#), "Not found");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_unreachable_cms() {
        let client = SanityClient::new(SanityConfig {
            endpoint: Some("http://127.0.0.1:9".to_string()),
            timeout: Duration::from_millis(500),
            ..SanityConfig::default()
        })
        .unwrap();

        let result = client.list_posts().await;
        assert!(matches!(result, Err(ContentError::Connection(_))));
    }
}
