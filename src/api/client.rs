//! HTTP client for the Raindrop.io REST API

use super::ArticleSource;
use super::error::FetchError;
use super::models::{Article, SearchResponse};
use crate::config::ApiToken;
use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Url;
use std::time::Duration;

/// Default REST endpoint root
pub const DEFAULT_API_URL: &str = "https://api.raindrop.io/rest/v1";

/// Collection id that spans every collection of the account
const ALL_COLLECTIONS: u32 = 0;

/// Characters left as-is in the search parameter, as browsers'
/// `encodeURIComponent` does (a space becomes `%20`). The apostrophe is
/// always escaped in http queries, so it is encoded here too.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// `ArticleSource` backed by the Raindrop.io search endpoint
///
/// The credential is injected at construction time; the client never reads
/// ambient configuration.
#[derive(Debug, Clone)]
pub struct RaindropClient {
    http: reqwest::Client,
    api_url: Url,
    token: ApiToken,
}

impl RaindropClient {
    /// Create a client for the given API root
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if `api_url` cannot be parsed, or
    /// `FetchError::Network` if the HTTP client cannot be built.
    pub fn new(api_url: &str, token: ApiToken, timeout: Duration) -> Result<Self, FetchError> {
        // A trailing slash makes `Url::join` append instead of replacing the last segment
        let normalized = format!("{}/", api_url.trim_end_matches('/'));
        let api_url = Url::parse(&normalized).map_err(|e| FetchError::InvalidUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url,
            token,
        })
    }

    /// Build the search URL for a query
    ///
    /// The query is percent-encoded; an empty query is sent as `search=`
    /// which the server treats as "no filter".
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if the path cannot be joined onto the API root.
    pub fn search_url(&self, query: &str) -> Result<Url, FetchError> {
        let mut url = self
            .api_url
            .join(&format!("raindrops/{ALL_COLLECTIONS}"))
            .map_err(|e| FetchError::InvalidUrl {
                url: self.api_url.to_string(),
                reason: e.to_string(),
            })?;
        let encoded = utf8_percent_encode(query, QUERY_COMPONENT);
        url.set_query(Some(&format!("search={encoded}")));
        Ok(url)
    }
}

/// Decode a search response body into its article list
///
/// # Errors
///
/// Returns `FetchError::Decode` for non-JSON bodies and
/// `FetchError::MissingItems` when the `items` field is absent.
pub fn parse_search_body(body: &str) -> Result<Vec<Article>, FetchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    response.items.ok_or(FetchError::MissingItems)
}

#[async_trait]
impl ArticleSource for RaindropClient {
    async fn search(&self, query: &str) -> Result<Vec<Article>, FetchError> {
        let url = self.search_url(query)?;
        tracing::debug!(%url, "requesting articles");

        let response = self
            .http
            .get(url)
            .bearer_auth(self.token.expose())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let articles = parse_search_body(&body)?;
        tracing::debug!(count = articles.len(), "received articles");
        Ok(articles)
    }
}
