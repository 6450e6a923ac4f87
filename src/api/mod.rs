//! Remote bookmark search
//!
//! This module resolves one query string into a list of [`Article`]s.
//!
//! # Failure policy
//!
//! [`ArticleSource::search`] reports failures as a [`FetchError`], but callers
//! that feed the UI go through [`fetch_articles`], which collapses every
//! failure into an empty list plus one user-visible notification. A failed
//! search and a search with no hits therefore look the same on screen; that
//! is the intended UX, and the diagnostic detail goes to the log instead.
//!
//! ```no_run
//! use dropsearch::api::{fetch_articles, RaindropClient, DEFAULT_API_URL};
//! use dropsearch::config::ApiToken;
//! use dropsearch::ui::StdoutWriter;
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RaindropClient::new(DEFAULT_API_URL, ApiToken::new("token"), Duration::from_secs(10))?;
//! let articles = fetch_articles(&client, "rust", &StdoutWriter::new()).await;
//! println!("{} results", articles.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;

pub use client::{DEFAULT_API_URL, RaindropClient, parse_search_body};
pub use error::FetchError;
pub use models::Article;

use crate::ui::OutputWriter;
use async_trait::async_trait;

/// Notification shown when a search cannot be completed
pub const FETCH_FAILED_MESSAGE: &str = "Could not load articles";

/// A backend that can resolve a search query into articles
///
/// An empty query means "everything".
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Run one search
    ///
    /// # Errors
    ///
    /// Returns `FetchError` for any transport, status, or decoding failure.
    async fn search(&self, query: &str) -> Result<Vec<Article>, FetchError>;
}

/// Resolve a query into articles, never failing
///
/// On error, logs the cause, emits exactly one [`FETCH_FAILED_MESSAGE`]
/// notification through `output`, and returns an empty list. There is no
/// retry; every failure is terminal for this call.
pub async fn fetch_articles<S>(source: &S, query: &str, output: &dyn OutputWriter) -> Vec<Article>
where
    S: ArticleSource + ?Sized,
{
    match source.search(query).await {
        Ok(articles) => articles,
        Err(e) => {
            tracing::error!(error = %e, query, "search request failed");
            output.error(FETCH_FAILED_MESSAGE);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeSource, RecordingWriter, article};
    use crate::ui::MessageLevel;

    #[tokio::test]
    async fn test_fetch_success_passes_articles_through() {
        let source = FakeSource::new().with_result(
            "rust",
            vec![
                article("1", "Rust Book", &["rust", "docs"]),
                article("2", "Tokio", &["rust", "async"]),
            ],
        );
        let writer = RecordingWriter::new();

        let articles = fetch_articles(&source, "rust", &writer).await;

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].id, "1");
        assert_eq!(articles[1].tags, vec!["rust", "async"]);
        assert!(writer.messages().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_collapses_to_empty_with_one_toast() {
        let source = FakeSource::new().with_error("bad", || FetchError::MissingItems);
        let writer = RecordingWriter::new();

        let articles = fetch_articles(&source, "bad", &writer).await;

        assert!(articles.is_empty());
        assert_eq!(
            writer.messages(),
            vec![(MessageLevel::Error, FETCH_FAILED_MESSAGE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_query_is_passed_through() {
        let source = FakeSource::new().with_result("", vec![article("1", "All", &[])]);
        let writer = RecordingWriter::new();

        let articles = fetch_articles(&source, "", &writer).await;

        assert_eq!(articles.len(), 1);
        assert_eq!(source.queries(), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_zero_results_is_silent() {
        let source = FakeSource::new();
        let writer = RecordingWriter::new();

        let articles = fetch_articles(&source, "nothing", &writer).await;

        assert!(articles.is_empty());
        assert!(writer.messages().is_empty());
    }
}
