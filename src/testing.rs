//! Testing utilities for dropsearch
//!
//! In-memory stand-ins for the remote API and the notification surface.
//!
//! Only available when compiled with `cfg(test)`.

use crate::api::{Article, ArticleSource, FetchError};
use crate::ui::{MessageLevel, OutputWriter};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

type ErrorFactory = Box<dyn Fn() -> FetchError + Send + Sync>;

enum Canned {
    Articles(Vec<Article>),
    Error(ErrorFactory),
}

/// Scriptable `ArticleSource`
///
/// Unknown queries resolve to an empty list. Every call is recorded so tests
/// can assert which queries actually reached the "network".
#[derive(Default)]
pub struct FakeSource {
    responses: HashMap<String, Canned>,
    delays: HashMap<String, Duration>,
    queries: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `articles`
    pub fn with_result(mut self, query: &str, articles: Vec<Article>) -> Self {
        self.responses
            .insert(query.to_string(), Canned::Articles(articles));
        self
    }

    /// Fail `query` with the error produced by `make_error`
    pub fn with_error(
        mut self,
        query: &str,
        make_error: impl Fn() -> FetchError + Send + Sync + 'static,
    ) -> Self {
        self.responses
            .insert(query.to_string(), Canned::Error(Box::new(make_error)));
        self
    }

    /// Make `query` take `delay` before answering
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    /// Queries received so far, in call order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleSource for FakeSource {
    async fn search(&self, query: &str) -> Result<Vec<Article>, FetchError> {
        self.queries.lock().unwrap().push(query.to_string());

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }

        match self.responses.get(query) {
            Some(Canned::Articles(articles)) => Ok(articles.clone()),
            Some(Canned::Error(make_error)) => Err(make_error()),
            None => Ok(Vec::new()),
        }
    }
}

/// `OutputWriter` that keeps every message for inspection
#[derive(Default)]
pub struct RecordingWriter {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages.lock().unwrap().clone()
    }

    fn push(&self, level: MessageLevel, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

impl OutputWriter for RecordingWriter {
    fn write(&self, message: &str) {
        self.push(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.push(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.push(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.push(MessageLevel::Info, message);
    }

    fn clear(&self) {
        self.messages.lock().unwrap().clear();
    }
}

/// Build an article fixture with a derived link and domain
pub fn article(id: &str, title: &str, tags: &[&str]) -> Article {
    let domain = format!("{id}.example.com");
    Article::new(id, title, format!("https://{domain}/"))
        .with_tags(tags.iter().copied())
        .with_domain(domain)
}
