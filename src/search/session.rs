//! Search session: query text, result list, and request lifecycle
//!
//! ```text
//!   Idle ──start──▶ Scheduled ──quiet period──▶ Fetching ──done──▶ Displaying
//!                      ▲                            │                  │
//!                      └──────── keystroke ─────────┴──────────────────┘
//! ```
//!
//! Fetches that were superseded by a newer keystroke are not aborted. They
//! run to completion, and their results are applied unless a newer request
//! has already been applied.

use super::debounce::{DebouncedEffect, Debouncer};
use crate::api::{Article, ArticleSource, fetch_articles};
use crate::ui::OutputWriter;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Lifecycle phase of the current search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Session created, nothing requested yet
    #[default]
    Idle,
    /// Query changed, waiting for the quiet period to pass
    Scheduled,
    /// A request for the latest query is in flight
    Fetching,
    /// Results for the latest query are on screen (possibly empty)
    Displaying,
}

impl Phase {
    /// Whether the user is waiting on results
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Scheduled | Self::Fetching)
    }
}

/// Messages sent from fetch tasks back to the session
#[derive(Debug)]
enum SessionEvent {
    Started { seq: u64, query: String },
    Finished { seq: u64, articles: Vec<Article> },
}

/// State owned by one interactive search
///
/// Results are only touched from [`pump`](Self::pump) and
/// [`settle`](Self::settle), which run on the caller's thread, so the UI sees
/// each result list replaced in one step.
pub struct SearchSession {
    query: String,
    articles: Vec<Article>,
    phase: Phase,
    effect: DebouncedEffect<String>,
    events: UnboundedReceiver<SessionEvent>,
    latest_issued: u64,
    last_applied: u64,
}

impl SearchSession {
    /// Create a session that searches `source` and reports failures to `output`
    ///
    /// Debounced work and fetch tasks run on `runtime`. Nothing is requested
    /// until [`start`](Self::start) is called.
    pub fn new<S>(
        source: Arc<S>,
        output: Arc<dyn OutputWriter>,
        quiet_period: Duration,
        runtime: Handle,
    ) -> Self
    where
        S: ArticleSource + 'static,
    {
        let (tx, events) = mpsc::unbounded_channel();
        let counter = Arc::new(AtomicU64::new(0));
        let spawner = runtime.clone();

        let effect = DebouncedEffect::new(
            Debouncer::new(quiet_period, runtime),
            move |query: String| {
                let seq = counter.fetch_add(1, Ordering::SeqCst) + 1;
                spawn_fetch(&spawner, seq, query, &source, &output, &tx);
            },
        );

        Self {
            query: String::new(),
            articles: Vec::new(),
            phase: Phase::Idle,
            effect,
            events,
            latest_issued: 0,
            last_applied: 0,
        }
    }

    /// Begin searching with the current query (empty means "everything")
    ///
    /// Only the first call has an effect; a started session is driven by
    /// [`set_query`](Self::set_query).
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        if self.effect.observe(self.query.clone()) {
            self.phase = Phase::Scheduled;
        }
    }

    /// Replace the search text
    ///
    /// A changed query cancels any pending request and schedules a new one.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        if self.phase == Phase::Idle {
            return;
        }
        if self.effect.observe(self.query.clone()) {
            self.phase = Phase::Scheduled;
        }
    }

    /// Current search text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current result list
    #[must_use]
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Current lifecycle phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Apply every completed fetch without blocking
    ///
    /// Returns `true` if the phase or the result list changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            changed |= self.apply(event);
        }
        changed
    }

    /// Wait until results for the latest query are displayed
    ///
    /// Returns immediately when the session is idle or already displaying.
    pub async fn settle(&mut self) {
        while self.phase.is_loading() {
            match self.events.recv().await {
                Some(event) => {
                    self.apply(event);
                }
                None => break,
            }
        }
    }

    fn apply(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Started { seq, query } => {
                self.latest_issued = self.latest_issued.max(seq);
                // Only the latest observed query can fire, so a mismatch means
                // another keystroke is already pending.
                if self.phase == Phase::Scheduled && query == self.query {
                    self.phase = Phase::Fetching;
                    return true;
                }
                false
            }
            SessionEvent::Finished { seq, articles } => {
                if seq < self.last_applied {
                    tracing::debug!(
                        seq,
                        last_applied = self.last_applied,
                        "discarding stale search results"
                    );
                    return false;
                }

                self.articles = articles;
                self.last_applied = seq;
                if seq == self.latest_issued && self.phase == Phase::Fetching {
                    self.phase = Phase::Displaying;
                }
                true
            }
        }
    }
}

/// Start one request on its own task
///
/// The task is detached: superseding keystrokes never abort it.
fn spawn_fetch<S>(
    runtime: &Handle,
    seq: u64,
    query: String,
    source: &Arc<S>,
    output: &Arc<dyn OutputWriter>,
    tx: &UnboundedSender<SessionEvent>,
) where
    S: ArticleSource + 'static,
{
    tracing::debug!(seq, query = %query, "issuing search");
    // Send failures only mean the session is gone; nobody is left to notify.
    let _ = tx.send(SessionEvent::Started {
        seq,
        query: query.clone(),
    });

    let source = Arc::clone(source);
    let output = Arc::clone(output);
    let tx = tx.clone();
    runtime.spawn(async move {
        let articles = fetch_articles(source.as_ref(), &query, output.as_ref()).await;
        tracing::debug!(seq, count = articles.len(), "search finished");
        let _ = tx.send(SessionEvent::Finished { seq, articles });
    });
}
