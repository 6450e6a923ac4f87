//! Output abstraction layer
//!
//! User-facing notifications go through [`OutputWriter`]. The command-line
//! commands print them ([`StdoutWriter`]); the terminal UI buffers them as
//! short-lived toasts ([`ToastWriter`]) rendered in the status bar. Fetch
//! failures are reported this way, never as errors returned to the caller.

use colored::Colorize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Trait for output operations
///
/// # Examples
///
/// ```no_run
/// use dropsearch::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.success("Copied link");
/// output.error("Could not load articles");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);

    /// Clear all messages (for TUI status bars)
    fn clear(&self);
}

/// CLI implementation - errors go to stderr so piped results stay clean
pub struct StdoutWriter;

impl StdoutWriter {
    /// Create a new stdout writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    fn success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    fn info(&self, message: &str) {
        println!("{}", message.dimmed());
    }

    fn clear(&self) {}
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Normal message
    Normal,
    /// Error message
    Error,
    /// Success message
    Success,
    /// Warning message
    Warning,
    /// Info message
    Info,
}

/// One buffered notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity
    pub level: MessageLevel,
    /// Message text
    pub text: String,
    /// When the toast was raised
    pub raised_at: Instant,
}

impl Toast {
    fn is_live(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.raised_at) < ttl
    }
}

/// Buffered writer for the TUI status bar
///
/// Toasts expire after a TTL. Writers on fetch tasks and the UI thread share
/// one instance behind an `Arc`.
///
/// ```
/// use dropsearch::ui::output::{MessageLevel, OutputWriter, ToastWriter};
/// use std::time::Duration;
///
/// let toasts = ToastWriter::with_ttl(Duration::from_secs(5));
/// toasts.error("Could not load articles");
///
/// let latest = toasts.latest().unwrap();
/// assert_eq!(latest.level, MessageLevel::Error);
/// ```
#[derive(Debug)]
pub struct ToastWriter {
    toasts: Mutex<Vec<Toast>>,
    ttl: Duration,
}

impl ToastWriter {
    /// Oldest toasts are dropped beyond this many
    const CAPACITY: usize = 32;

    /// Create a toast writer with the default TTL (5 seconds)
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(5))
    }

    /// Create a toast writer with a custom TTL
    #[must_use]
    pub const fn with_ttl(ttl: Duration) -> Self {
        Self {
            toasts: Mutex::new(Vec::new()),
            ttl,
        }
    }

    /// Toasts that have not expired, oldest first
    #[must_use]
    pub fn active(&self) -> Vec<Toast> {
        let now = Instant::now();
        self.lock()
            .iter()
            .filter(|t| t.is_live(now, self.ttl))
            .cloned()
            .collect()
    }

    /// Most recent toast that has not expired
    #[must_use]
    pub fn latest(&self) -> Option<Toast> {
        let now = Instant::now();
        self.lock()
            .iter()
            .rev()
            .find(|t| t.is_live(now, self.ttl))
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn raise(&self, level: MessageLevel, text: &str) {
        let mut toasts = self.lock();
        toasts.push(Toast {
            level,
            text: text.to_string(),
            raised_at: Instant::now(),
        });

        if toasts.len() > Self::CAPACITY {
            let excess = toasts.len() - Self::CAPACITY;
            toasts.drain(..excess);
        }
    }
}

impl Default for ToastWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for ToastWriter {
    fn write(&self, message: &str) {
        self.raise(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.raise(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.raise(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.raise(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.raise(MessageLevel::Info, message);
    }

    fn clear(&self) {
        self.lock().clear();
    }
}
