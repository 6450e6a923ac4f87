//! Debounced scheduling of search requests
//!
//! A [`Debouncer`] is a single-slot cancelable deferred task: scheduling new
//! work cancels whatever was still waiting. [`DebouncedEffect`] layers
//! dependency tracking on top, so a callback only re-arms when the observed
//! value actually changes.

use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Single-slot cancelable deferred task
///
/// At most one action is pending at any time. The pending action is aborted
/// when a new one is scheduled, when [`cancel`](Self::cancel) is called, and
/// when the debouncer is dropped.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    runtime: Handle,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Quiet period used when no explicit delay is configured
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(250);

    /// Create a debouncer that runs its actions on `runtime`
    #[must_use]
    pub const fn new(delay: Duration, runtime: Handle) -> Self {
        Self {
            delay,
            runtime,
            pending: None,
        }
    }

    /// Quiet period between the last schedule call and the action firing
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `action` once the quiet period elapses, replacing any pending action
    pub fn schedule<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
    }

    /// Abort the pending action, if any
    ///
    /// Returns `true` if an action was still waiting to fire.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_waiting = !handle.is_finished();
                handle.abort();
                was_waiting
            }
            None => false,
        }
    }

    /// Whether an action is scheduled but has not fired yet
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Debounced callback keyed on a tracked value
///
/// Each call to [`observe`](Self::observe) with a value different from the
/// previous one cancels the pending invocation and schedules a new one that
/// receives the value captured at that moment. Since every change re-arms
/// the timer, the invocation that finally fires always sees the latest value.
pub struct DebouncedEffect<T> {
    debouncer: Debouncer,
    effect: Arc<dyn Fn(T) + Send + Sync>,
    last: Option<T>,
}

impl<T> DebouncedEffect<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    /// Wrap `effect` so it runs at most once per quiet period
    pub fn new(debouncer: Debouncer, effect: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            debouncer,
            effect: Arc::new(effect),
            last: None,
        }
    }

    /// Record the current value of the tracked input
    ///
    /// Returns `true` if the value changed and an invocation was scheduled.
    pub fn observe(&mut self, value: T) -> bool {
        if self.last.as_ref() == Some(&value) {
            return false;
        }

        self.last = Some(value.clone());
        let effect = Arc::clone(&self.effect);
        self.debouncer.schedule(move || effect(value));
        true
    }

    /// Drop the pending invocation without forgetting the last value
    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }

    /// Whether an invocation is waiting for the quiet period to end
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
