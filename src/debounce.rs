//! Trailing-edge debouncing for search input.
//!
//! Holds the latest pushed value and only releases it once no new value
//! has arrived for the configured window.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut search = Debouncer::new(Duration::from_millis(250));
//!
//! // On every keystroke:
//! search.push(text, Instant::now());
//!
//! // In the event loop, once the deadline passes:
//! if let Some(text) = search.poll(Instant::now()) {
//!     run_search(text);
//! }
//! ```

use std::time::Duration;

use tokio::time::Instant;

/// Default quiet window for search input.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(250);

/// Coalesces bursts of values into the last one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a value, replacing any pending one and restarting the window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.window);
    }

    /// Release the pending value if the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }
}
