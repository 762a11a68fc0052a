//! Rate limiting for high-frequency page events
//!
//! Both gates are driven by an explicit clock so the app loop (and tests)
//! decide what "now" is.

use std::time::{Duration, Instant};

/// Scroll handling runs at most once per frame
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(16);
/// Resize handling waits for the terminal to settle
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Lets the first call through, then blocks until `limit` has elapsed.
///
/// Calls made while blocked are remembered so the owner can flush the
/// trailing one when the window closes.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Duration,
    last_run: Option<Instant>,
    trailing: bool,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            last_run: None,
            trailing: false,
        }
    }

    /// Returns true when the caller should run now
    pub fn try_run(&mut self, now: Instant) -> bool {
        let open = self
            .last_run
            .is_none_or(|last| now.saturating_duration_since(last) >= self.limit);
        if open {
            self.last_run = Some(now);
            self.trailing = false;
        } else {
            self.trailing = true;
        }
        open
    }

    /// Returns true once for a blocked call whose window has since closed
    pub fn flush(&mut self, now: Instant) -> bool {
        if self.trailing && self.try_run(now) {
            return true;
        }
        false
    }
}

/// Fires once `wait` has passed without another call
#[derive(Debug, Clone)]
pub struct Debounce {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// Record a call, pushing the deadline back
    pub fn call(&mut self, now: Instant) {
        self.deadline = Some(now + self.wait);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the deadline has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
