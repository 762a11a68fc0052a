//! Deferred page actions (the `setTimeout` queue)

use super::element::ElementId;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Set `display: none` on the element
    HideElement(ElementId),
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due: Instant,
    action: TimerAction,
}

/// One-shot timers ordered by due time
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn schedule(&mut self, now: Instant, delay: Duration, action: TimerAction) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Timer {
            id,
            due: now + delay,
            action,
        });
        id
    }

    /// Cancel a timer; returns false if it already fired or never existed
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Remove and return every action due at `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerAction> {
        let mut due: Vec<Timer> = Vec::new();
        self.timers.retain(|t| {
            if t.due <= now {
                due.push(t.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|t| (t.due, t.id));
        due.into_iter().map(|t| t.action).collect()
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }
}
