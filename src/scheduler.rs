//! One-shot timers advanced by the frame delta.
//!
//! Stands in for `setTimeout`-style callbacks: callers schedule a key with a
//! delay, then on every frame ask which keys came due and act on them.

use std::time::Duration;

#[derive(Debug)]
struct Entry<K> {
    key: K,
    due: Duration,
}

#[derive(Debug)]
pub struct Scheduler<K> {
    now: Duration,
    entries: Vec<Entry<K>>,
}

impl<K: PartialEq + Clone> Scheduler<K> {
    pub fn new() -> Self {
        Self { now: Duration::ZERO, entries: Vec::new() }
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fires `key` once `delay` has elapsed. An already pending `key` is rescheduled.
    pub fn schedule(&mut self, key: K, delay: Duration) {
        self.cancel(&key);
        self.entries.push(Entry { key, due: self.now + delay });
    }

    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.key != key);
        self.entries.len() != before
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.entries.iter().any(|e| &e.key == key)
    }

    /// Remaining time before `key` fires.
    pub fn remaining(&self, key: &K) -> Option<Duration> {
        self.entries
            .iter()
            .find(|e| &e.key == key)
            .map(|e| e.due.saturating_sub(self.now))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Moves the clock forward and returns every key that came due, earliest first.
    pub fn advance(&mut self, dt: Duration) -> Vec<K> {
        self.now += dt;
        let now = self.now;

        let mut due: Vec<Entry<K>> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| e.due);
        due.into_iter().map(|e| e.key).collect()
    }
}

impl<K: PartialEq + Clone> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}
