// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Longest accepted quiet period. Larger delays are clamped.
pub const MAX_DEBOUNCE: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Single-slot quiet-period timer. Each `push` supersedes whatever was
/// pending and restarts the delay; `poll` releases the coalesced value once
/// the delay has elapsed without another push. Time is passed in by the
/// caller so the event loop owns the clock.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay: delay.min(MAX_DEBOUNCE),
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        // An unrepresentable deadline fires on the next poll instead of panicking.
        let deadline = now.checked_add(self.delay).unwrap_or(now);
        self.pending = Some(Pending { value, deadline });
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending.take().map(|pending| pending.value)
            }
            _ => None,
        }
    }

    /// Drops the pending value, if any. Nothing fires afterwards.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
