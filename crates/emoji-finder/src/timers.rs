//! Timers and clocks
//!
//! One-shot timeouts keyed to an explicit `now`, so hosts and tests decide
//! how time advances.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can keep a handle after giving
/// one to the finder.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Rc::new(Cell::new(Instant::now())) }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    due: Instant,
    payload: T,
}

/// Pending one-shot timers carrying a payload
#[derive(Debug)]
pub struct TimerManager<T> {
    timers: Vec<Timer<T>>,
    next_id: u32,
}

impl<T> Default for TimerManager<T> {
    fn default() -> Self {
        Self { timers: Vec::new(), next_id: 1 }
    }
}

impl<T> TimerManager<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire `delay` after `now`
    pub fn set_timeout(&mut self, payload: T, delay: Duration, now: Instant) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.timers.push(Timer { id, due: now + delay, payload });
        id
    }

    /// Remove and return every timer due at `now`, earliest first
    pub fn take_ready(&mut self, now: Instant) -> Vec<T> {
        let (mut ready, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = pending;
        ready.sort_by_key(|t| (t.due, t.id.0));
        ready.into_iter().map(|t| t.payload).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
