// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delay timers and a host-agnostic virtual-clock timer queue.
//!
//! ## Overview
//!
//! A touch start schedules a [`DelayTimer`] through the host's
//! [`TimerScheduler`](crate::host::TimerScheduler). The host keeps it for
//! the configured delay and then hands it back to
//! [`Binder::fire`](crate::binder::Binder::fire). Timers are never cancelled;
//! a timer whose cycle has already been resolved or cancelled finds its
//! element idle and does nothing.
//!
//! [`TimerQueue`] is a small deadline queue over a virtual millisecond clock.
//! It never delivers anything from inside `push_after`, even for a zero
//! delay: items only come out of [`TimerQueue::advance_by`] or
//! [`TimerQueue::advance_to`]. Hosts with a real event loop can use it as
//! their pending-timer list; tests use it to script exact interleavings.
//!
//! ```
//! use understory_tap::timer::TimerQueue;
//!
//! let mut q = TimerQueue::new();
//! q.push_after(150, "highlight");
//! q.push_after(0, "immediate");
//! assert!(q.advance_by(0) == ["immediate"]);
//! assert!(q.advance_by(100).is_empty());
//! assert!(q.advance_to(150) == ["highlight"]);
//! ```

use alloc::vec::Vec;

use crate::types::BindingId;

/// A scheduled delay: the binding that scheduled it, its element, and the
/// touch-start event captured at scheduling time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelayTimer<K, E> {
    /// Binding whose state machine scheduled this timer.
    pub binding: BindingId,
    /// Element the timer belongs to.
    pub element: K,
    /// Originating touch-start event; passed to the action if the tap
    /// resolves from the timer.
    pub event: E,
}

#[derive(Clone, Debug)]
struct Scheduled<T> {
    due_ms: u64,
    seq: u64,
    item: T,
}

/// Deadline-ordered queue over a virtual millisecond clock.
///
/// Items with equal deadlines come out in the order they were pushed.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_seq: u64,
    // Sorted by (due_ms, seq).
    entries: Vec<Scheduled<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue with the clock at zero.
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of items not yet delivered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deadline of the earliest pending item.
    pub fn next_due(&self) -> Option<u64> {
        self.entries.first().map(|s| s.due_ms)
    }

    /// Schedule `item` to come due `delay_ms` after the current time.
    pub fn push_after(&mut self, delay_ms: u32, item: T) {
        let due_ms = self.now_ms.saturating_add(u64::from(delay_ms));
        let seq = self.next_seq;
        self.next_seq += 1;
        let at = self
            .entries
            .partition_point(|s| (s.due_ms, s.seq) <= (due_ms, seq));
        self.entries.insert(at, Scheduled { due_ms, seq, item });
    }

    /// Advance the clock by `ms` and return every item now due, in order.
    pub fn advance_by(&mut self, ms: u64) -> Vec<T> {
        self.advance_to(self.now_ms.saturating_add(ms))
    }

    /// Advance the clock to `now_ms` and return every item now due, in order.
    ///
    /// The clock never moves backwards; an earlier `now_ms` only drains items
    /// already due.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.max(now_ms);
        let due = self.entries.partition_point(|s| s.due_ms <= self.now_ms);
        self.entries.drain(..due).map(|s| s.item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn zero_delay_is_not_delivered_on_push() {
        let mut q = TimerQueue::new();
        q.push_after(0, 1);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_due(), Some(0));
        assert_eq!(q.advance_by(0), vec![1]);
        assert!(q.is_empty());
    }

    #[test]
    fn items_come_out_by_deadline() {
        let mut q = TimerQueue::new();
        q.push_after(300, 'c');
        q.push_after(100, 'a');
        q.push_after(200, 'b');
        assert_eq!(q.advance_by(150), vec!['a']);
        assert_eq!(q.now_ms(), 150);
        assert_eq!(q.advance_by(1000), vec!['b', 'c']);
        assert_eq!(q.now_ms(), 1150);
    }

    #[test]
    fn equal_deadlines_are_fifo() {
        let mut q = TimerQueue::new();
        q.push_after(10, 1);
        q.push_after(10, 2);
        q.push_after(10, 3);
        assert_eq!(q.advance_by(10), vec![1, 2, 3]);
    }

    #[test]
    fn delay_is_relative_to_current_time() {
        let mut q = TimerQueue::new();
        q.advance_by(50);
        q.push_after(100, ());
        assert_eq!(q.next_due(), Some(150));
        assert!(q.advance_to(149).is_empty());
        assert_eq!(q.advance_to(150).len(), 1);
    }

    #[test]
    fn clock_does_not_run_backwards() {
        let mut q = TimerQueue::<()>::new();
        q.advance_to(100);
        q.advance_to(40);
        assert_eq!(q.now_ms(), 100);
    }
}
