//! Virtual-time timer queue.
//!
//! # Responsibility
//! - Hold simulated-latency timers keyed by deadline.
//! - Release due timers in deterministic order.
//!
//! # Invariants
//! - Due timers pop in `(deadline, scheduling order)` order.
//! - A cancelled timer never pops.
//! - Timer ids are never reused within one queue.

use std::collections::{BTreeMap, HashMap};

/// Handle returned by `schedule_at`, used to cancel or match a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Timer released by `pop_due`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTimer<E> {
    pub id: TimerId,
    pub due_ms: i64,
    pub event: E,
}

/// Deadline-ordered queue of pending events.
#[derive(Debug)]
pub struct TimerQueue<E> {
    next_seq: u64,
    entries: BTreeMap<(i64, u64), E>,
    deadlines: HashMap<u64, i64>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            next_seq: 1,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Schedules `event` to fire once `now >= due_ms`.
    pub fn schedule_at(&mut self, due_ms: i64, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((due_ms, seq), event);
        self.deadlines.insert(seq, due_ms);
        TimerId(seq)
    }

    /// Schedules `event` `delay_ms` after `now_ms`. Negative delays clamp to zero.
    pub fn schedule_after(&mut self, now_ms: i64, delay_ms: i64, event: E) -> TimerId {
        self.schedule_at(now_ms.saturating_add(delay_ms.max(0)), event)
    }

    /// Removes a pending timer, returning its event when it was still queued.
    pub fn cancel(&mut self, id: TimerId) -> Option<E> {
        let due_ms = self.deadlines.remove(&id.0)?;
        self.entries.remove(&(due_ms, id.0))
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    /// Pops the earliest timer with `due_ms <= now_ms`.
    pub fn pop_due(&mut self, now_ms: i64) -> Option<FiredTimer<E>> {
        let (&(due_ms, seq), _) = self.entries.iter().next()?;
        if due_ms > now_ms {
            return None;
        }
        let event = self.entries.remove(&(due_ms, seq))?;
        self.deadlines.remove(&seq);
        Some(FiredTimer {
            id: TimerId(seq),
            due_ms,
            event,
        })
    }

    pub fn next_due_ms(&self) -> Option<i64> {
        self.entries.keys().next().map(|(due_ms, _)| *due_ms)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;

    #[test]
    fn pops_in_deadline_then_scheduling_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_at(200, "late");
        queue.schedule_at(100, "first");
        queue.schedule_at(100, "second");

        assert_eq!(queue.pop_due(99), None);
        assert_eq!(queue.pop_due(250).map(|t| t.event), Some("first"));
        assert_eq!(queue.pop_due(250).map(|t| t.event), Some("second"));
        assert_eq!(queue.pop_due(250).map(|t| t.event), Some("late"));
        assert!(queue.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let keep = queue.schedule_after(0, 10, "keep");
        let drop = queue.schedule_after(0, 10, "drop");

        assert_eq!(queue.cancel(drop), Some("drop"));
        assert_eq!(queue.cancel(drop), None);
        assert!(!queue.is_pending(drop));
        assert!(queue.is_pending(keep));

        let fired = queue.pop_due(10).expect("kept timer should fire");
        assert_eq!(fired.id, keep);
        assert_eq!(fired.due_ms, 10);
        assert_eq!(queue.pop_due(10), None);
    }

    #[test]
    fn next_due_tracks_earliest_pending() {
        let mut queue = TimerQueue::new();
        assert_eq!(queue.next_due_ms(), None);
        let early = queue.schedule_at(50, ());
        queue.schedule_at(80, ());
        assert_eq!(queue.next_due_ms(), Some(50));
        queue.cancel(early);
        assert_eq!(queue.next_due_ms(), Some(80));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn negative_delay_clamps_to_now() {
        let mut queue = TimerQueue::new();
        queue.schedule_after(500, -20, ());
        assert_eq!(queue.next_due_ms(), Some(500));
    }
}
