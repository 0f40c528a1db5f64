//! `TimerQueue` — ordered, cancellable virtual-time timers.
//!
//! # Ordering
//!
//! Timers are keyed by `(due_tick, sequence)`.  The sequence number is the
//! timer's id and grows with every push, so two timers due at the same tick
//! pop in the order they were scheduled.  This keeps runs reproducible when
//! a step timer and the heartbeat land on the same millisecond.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log T) push, pop, and cancel where T is the number of
//! pending timers.  The simulation never has more than three pending at
//! once, so this is about ordering, not speed.

use std::collections::{BTreeMap, HashMap};

use wh_core::Tick;

/// Handle returned by [`TimerQueue::push`], used to cancel the timer.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TimerId(pub u64);

/// Pending timers carrying payloads of type `E`.
pub struct TimerQueue<E> {
    inner:    BTreeMap<(Tick, u64), E>,
    /// id → due tick, for O(log T) cancellation.
    due:      HashMap<TimerId, Tick>,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            inner:    BTreeMap::new(),
            due:      HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire at `tick`.
    pub fn push(&mut self, tick: Tick, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = TimerId(seq);
        self.inner.insert((tick, seq), event);
        self.due.insert(id, tick);
        id
    }

    /// Cancel a pending timer, returning its payload.
    ///
    /// Returns `None` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Option<E> {
        let tick = self.due.remove(&id)?;
        self.inner.remove(&(tick, id.0))
    }

    /// Remove and return the earliest timer due at or before `now`.
    ///
    /// Returns `None` when nothing is due yet.
    pub fn pop_due(&mut self, now: Tick) -> Option<(Tick, TimerId, E)> {
        let (&(tick, seq), _) = self.inner.first_key_value()?;
        if tick > now {
            return None;
        }
        let event = self.inner.remove(&(tick, seq))?;
        let id = TimerId(seq);
        self.due.remove(&id);
        Some((tick, id, event))
    }

    /// Drop every pending timer.  Returns how many were cancelled.
    pub fn clear(&mut self) -> usize {
        let n = self.inner.len();
        self.inner.clear();
        self.due.clear();
        n
    }

    /// The earliest pending due tick, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().map(|&(tick, _)| tick)
    }

    /// `true` if `id` is still pending.
    pub fn contains(&self, id: TimerId) -> bool {
        self.due.contains_key(&id)
    }

    /// Payloads of all pending timers in firing order.
    pub fn pending(&self) -> impl Iterator<Item = (Tick, &E)> + '_ {
        self.inner.iter().map(|(&(tick, _), e)| (tick, e))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
