//! Deterministic timer queue for the sequencer's dwell/fade waits.
//!
//! The engine never sleeps; the embedder calls `advance(now)` from its tick
//! loop (or a test advances simulated time) and feeds fired tokens back into
//! the sequencer.
//!
//! Determinism rule: tokens due at the same instant fire in ascending token
//! order.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::foundation::core::Millis;

/// Opaque handle identifying one scheduled wait. Tokens are minted by the
/// sequencer and never reused, so a stale token can always be recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(pub u64);

/// Min-heap of pending deadlines with lazy cancellation.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<(Millis, TimerToken)>>,
    cancelled: HashSet<TimerToken>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, token: TimerToken, deadline: Millis) {
        self.cancelled.remove(&token);
        self.heap.push(Reverse((deadline, token)));
    }

    /// Cancel a pending token. Cancelling an unknown or already-fired token
    /// is a no-op.
    pub fn cancel(&mut self, token: TimerToken) {
        self.cancelled.insert(token);
    }

    /// Drop every pending entry. Used on gallery re-entry so nothing from a
    /// previous visit can fire later.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.cancelled.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.heap.iter().all(|Reverse((_, t))| self.cancelled.contains(t))
    }

    /// Pop every non-cancelled token with `deadline <= now`, in
    /// (deadline, token) order.
    pub fn advance(&mut self, now: Millis) -> Vec<TimerToken> {
        let mut fired = Vec::new();
        while let Some(Reverse((deadline, token))) = self.heap.peek().copied() {
            if deadline > now {
                break;
            }
            self.heap.pop();
            if !self.cancelled.remove(&token) {
                fired.push(token);
            }
        }
        fired
    }
}
