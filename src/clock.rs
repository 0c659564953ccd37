use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::input::Direction;

/// Generation number of the most recent accepted direction change.
///
/// Every deferred move carries the token that was current when it was
/// scheduled; a move whose token no longer matches the engine's is stale.
/// The sequence restarts at zero on every new run, and the run number keeps
/// moves left over from an earlier run from matching again.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MoveToken {
    run: u64,
    seq: u64,
}

impl MoveToken {
    /// Token for the next accepted direction change in the same run.
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            run: self.run,
            seq: self.seq.wrapping_add(1),
        }
    }

    /// First token of the following run.
    #[must_use]
    pub fn next_run(self) -> Self {
        Self {
            run: self.run.wrapping_add(1),
            seq: 0,
        }
    }

    #[must_use]
    pub fn run(self) -> u64 {
        self.run
    }

    /// Accepted direction changes so far in this run.
    #[must_use]
    pub fn seq(self) -> u64 {
        self.seq
    }
}

/// A move to apply once its delay has elapsed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DeferredMove {
    pub direction: Direction,
    pub token: MoveToken,
}

/// Fire-once scheduler the engine hands its deferred moves to.
///
/// Implementations never call back into the engine themselves; whoever owns
/// the clock drains due moves and passes them to `GameEngine::on_timer`.
pub trait Clock {
    fn schedule_once(&mut self, delay: Duration, task: DeferredMove);
}

#[derive(Debug)]
struct Scheduled {
    due: Duration,
    seq: u64,
    task: DeferredMove,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Deadline-ordered queue of deferred moves on a monotonic timeline.
///
/// Time is an offset from whenever the owner started counting. The terminal
/// loop feeds it wall-clock elapsed time through [`TimerQueue::advance_to`];
/// tests step it with [`TimerQueue::fire_next`]. Moves with equal deadlines
/// fire in scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<Reverse<Scheduled>>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position on the timeline.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Moves the timeline forward. Earlier instants are ignored.
    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Pops the earliest move whose deadline has passed.
    pub fn pop_due(&mut self) -> Option<DeferredMove> {
        let due = self.pending.peek()?.0.due;
        if due > self.now {
            return None;
        }

        self.pending.pop().map(|Reverse(scheduled)| scheduled.task)
    }

    /// Jumps to the earliest deadline and pops that move.
    pub fn fire_next(&mut self) -> Option<DeferredMove> {
        let Reverse(scheduled) = self.pending.pop()?;
        self.advance_to(scheduled.due);
        Some(scheduled.task)
    }

    /// Number of moves still waiting, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Clock for TimerQueue {
    fn schedule_once(&mut self, delay: Duration, task: DeferredMove) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(Scheduled {
            due: self.now + delay,
            seq,
            task,
        }));
    }
}
