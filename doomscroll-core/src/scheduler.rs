//! Cooperative timer scheduling over a simulated millisecond clock.
//!
//! All three periodic tasks (slow tick, fast tick, ghost tick) and the
//! one-shot end-of-run summary live in one queue. Tasks fire in strict
//! `(deadline, insertion order)` order, which is what makes whole runs
//! replayable. Periodic tasks are not intervals: each firing reschedules
//! itself, which is how the ghost timer gets a fresh random period every
//! time.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// What a timer firing should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// 1 s data tick: countdown, integrity, per-record corruption.
    SlowTick,
    /// 200 ms visual tick: transient glitches.
    FastTick,
    /// Ghost activity firing; period re-randomized after each one.
    GhostTick,
    /// One-shot end-of-run summary after the dramatic pause.
    RunComplete,
}

impl TaskKind {
    /// Periodic tasks are cancelable as a single group at termination.
    /// `RunComplete` is deliberately outside the group: it is scheduled
    /// *by* termination and must survive it.
    #[must_use]
    pub fn is_periodic(self) -> bool {
        !matches!(self, Self::RunComplete)
    }
}

/// Cancellation token for one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaskId(u64);

/// A task that just came due.
#[derive(Debug, Clone, Copy)]
pub struct Firing {
    /// What to do.
    pub kind: TaskKind,
    /// The simulated instant the task was due (the clock has been advanced
    /// to exactly this value).
    pub at_ms: u64,
    /// The token it was scheduled under.
    pub id: TaskId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    deadline_ms: u64,
    seq: u64,
    kind: TaskKind,
    id: TaskId,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.deadline_ms, self.seq).cmp(&(other.deadline_ms, other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-threaded timer queue plus the simulated clock it runs against.
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    queue: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
    periodic_cancelled: bool,
}

impl Scheduler {
    /// Fresh scheduler at simulated time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `kind` to fire `delay_ms` after the current simulated time.
    ///
    /// Once the periodic group has been cancelled, periodic kinds are
    /// swallowed: the returned token refers to a task that will never
    /// fire. That is what stops an in-flight callback from resurrecting
    /// a tick after termination.
    pub fn schedule_in(&mut self, delay_ms: u64, kind: TaskKind) -> TaskId {
        let id = TaskId(self.next_seq);
        let entry = Entry {
            deadline_ms: self.now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
            kind,
            id,
        };
        self.next_seq += 1;
        if !(self.periodic_cancelled && kind.is_periodic()) {
            self.queue.push(Reverse(entry));
        }
        id
    }

    /// Cancel one scheduled task. No-op if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TaskId) {
        self.queue.retain(|Reverse(entry)| entry.id != id);
    }

    /// Cancel every periodic task as a group. Idempotent; the `RunComplete`
    /// one-shot survives.
    pub fn cancel_periodic(&mut self) {
        self.periodic_cancelled = true;
        self.queue.retain(|Reverse(entry)| !entry.kind.is_periodic());
    }

    /// Whether the periodic group has been cancelled.
    #[must_use]
    pub fn periodic_cancelled(&self) -> bool {
        self.periodic_cancelled
    }

    /// Pop the next task due at or before `until_ms`, advancing the clock
    /// to its deadline. Returns `None` once nothing is due in the window.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Firing> {
        let due = {
            let Reverse(entry) = self.queue.peek()?;
            if entry.deadline_ms > until_ms {
                return None;
            }
            *entry
        };
        self.queue.pop();
        self.now_ms = self.now_ms.max(due.deadline_ms);
        Some(Firing {
            kind: due.kind,
            at_ms: due.deadline_ms,
            id: due.id,
        })
    }

    /// Advance the clock to `until_ms` (used after draining due tasks).
    /// Time never moves backwards.
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Number of tasks still queued.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_then_insertion_order() {
        let mut sched = Scheduler::new();
        sched.schedule_in(200, TaskKind::FastTick);
        sched.schedule_in(100, TaskKind::SlowTick);
        sched.schedule_in(200, TaskKind::GhostTick);

        let first = sched.pop_due(1_000).expect("due");
        assert_eq!(first.kind, TaskKind::SlowTick);
        assert_eq!(first.at_ms, 100);

        let second = sched.pop_due(1_000).expect("due");
        assert_eq!(second.kind, TaskKind::FastTick);

        let third = sched.pop_due(1_000).expect("due");
        assert_eq!(third.kind, TaskKind::GhostTick);
        assert!(sched.pop_due(1_000).is_none());
    }

    #[test]
    fn pop_due_respects_the_window() {
        let mut sched = Scheduler::new();
        sched.schedule_in(500, TaskKind::SlowTick);
        assert!(sched.pop_due(499).is_none());
        assert!(sched.pop_due(500).is_some());
    }

    #[test]
    fn clock_advances_to_each_deadline_and_never_backwards() {
        let mut sched = Scheduler::new();
        sched.schedule_in(300, TaskKind::SlowTick);
        let firing = sched.pop_due(1_000).expect("due");
        assert_eq!(firing.at_ms, 300);
        assert_eq!(sched.now_ms(), 300);

        sched.advance_to(200);
        assert_eq!(sched.now_ms(), 300);
        sched.advance_to(900);
        assert_eq!(sched.now_ms(), 900);
    }

    #[test]
    fn delays_are_relative_to_the_current_clock() {
        let mut sched = Scheduler::new();
        sched.advance_to(5_000);
        sched.schedule_in(1_000, TaskKind::GhostTick);
        assert!(sched.pop_due(5_999).is_none());
        let firing = sched.pop_due(6_000).expect("due");
        assert_eq!(firing.at_ms, 6_000);
    }

    #[test]
    fn cancel_periodic_is_idempotent_and_spares_the_one_shot() {
        let mut sched = Scheduler::new();
        sched.schedule_in(100, TaskKind::SlowTick);
        sched.schedule_in(100, TaskKind::FastTick);
        sched.schedule_in(2_000, TaskKind::RunComplete);

        sched.cancel_periodic();
        sched.cancel_periodic();
        assert_eq!(sched.pending(), 1);

        let survivor = sched.pop_due(10_000).expect("due");
        assert_eq!(survivor.kind, TaskKind::RunComplete);
    }

    #[test]
    fn periodic_reschedule_after_group_cancel_is_swallowed() {
        let mut sched = Scheduler::new();
        sched.cancel_periodic();
        sched.schedule_in(100, TaskKind::SlowTick);
        assert_eq!(sched.pending(), 0);
        sched.schedule_in(100, TaskKind::RunComplete);
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn cancel_single_task() {
        let mut sched = Scheduler::new();
        let id = sched.schedule_in(100, TaskKind::GhostTick);
        sched.schedule_in(200, TaskKind::SlowTick);
        sched.cancel(id);
        let firing = sched.pop_due(1_000).expect("due");
        assert_eq!(firing.kind, TaskKind::SlowTick);
    }
}
