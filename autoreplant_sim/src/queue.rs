// Bounded queue of pending replant jobs.
//
// Jobs are unique by value (position + crop + due time) and stored in a
// `BTreeSet`, so a location harvested twice before the first replant
// resolves can hold two entries — harmless, since a replant only applies to
// an empty position. Drain order follows the set's ordering (position-major),
// not due time: due-time ordering is deliberately not enforced, any drain
// order observes the same per-job due constraint.
//
// See also: `sim.rs` for the poll loop that drains this queue and the event
// gate that fills it, `config.rs` for `max_queue_size` and
// `replants_per_tick`.

use crate::types::{BlockPos, CropKind};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// A scheduled, delayed block mutation: restore `crop` at `position` once
/// `execute_at_ms` has passed, provided the position is still empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReplantJob {
    pub position: BlockPos,
    pub crop: CropKind,
    /// Earliest time this job may apply, in host milliseconds.
    pub execute_at_ms: u64,
}

/// Pending replant jobs, capped at a configured maximum.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplantQueue {
    jobs: BTreeSet<ReplantJob>,
    capacity: usize,
}

impl ReplantQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            jobs: BTreeSet::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Whether the queue has reached its cap. The gate checks this before
    /// consuming a seed, so a rejected enqueue has no side effects.
    pub fn is_full(&self) -> bool {
        self.jobs.len() >= self.capacity
    }

    /// Insert a job. Returns false without side effects when at capacity.
    /// Inserting a job already present leaves the set unchanged.
    pub fn push(&mut self, job: ReplantJob) -> bool {
        if self.is_full() {
            return false;
        }
        self.jobs.insert(job);
        true
    }

    /// Remove and return up to `limit` jobs whose due time has passed.
    /// Jobs not yet due stay in the queue for the next poll.
    pub fn take_due(&mut self, now_ms: u64, limit: usize) -> SmallVec<[ReplantJob; 16]> {
        let mut due: SmallVec<[ReplantJob; 16]> = SmallVec::new();
        if limit == 0 {
            return due;
        }
        for job in &self.jobs {
            if job.execute_at_ms <= now_ms {
                due.push(*job);
                if due.len() == limit {
                    break;
                }
            }
        }
        for job in &due {
            self.jobs.remove(job);
        }
        due
    }

    /// Drop every pending job. Reload and shutdown call this unconditionally.
    pub fn clear(&mut self) {
        self.jobs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(x: i32, at: u64) -> ReplantJob {
        ReplantJob {
            position: BlockPos::new(x, 64, 0),
            crop: CropKind::Wheat,
            execute_at_ms: at,
        }
    }

    #[test]
    fn push_respects_capacity() {
        let mut queue = ReplantQueue::new(2);
        assert!(queue.push(job(0, 100)));
        assert!(queue.push(job(1, 100)));
        assert!(queue.is_full());
        assert!(!queue.push(job(2, 100)));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn duplicate_jobs_collapse() {
        let mut queue = ReplantQueue::new(10);
        assert!(queue.push(job(0, 100)));
        assert!(queue.push(job(0, 100)));
        assert_eq!(queue.len(), 1);

        // Same position, different due time: a distinct job.
        assert!(queue.push(job(0, 150)));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn take_due_leaves_future_jobs() {
        let mut queue = ReplantQueue::new(10);
        queue.push(job(0, 100));
        queue.push(job(1, 200));
        queue.push(job(2, 300));

        let due = queue.take_due(200, 10);
        assert_eq!(due.len(), 2);
        assert!(due.iter().all(|j| j.execute_at_ms <= 200));
        assert_eq!(queue.len(), 1);

        // The remaining job becomes due later.
        let due = queue.take_due(300, 10);
        assert_eq!(due.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn take_due_honors_limit() {
        let mut queue = ReplantQueue::new(100);
        for x in 0..30 {
            queue.push(job(x, 100));
        }

        let first = queue.take_due(100, 10);
        assert_eq!(first.len(), 10);
        assert_eq!(queue.len(), 20);

        // The rest drain on subsequent calls, not permanently skipped.
        let second = queue.take_due(100, 10);
        let third = queue.take_due(100, 10);
        assert_eq!(second.len() + third.len(), 20);
        assert!(queue.is_empty());
    }

    #[test]
    fn take_due_with_zero_limit_is_a_noop() {
        let mut queue = ReplantQueue::new(10);
        queue.push(job(0, 100));
        assert!(queue.take_due(100, 0).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut queue = ReplantQueue::new(10);
        for x in 0..5 {
            queue.push(job(x, 100));
        }
        queue.clear();
        assert!(queue.is_empty());
        // Capacity is unchanged by a clear.
        assert_eq!(queue.capacity(), 10);
    }

    #[test]
    fn queue_serialization_roundtrip() {
        let mut queue = ReplantQueue::new(10);
        queue.push(job(0, 100));
        queue.push(job(1, 200));

        let json = serde_json::to_string(&queue).unwrap();
        let mut restored: ReplantQueue = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.capacity(), 10);
        assert_eq!(restored.take_due(100, 10).len(), 1);
    }
}
