//! Injectable id and time sources for the task list store.
//!
//! # Responsibility
//! - Make id generation and `createdAt` stamping deterministic under test.
//!
//! # Invariants
//! - An id source never repeats an id within one store lifetime.
//! - Seeding from an existing list starts above every persisted id; at the
//!   numeric extreme the counter wraps instead of sticking, so id minting
//!   in the store always makes progress.

use crate::model::task::{Task, TaskId};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of fresh task ids.
///
/// Id collisions are a correctness bug, not a recoverable error, so
/// implementations must stay unique under arbitrarily rapid calls.
pub trait IdSource {
    /// Returns an id this source has never handed out before.
    fn next_id(&mut self) -> TaskId;
}

/// Monotonic counter id source.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: TaskId,
}

impl SequentialIds {
    /// Starts counting at `1`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Starts counting above the largest id present in `tasks`, so fresh ids
    /// never collide with persisted ones.
    ///
    /// A snapshot already holding `TaskId::MAX` leaves no room above; the
    /// counter then starts at the extreme and wraps on the next mint, and
    /// the store skips candidates still present in the list.
    pub fn seeded_from(tasks: &[Task]) -> Self {
        let max = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        Self {
            next: max.saturating_add(1),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> TaskId {
        let id = self.next;
        // Wrapping keeps the counter moving past TaskId::MAX; a saturated
        // counter would hand out the same id forever.
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Source of "now" timestamps for `created_at`.
pub trait Clock {
    /// Current time in Unix epoch milliseconds.
    fn now_epoch_ms(&self) -> i64;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        // A clock before the epoch yields 0 rather than failing a mutator.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
}
