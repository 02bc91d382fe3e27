//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep the persisted wire shape of a task in one place.
//!
//! # Invariants
//! - Every task is identified by a stable integer `TaskId`.
//! - Removal is a hard delete; there is no tombstone state.

pub mod task;
