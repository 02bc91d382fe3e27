//! Task list state container and its persistence coupling.
//!
//! # Responsibility
//! - Own the authoritative in-memory task list, filter and edit session.
//! - Apply user intents as total synchronous mutations, then write the full
//!   snapshot through the storage port.
//!
//! # Invariants
//! - Task ids stay pairwise unique over every operation sequence.
//! - Derived views are pure projections recomputed on demand; there is no
//!   dependency-tracking machinery.

pub mod snapshot;
pub mod sources;
pub mod task_list;
