//! Core domain logic for taskpad.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Filter, Task, TaskId};
pub use storage::state_store::{
    MemoryStateStorage, SqliteStateStorage, StateStorage, StorageError, StorageResult,
};
pub use store::snapshot::STATE_KEY;
pub use store::sources::{Clock, IdSource, SequentialIds, SystemClock};
pub use store::task_list::{EditSession, TaskListStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
