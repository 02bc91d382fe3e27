//! State storage port and adapters.
//!
//! # Responsibility
//! - Define the key-value contract the task list store persists through.
//! - Isolate SQLite details from store/business orchestration.
//!
//! # Invariants
//! - Adapters store values verbatim; interpreting the snapshot belongs to
//!   the store layer.
//! - `get` distinguishes "key absent" from transport failure.

pub mod state_store;
