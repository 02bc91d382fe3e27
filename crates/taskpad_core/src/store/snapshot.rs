//! Snapshot codec for the persisted task list.
//!
//! # Responsibility
//! - Encode the full task list as the single-key JSON array snapshot.
//! - Decode persisted snapshots, degrading malformed input to "absent".
//!
//! # Invariants
//! - Encoding preserves list order; `decode(encode(list)) == list`.
//! - Decoding never fails the caller: malformed input yields `None`.

use crate::model::task::Task;
use log::warn;

/// Storage key holding the serialized task list.
pub const STATE_KEY: &str = "tasks-data";

/// Encodes the full task list as a JSON array.
///
/// Returns `None` when encoding fails; the caller skips the save and keeps
/// the in-memory state authoritative.
pub fn encode_snapshot(tasks: &[Task]) -> Option<String> {
    match serde_json::to_string(tasks) {
        Ok(raw) => Some(raw),
        Err(err) => {
            warn!("event=snapshot_encode module=store status=error error={err}");
            None
        }
    }
}

/// Decodes a persisted snapshot back into a task list.
///
/// Malformed content yields `None`; the caller falls back to an empty list.
pub fn decode_snapshot(raw: &str) -> Option<Vec<Task>> {
    match serde_json::from_str::<Vec<Task>>(raw) {
        Ok(tasks) => Some(tasks),
        Err(err) => {
            warn!("event=snapshot_decode module=store status=malformed error={err}");
            None
        }
    }
}
