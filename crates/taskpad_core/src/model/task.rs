//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its persisted wire shape.
//! - Define the view filter applied on top of the task list.
//!
//! # Invariants
//! - `id` is unique within one list and never changes after creation.
//! - `text` is trimmed and non-empty on every mutation path.
//! - The wire shape is the fixed four-field JSON object
//!   `{id, text, done, createdAt}`.

use serde::{Deserialize, Serialize};

/// Stable integer identifier for one task within a list.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// One to-do item owned by the task list store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within the list; immutable once created.
    pub id: TaskId,
    /// User-entered text. Mutation paths only store trimmed, non-empty text.
    pub text: String,
    /// Completion flag.
    pub done: bool,
    /// Creation time in Unix epoch milliseconds.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Task {
    /// Creates a pending task.
    ///
    /// # Contract
    /// - `text` must already be trimmed and non-empty; the store owns that
    ///   normalization.
    /// - `done` starts as `false`.
    pub fn new(id: TaskId, text: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            text: text.into(),
            done: false,
            created_at,
        }
    }
}

/// View selector over the task list.
///
/// Process-wide single value, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    /// Every task regardless of completion.
    #[default]
    All,
    /// Only tasks with `done == false`.
    Active,
    /// Only tasks with `done == true`.
    Done,
}

impl Filter {
    /// Returns whether `task` is visible under this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.done,
            Self::Done => task.done,
        }
    }

    /// Parses a user-facing filter name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Stable lowercase name used by CLI output and log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Done => "done",
        }
    }
}
