//! Task list store: authoritative state plus persistence coupling.
//!
//! # Responsibility
//! - Own the in-memory task list, the view filter and the edit session.
//! - Apply user intents as total, synchronous mutations.
//! - Write the full snapshot through the storage port after each mutation.
//!
//! # Invariants
//! - Task ids stay pairwise unique across every operation sequence.
//! - List order is insertion order, newest first; edits and toggles keep it.
//! - Mutators never fail the caller; storage failures are logged and
//!   absorbed.
//! - Text entering the list is trimmed and non-empty.

use crate::model::task::{Filter, Task, TaskId};
use crate::storage::state_store::StateStorage;
use crate::store::snapshot::{decode_snapshot, encode_snapshot, STATE_KEY};
use crate::store::sources::{Clock, IdSource, SequentialIds, SystemClock};
use log::{debug, info, warn};

/// Transient edit-session state for renaming one task.
///
/// Held outside the task list; dropping the session never mutates tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    /// No rename in progress.
    #[default]
    Idle,
    /// `target` is being renamed; `draft` holds the uncommitted text.
    Editing { target: TaskId, draft: String },
}

/// Authoritative task list state with a persist-after-mutate contract.
///
/// Single-threaded by design: one logical actor mutates the store and every
/// operation runs to completion before the next. Derived views are pure
/// projections recomputed on demand.
pub struct TaskListStore<S: StateStorage> {
    storage: S,
    tasks: Vec<Task>,
    filter: Filter,
    pending_input: String,
    session: EditSession,
    ids: Box<dyn IdSource>,
    clock: Box<dyn Clock>,
}

impl<S: StateStorage> TaskListStore<S> {
    /// Loads initial state from `storage`.
    ///
    /// Absent keys, malformed snapshots and storage read failures all
    /// degrade to an empty list; startup never fails on bad state.
    pub fn load(storage: S) -> Self {
        let tasks = Self::read_initial(&storage);
        let ids = Box::new(SequentialIds::seeded_from(&tasks));
        Self::assemble(storage, tasks, ids, Box::new(SystemClock))
    }

    /// Loads initial state with injected id/time sources.
    ///
    /// # Contract
    /// - The id source should stay above every id already present in
    ///   storage; candidates that do collide are skipped at mint time.
    pub fn load_with(storage: S, ids: Box<dyn IdSource>, clock: Box<dyn Clock>) -> Self {
        let tasks = Self::read_initial(&storage);
        Self::assemble(storage, tasks, ids, clock)
    }

    fn assemble(
        storage: S,
        tasks: Vec<Task>,
        ids: Box<dyn IdSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            tasks,
            filter: Filter::All,
            pending_input: String::new(),
            session: EditSession::Idle,
            ids,
            clock,
        }
    }

    fn read_initial(storage: &S) -> Vec<Task> {
        match storage.get(STATE_KEY) {
            Ok(Some(raw)) => match decode_snapshot(&raw) {
                Some(tasks) => {
                    info!(
                        "event=state_load module=store status=ok count={} source=snapshot",
                        tasks.len()
                    );
                    tasks
                }
                None => {
                    warn!("event=state_load module=store status=fallback reason=malformed_snapshot");
                    Vec::new()
                }
            },
            Ok(None) => {
                info!("event=state_load module=store status=ok count=0 source=absent");
                Vec::new()
            }
            Err(err) => {
                warn!("event=state_load module=store status=fallback reason=storage_error error={err}");
                Vec::new()
            }
        }
    }

    /// Adds a task from raw user input.
    ///
    /// Trims the input first; whitespace-only input is a no-op that does not
    /// touch storage. On success the new task is prepended (newest first),
    /// the pending input buffer is cleared, and the list is persisted.
    pub fn add(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        let task = Task::new(self.mint_id(), trimmed, self.clock.now_epoch_ms());
        debug!(
            "event=task_add module=store status=ok id={} count={}",
            task.id,
            self.tasks.len() + 1
        );
        self.tasks.insert(0, task);
        self.pending_input.clear();
        self.persist();
    }

    /// Sets the completion flag on the task matching `id`.
    ///
    /// Unknown ids are silent no-ops; the list is persisted either way.
    pub fn set_done(&mut self, id: TaskId, done: bool) {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.done = done;
                debug!("event=task_set_done module=store status=ok id={id} done={done}");
            }
            None => {
                debug!("event=task_set_done module=store status=noop id={id} reason=unknown_id");
            }
        }
        self.persist();
    }

    /// Removes the task matching `id` when present, then persists.
    pub fn remove(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let status = if self.tasks.len() < before {
            "ok"
        } else {
            "noop"
        };
        debug!("event=task_remove module=store status={status} id={id}");
        self.persist();
    }

    /// Removes every completed task, then persists.
    pub fn clear_done(&mut self) {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.done);
        debug!(
            "event=task_clear_done module=store status=ok removed={}",
            before - self.tasks.len()
        );
        self.persist();
    }

    /// Marks every task done, or undone when every task was already done.
    ///
    /// An empty list counts as "not all done", so the operation is a
    /// persisted no-op there.
    pub fn toggle_all(&mut self) {
        let all_done = !self.tasks.is_empty() && self.tasks.iter().all(|task| task.done);
        for task in &mut self.tasks {
            task.done = !all_done;
        }
        debug!(
            "event=task_toggle_all module=store status=ok done={} count={}",
            !all_done,
            self.tasks.len()
        );
        self.persist();
    }

    /// Begins renaming `id`, seeding the draft from the task's current text.
    ///
    /// Starting while another rename is active retargets the session
    /// directly, with no intermediate idle state. Unknown ids leave the
    /// session unchanged.
    pub fn start_edit(&mut self, id: TaskId) {
        let Some(task) = self.tasks.iter().find(|task| task.id == id) else {
            debug!("event=task_edit module=store status=noop id={id} reason=unknown_id");
            return;
        };
        self.session = EditSession::Editing {
            target: id,
            draft: task.text.clone(),
        };
    }

    /// Replaces the draft text of the active rename. No-op while idle.
    pub fn update_draft(&mut self, text: &str) {
        if let EditSession::Editing { draft, .. } = &mut self.session {
            *draft = text.to_string();
        }
    }

    /// Commits a rename and returns the session to idle.
    ///
    /// Empty-after-trim text degrades to [`TaskListStore::remove`]. Non-empty
    /// text replaces the task's text and persists; unknown ids leave the
    /// list unchanged but still persist.
    pub fn commit_edit(&mut self, id: TaskId, new_text: &str) {
        self.session = EditSession::Idle;

        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            self.remove(id);
            return;
        }

        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.text = trimmed.to_string();
                debug!("event=task_edit module=store status=ok id={id}");
            }
            None => {
                debug!("event=task_edit module=store status=noop id={id} reason=unknown_id");
            }
        }
        self.persist();
    }

    /// Abandons the active rename without touching the list or storage.
    pub fn cancel_edit(&mut self) {
        self.session = EditSession::Idle;
    }

    /// Replaces the active view filter. Never persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// The active view filter.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Pure projection: tasks visible under the active filter, in list order.
    pub fn filtered_view(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// Pure projection: number of tasks still pending.
    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.done).count()
    }

    /// Full list in insertion order, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Current edit-session state.
    pub fn edit_session(&self) -> &EditSession {
        &self.session
    }

    /// Id of the task being renamed, if any.
    pub fn editing_id(&self) -> Option<TaskId> {
        match self.session {
            EditSession::Idle => None,
            EditSession::Editing { target, .. } => Some(target),
        }
    }

    /// Draft text of the active rename, if any.
    pub fn draft_text(&self) -> Option<&str> {
        match &self.session {
            EditSession::Idle => None,
            EditSession::Editing { draft, .. } => Some(draft.as_str()),
        }
    }

    /// Uncommitted text of the add box.
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replaces the uncommitted add-box text. Never persisted.
    pub fn set_pending_input(&mut self, text: &str) {
        self.pending_input = text.to_string();
    }

    /// Read access to the storage port, for diagnostics and tests.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a fresh id not present in the list.
    ///
    /// A counter seeded at `TaskId::MAX` wraps and can revisit persisted
    /// ids; candidates already in the list are skipped.
    fn mint_id(&mut self) -> TaskId {
        loop {
            let id = self.ids.next_id();
            if self.tasks.iter().all(|task| task.id != id) {
                return id;
            }
        }
    }

    /// Writes the full current list through the storage port.
    ///
    /// Mutators stay total: encode or write failures are logged and
    /// absorbed, and the in-memory state remains authoritative.
    fn persist(&mut self) {
        let Some(raw) = encode_snapshot(&self.tasks) else {
            return;
        };
        if let Err(err) = self.storage.set(STATE_KEY, &raw) {
            warn!(
                "event=state_save module=store status=error count={} error={err}",
                self.tasks.len()
            );
        }
    }
}
