use std::collections::HashSet;
use taskpad_core::{
    Clock, Filter, MemoryStateStorage, SequentialIds, TaskId, TaskListStore,
};

#[test]
fn add_creates_pending_task_with_trimmed_text() {
    let mut store = new_store();

    store.set_pending_input("  buy milk  ");
    store.add("  buy milk  ");

    assert_eq!(store.tasks().len(), 1);
    let task = &store.tasks()[0];
    assert_eq!(task.text, "buy milk");
    assert!(!task.done);
    assert_eq!(task.created_at, FIXED_NOW);
    assert_eq!(store.pending_input(), "");
}

#[test]
fn add_ignores_empty_and_whitespace_input() {
    let mut store = new_store();

    store.add("");
    store.add("   ");
    store.add("\t\n");

    assert!(store.tasks().is_empty());
}

#[test]
fn add_prepends_newest_first() {
    let mut store = new_store();

    store.add("first");
    store.add("second");
    store.add("third");

    let texts: Vec<_> = store.tasks().iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, ["third", "second", "first"]);
}

#[test]
fn ids_stay_pairwise_unique_across_operation_sequences() {
    let mut store = new_store();

    for round in 0..5 {
        store.add(&format!("task {round}"));
    }
    let removed = id_of(&store, "task 2");
    store.remove(removed);
    store.toggle_all();
    store.clear_done();
    for round in 5..10 {
        store.add(&format!("task {round}"));
    }

    let ids: HashSet<TaskId> = store.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids.len(), store.tasks().len());
}

#[test]
fn set_done_flips_flag_and_projections_follow() {
    let mut store = new_store();
    store.add("buy milk");
    store.add("pay rent");
    let milk = id_of(&store, "buy milk");

    store.set_done(milk, true);

    store.set_filter(Filter::Active);
    assert!(store.filtered_view().iter().all(|task| task.id != milk));

    store.set_filter(Filter::Done);
    let done_view = store.filtered_view();
    assert_eq!(done_view.len(), 1);
    assert_eq!(done_view[0].id, milk);
}

#[test]
fn set_done_on_unknown_id_changes_nothing() {
    let mut store = new_store();
    store.add("buy milk");

    store.set_done(999, true);

    assert_eq!(store.tasks().len(), 1);
    assert!(!store.tasks()[0].done);
}

#[test]
fn filtered_view_with_all_returns_every_task() {
    let mut store = new_store();
    store.add("buy milk");
    store.add("pay rent");
    store.set_done(id_of(&store, "pay rent"), true);

    store.set_filter(Filter::All);
    assert_eq!(store.filtered_view().len(), 2);

    let milk_matches = store
        .filtered_view()
        .iter()
        .filter(|task| task.text == "buy milk" && !task.done)
        .count();
    assert_eq!(milk_matches, 1);
}

#[test]
fn remove_drops_matching_task_only() {
    let mut store = new_store();
    store.add("keep me");
    store.add("drop me");

    store.remove(id_of(&store, "drop me"));

    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].text, "keep me");

    store.remove(999);
    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn toggle_all_cycles_between_all_done_and_all_undone() {
    let mut store = new_store();
    store.add("one");
    store.add("two");
    store.add("three");
    store.set_done(id_of(&store, "two"), true);

    store.toggle_all();
    assert!(store.tasks().iter().all(|task| task.done));

    store.toggle_all();
    assert!(store.tasks().iter().all(|task| !task.done));
}

#[test]
fn toggle_all_on_empty_list_is_a_noop() {
    let mut store = new_store();
    store.toggle_all();
    assert!(store.tasks().is_empty());
}

#[test]
fn clear_done_removes_all_and_only_done_tasks() {
    let mut store = new_store();
    store.add("done a");
    store.add("pending b");
    store.add("done c");
    store.set_done(id_of(&store, "done a"), true);
    store.set_done(id_of(&store, "done c"), true);

    let pending_before = store.pending_count();
    store.clear_done();

    assert_eq!(store.pending_count(), pending_before);
    let texts: Vec<_> = store.tasks().iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, ["pending b"]);
}

#[test]
fn pending_count_tracks_undone_tasks() {
    let mut store = new_store();
    assert_eq!(store.pending_count(), 0);

    store.add("one");
    store.add("two");
    assert_eq!(store.pending_count(), 2);

    store.set_done(id_of(&store, "one"), true);
    assert_eq!(store.pending_count(), 1);
}

#[test]
fn order_is_preserved_across_toggles_and_edits() {
    let mut store = new_store();
    store.add("first");
    store.add("second");
    store.add("third");
    let order_before: Vec<TaskId> = store.tasks().iter().map(|task| task.id).collect();

    store.set_done(id_of(&store, "second"), true);
    let second = id_of(&store, "second");
    store.start_edit(second);
    store.commit_edit(second, "second renamed");
    store.toggle_all();

    let order_after: Vec<TaskId> = store.tasks().iter().map(|task| task.id).collect();
    assert_eq!(order_after, order_before);
}

#[test]
fn set_filter_does_not_touch_the_list() {
    let mut store = new_store();
    store.add("only task");

    store.set_filter(Filter::Done);
    assert_eq!(store.filter(), Filter::Done);
    assert_eq!(store.tasks().len(), 1);
    assert!(store.filtered_view().is_empty());
}

const FIXED_NOW: i64 = 1_700_000_000_000;

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> i64 {
        self.0
    }
}

fn new_store() -> TaskListStore<MemoryStateStorage> {
    TaskListStore::load_with(
        MemoryStateStorage::new(),
        Box::new(SequentialIds::new()),
        Box::new(FixedClock(FIXED_NOW)),
    )
}

fn id_of(store: &TaskListStore<MemoryStateStorage>, text: &str) -> TaskId {
    store
        .tasks()
        .iter()
        .find(|task| task.text == text)
        .map(|task| task.id)
        .unwrap()
}
