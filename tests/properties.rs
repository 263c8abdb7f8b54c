//! Property tests for the store and column grouping.

use proptest::prelude::*;
use taskboard::board::compute_columns;
use taskboard::store::TaskStore;
use taskboard::task::{Status, Task};

fn arb_status() -> impl Strategy<Value = Status> {
    prop_oneof![Just(Status::Todo), Just(Status::Doing), Just(Status::Done)]
}

/// Tasks with unique ids in insertion order.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(("[a-z]{1,12}", "[a-z ]{0,8}[a-z]", arb_status()), 0..24).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (title, description, status))| {
                    Task::new(i as u32 + 1, title, description, status)
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn find_by_id_round_trips(tasks in arb_tasks()) {
        let store = TaskStore::new(tasks).unwrap();
        for task in store.list() {
            prop_assert_eq!(store.find_by_id(task.id).unwrap(), task);
        }
    }

    #[test]
    fn columns_partition_every_task_once(tasks in arb_tasks()) {
        let columns = compute_columns(&tasks);
        prop_assert_eq!(columns.len(), tasks.len());
        for status in Status::ALL {
            let expected: Vec<u32> =
                tasks.iter().filter(|t| t.status == status).map(|t| t.id).collect();
            let actual: Vec<u32> = columns.get(status).iter().map(|t| t.id).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn blank_title_is_never_applied(
        tasks in arb_tasks().prop_filter("need a task", |t| !t.is_empty()),
        blank in "[ \t]{0,4}",
        status in arb_status(),
    ) {
        let id = tasks[0].id;
        let before = tasks[0].clone();
        let mut store = TaskStore::new(tasks).unwrap();
        store.begin_edit(id).unwrap();
        prop_assert!(store.apply_edit(&blank, "something", status.as_str()).is_err());
        prop_assert_eq!(store.find_by_id(id).unwrap(), &before);
        prop_assert_eq!(store.active_edit(), Some(id));
    }

    #[test]
    fn normalize_always_yields_a_column(raw in ".{0,16}") {
        let status = Status::normalize(&raw);
        prop_assert!(Status::ALL.contains(&status));
    }

    #[test]
    fn edits_keep_order(tasks in arb_tasks().prop_filter("need a task", |t| !t.is_empty()),
                        pick in any::<prop::sample::Index>(),
                        status in arb_status()) {
        let ids: Vec<u32> = tasks.iter().map(|t| t.id).collect();
        let id = ids[pick.index(ids.len())];
        let mut store = TaskStore::new(tasks).unwrap();
        store.begin_edit(id).unwrap();
        store.apply_edit("new", "desc", status.as_str()).unwrap();
        let after: Vec<u32> = store.list().map(|t| t.id).collect();
        prop_assert_eq!(after, ids);
    }
}
