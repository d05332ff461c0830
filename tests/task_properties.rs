//! Property tests for task list operations, the derived view and the
//! notification queue.

use std::time::{Duration, Instant};

use proptest::prelude::*;

use taskpad::filter::{visible, Filter, FilterCounts};
use taskpad::notify::{Notification, NotificationQueue};
use taskpad::storage::{FileBackend, MemoryBackend};
use taskpad::task::{Task, TaskList, DEFAULT_KEY};

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Toggle(usize),
    Delete(usize),
    DeleteUnknown,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Op::Add),
        any::<usize>().prop_map(Op::Toggle),
        any::<usize>().prop_map(Op::Delete),
        Just(Op::DeleteUnknown),
    ]
}

/// Applies `ops` to `list` and returns the expected (description, completed) pairs.
fn run_ops<B: taskpad::storage::Backend>(
    list: &mut TaskList<B>,
    ops: &[Op],
) -> Vec<(String, bool)> {
    let mut model: Vec<(String, bool)> = Vec::new();
    for op in ops {
        match op {
            Op::Add(description) => {
                let result = list.add(description);
                if description.trim().is_empty() {
                    assert!(result.is_err());
                } else {
                    assert!(result.is_ok());
                    model.push((description.clone(), false));
                }
            }
            Op::Toggle(index) => {
                if list.is_empty() {
                    continue;
                }
                let position = index % list.len();
                let id = list.tasks()[position].id.clone();
                assert!(list.toggle(&id).expect("toggle"));
                model[position].1 = !model[position].1;
            }
            Op::Delete(index) => {
                if list.is_empty() {
                    continue;
                }
                let position = index % list.len();
                let id = list.tasks()[position].id.clone();
                assert!(list.delete(&id).expect("delete"));
                model.remove(position);
            }
            Op::DeleteUnknown => {
                assert!(!list.delete("no-such-id").expect("delete"));
            }
        }
    }
    model
}

fn snapshot(tasks: &[Task]) -> Vec<(String, bool)> {
    tasks
        .iter()
        .map(|task| (task.description.clone(), task.is_completed))
        .collect()
}

proptest! {
    #[test]
    fn list_tracks_model(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut list = TaskList::load(MemoryBackend::new(), DEFAULT_KEY);
        let model = run_ops(&mut list, &ops);

        prop_assert_eq!(snapshot(list.tasks()), model);

        let mut ids: Vec<&str> = list.tasks().iter().map(|task| task.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), list.len());
    }

    #[test]
    fn reload_matches_memory(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let mut list = TaskList::load(MemoryBackend::new(), DEFAULT_KEY);
        run_ops(&mut list, &ops);

        let reloaded = TaskList::load(list.backend().clone(), DEFAULT_KEY);
        prop_assert_eq!(reloaded.tasks(), list.tasks());
    }

    #[test]
    fn views_partition_tasks(flags in prop::collection::vec(any::<bool>(), 0..30)) {
        let mut list = TaskList::load(MemoryBackend::new(), DEFAULT_KEY);
        for (index, done) in flags.iter().enumerate() {
            let task = list.add(&format!("task {index}")).expect("add");
            if *done {
                list.toggle(&task.id).expect("toggle");
            }
        }

        let tasks = list.tasks();
        let counts = FilterCounts::from_tasks(tasks);
        let active = visible(tasks, Filter::Active);
        let completed = visible(tasks, Filter::Completed);

        prop_assert_eq!(visible(tasks, Filter::All).len(), tasks.len());
        prop_assert_eq!(active.len() + completed.len(), tasks.len());
        prop_assert!(active.iter().all(|task| !task.is_completed));
        prop_assert!(completed.iter().all(|task| task.is_completed));
        prop_assert_eq!(counts.active, active.len());
        prop_assert_eq!(counts.completed, completed.len());
        prop_assert_eq!(counts.all, tasks.len());
    }

    #[test]
    fn queue_never_exceeds_limit(
        limit in 1usize..6,
        pushes in prop::collection::vec(0u64..2000, 0..25),
    ) {
        let timeout = Duration::from_millis(1000);
        let mut queue = NotificationQueue::new(limit, timeout);
        let start = Instant::now();
        let mut elapsed = 0;

        for (index, step) in pushes.iter().enumerate() {
            elapsed += step;
            let now = start + Duration::from_millis(elapsed);
            queue.expire(now);
            queue.push(Notification::success(format!("n{index}")), now);
            prop_assert!(queue.len() <= limit);
            prop_assert_eq!(
                queue.visible().last().map(|n| n.description.clone()),
                Some(format!("n{index}"))
            );
        }

        queue.expire(start + Duration::from_millis(elapsed) + timeout);
        prop_assert!(queue.is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn file_store_round_trip(ops in prop::collection::vec(op_strategy(), 0..15)) {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut list = TaskList::load(FileBackend::new(dir.path()), DEFAULT_KEY);
        let model = run_ops(&mut list, &ops);

        let reloaded = TaskList::load(FileBackend::new(dir.path()), DEFAULT_KEY);
        prop_assert_eq!(snapshot(reloaded.tasks()), model);
    }
}
