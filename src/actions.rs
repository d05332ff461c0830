//! User-facing handlers over the task collection.
//!
//! Each handler runs one mutation, reports the outcome to a
//! [`NotificationSink`], and hands the underlying result back so callers can
//! decide whether a failure should also end the process.

use crate::error::{Error, Result};
use crate::notify::{Notification, NotificationSink};
use crate::storage::Backend;
use crate::task::{Task, TaskList};

pub const TASK_ADDED: &str = "Task added successfully";
pub const TASK_DELETED: &str = "Task deleted successfully";
pub const TASKS_CLEARED: &str = "All tasks cleared";

fn failure(err: &Error) -> Notification {
    match err {
        Error::EmptyDescription => Notification::error(err.to_string()),
        other => Notification::error(format!("Failed to save tasks: {other}")),
    }
}

pub fn add_task<B: Backend>(
    tasks: &mut TaskList<B>,
    description: &str,
    sink: &mut dyn NotificationSink,
) -> Result<Task> {
    match tasks.add(description) {
        Ok(task) => {
            sink.notify(Notification::success(TASK_ADDED));
            Ok(task)
        }
        Err(err) => {
            sink.notify(failure(&err));
            Err(err)
        }
    }
}

/// Toggle is silent on success and on unknown ids.
pub fn toggle_task<B: Backend>(
    tasks: &mut TaskList<B>,
    id: &str,
    sink: &mut dyn NotificationSink,
) -> Result<bool> {
    tasks.toggle(id).inspect_err(|err| sink.notify(failure(err)))
}

/// Delete reports success whether or not `id` existed.
pub fn delete_task<B: Backend>(
    tasks: &mut TaskList<B>,
    id: &str,
    sink: &mut dyn NotificationSink,
) -> Result<bool> {
    match tasks.delete(id) {
        Ok(removed) => {
            sink.notify(Notification::success(TASK_DELETED));
            Ok(removed)
        }
        Err(err) => {
            sink.notify(failure(&err));
            Err(err)
        }
    }
}

pub fn clear_tasks<B: Backend>(
    tasks: &mut TaskList<B>,
    sink: &mut dyn NotificationSink,
) -> Result<usize> {
    match tasks.clear() {
        Ok(count) => {
            sink.notify(Notification::success(TASKS_CLEARED));
            Ok(count)
        }
        Err(err) => {
            sink.notify(failure(&err));
            Err(err)
        }
    }
}
