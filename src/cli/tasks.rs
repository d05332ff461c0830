//! taskpad task commands (add/toggle/delete/list/clear)

use serde::Serialize;

use crate::actions;
use crate::error::Result;
use crate::filter::{self, Filter, FilterCounts};
use crate::notify::Notification;
use crate::output::{emit_success, HumanOutput};
use crate::storage::FileBackend;
use crate::task::{Task, TaskList};
use crate::ui::task_list::model::EMPTY_STATE;

use super::Context;

#[derive(Serialize)]
struct AddReport {
    task: Task,
    notification: Notification,
}

#[derive(Serialize)]
struct ToggleReport {
    id: String,
    changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<Task>,
}

#[derive(Serialize)]
struct DeleteReport {
    id: String,
    removed: bool,
    notification: Notification,
}

#[derive(Serialize)]
struct ListReport<'a> {
    filter: Filter,
    counts: FilterCounts,
    tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
struct ClearReport {
    removed: usize,
    notification: Notification,
}

fn last(notifications: Vec<Notification>) -> Notification {
    notifications
        .into_iter()
        .last()
        .unwrap_or_else(|| Notification::success(""))
}

const CORRUPT_STORE_WARNING: &str = "stored tasks were unreadable and were ignored";

fn note_recovery(tasks: &TaskList<FileBackend>, human: &mut HumanOutput) {
    if tasks.recovered_from_corrupt() {
        human.push_warning(CORRUPT_STORE_WARNING);
    }
}

fn checkbox(task: &Task) -> &'static str {
    if task.is_completed {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn run_add(ctx: &Context, description: &str) -> Result<()> {
    let mut tasks = ctx.open_tasks();
    let mut notifications: Vec<Notification> = Vec::new();
    let task = actions::add_task(&mut tasks, description, &mut notifications)?;
    let notification = last(notifications);

    let mut human = HumanOutput::from_notification(&notification);
    human.push_summary("id", task.id.clone());
    human.push_summary("description", task.description.clone());
    human.push_next_step(format!("taskpad toggle {}", task.id));
    note_recovery(&tasks, &mut human);

    emit_success(
        ctx.output(),
        "add",
        &AddReport { task, notification },
        Some(&human),
    )
}

pub fn run_toggle(ctx: &Context, id: &str) -> Result<()> {
    let mut tasks = ctx.open_tasks();
    let mut notifications: Vec<Notification> = Vec::new();
    let changed = actions::toggle_task(&mut tasks, id, &mut notifications)?;
    let task = tasks.get(id).cloned();

    let header = match task.as_ref() {
        Some(task) if task.is_completed => format!("completed: {}", task.description),
        Some(task) => format!("reopened: {}", task.description),
        None => format!("no task with id {id}"),
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("id", id);
    if task.is_none() {
        human.push_next_step("taskpad list");
    }
    note_recovery(&tasks, &mut human);

    emit_success(
        ctx.output(),
        "toggle",
        &ToggleReport {
            id: id.to_string(),
            changed,
            task,
        },
        Some(&human),
    )
}

pub fn run_delete(ctx: &Context, id: &str) -> Result<()> {
    let mut tasks = ctx.open_tasks();
    let mut notifications: Vec<Notification> = Vec::new();
    let removed = actions::delete_task(&mut tasks, id, &mut notifications)?;
    let notification = last(notifications);

    let mut human = HumanOutput::from_notification(&notification);
    human.push_summary("id", id);
    note_recovery(&tasks, &mut human);

    emit_success(
        ctx.output(),
        "delete",
        &DeleteReport {
            id: id.to_string(),
            removed,
            notification,
        },
        Some(&human),
    )
}

pub fn run_list(ctx: &Context, filter: Filter) -> Result<()> {
    let tasks = ctx.open_tasks();
    let counts = FilterCounts::from_tasks(tasks.tasks());
    let visible = filter::visible(tasks.tasks(), filter);

    let mut human = HumanOutput::new(format!("Tasks ({})", filter.label()));
    for candidate in Filter::ALL {
        human.push_summary(candidate.as_str(), counts.get(candidate).to_string());
    }
    if visible.is_empty() {
        human.push_detail(EMPTY_STATE);
    }
    for task in &visible {
        human.push_detail(format!(
            "{} {}  ({})",
            checkbox(task),
            task.description,
            task.id
        ));
    }
    note_recovery(&tasks, &mut human);

    emit_success(
        ctx.output(),
        "list",
        &ListReport {
            filter,
            counts,
            tasks: visible,
        },
        Some(&human),
    )
}

pub fn run_clear(ctx: &Context) -> Result<()> {
    let mut tasks = ctx.open_tasks();
    let mut notifications: Vec<Notification> = Vec::new();
    let removed = actions::clear_tasks(&mut tasks, &mut notifications)?;
    let notification = last(notifications);

    let mut human = HumanOutput::from_notification(&notification);
    human.push_summary("removed", removed.to_string());
    note_recovery(&tasks, &mut human);

    emit_success(
        ctx.output(),
        "clear",
        &ClearReport {
            removed,
            notification,
        },
        Some(&human),
    )
}
