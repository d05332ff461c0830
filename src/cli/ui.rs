//! taskpad ui command implementation

use crate::error::Result;
use crate::filter::Filter;
use crate::notify::NotificationQueue;
use crate::ui::task_list::{self, AppState};

use super::Context;

pub fn run(ctx: &Context, filter: Option<Filter>) -> Result<()> {
    let tasks = ctx.open_tasks();
    let filter = filter.unwrap_or(ctx.config.ui.default_filter);
    let notifications = NotificationQueue::from_config(&ctx.config.notifications);
    tracing::debug!(%filter, count = tasks.len(), "opening task list");

    let mut app = AppState::new(tasks, filter, notifications);
    task_list::run(&mut app)
}
