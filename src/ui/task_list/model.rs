use crate::filter::{self, Filter, FilterCounts};
use crate::notify::Notification;
use crate::task::Task;

pub const EMPTY_STATE: &str = "No tasks found. Add a new task to get started!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub description: String,
    pub is_completed: bool,
}

impl From<&Task> for Row {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            description: task.description.clone(),
            is_completed: task.is_completed,
        }
    }
}

/// Immutable snapshot of everything the view draws.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub input: String,
    pub cursor: usize,
    pub focus: Focus,
    pub filter: Filter,
    pub counts: FilterCounts,
    pub rows: Vec<Row>,
    pub selected: Option<usize>,
    pub notifications: Vec<Notification>,
}

impl ViewModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.selected.and_then(|idx| self.rows.get(idx))
    }
}

/// Visible rows for `filter`, in collection order.
pub fn rows(tasks: &[Task], filter: Filter) -> Vec<Row> {
    filter::visible(tasks, filter)
        .into_iter()
        .map(Row::from)
        .collect()
}

/// Keep `selected` inside `0..len`; `None` when nothing is visible.
pub fn clamp_selection(selected: usize, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(selected.min(len - 1))
    }
}

/// Move by `delta`, saturating at both ends.
pub fn step_selection(selected: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = selected as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, is_completed: bool) -> Task {
        Task {
            id: id.to_string(),
            description: id.to_string(),
            is_completed,
        }
    }

    #[test]
    fn rows_follow_filter() {
        let tasks = vec![task("1", false), task("2", true)];
        let ids = |filter: Filter| -> Vec<String> {
            rows(&tasks, filter).into_iter().map(|r| r.id).collect()
        };
        assert_eq!(ids(Filter::Active), vec!["1"]);
        assert_eq!(ids(Filter::Completed), vec!["2"]);
        assert_eq!(ids(Filter::All), vec!["1", "2"]);
    }

    #[test]
    fn selection_clamps() {
        assert_eq!(clamp_selection(5, 0), None);
        assert_eq!(clamp_selection(5, 3), Some(2));
        assert_eq!(clamp_selection(1, 3), Some(1));
    }

    #[test]
    fn selection_steps_saturate() {
        assert_eq!(step_selection(0, -1, 3), 0);
        assert_eq!(step_selection(2, 1, 3), 2);
        assert_eq!(step_selection(1, 1, 3), 2);
        assert_eq!(step_selection(0, 10, 0), 0);
    }
}
