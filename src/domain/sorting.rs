use crate::domain::task::Task;
use crate::error::BoardError;
use std::cmp::Ordering;
use std::str::FromStr;

/// Keys available for sorting the task list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Priority,
    Status,
    Project,
}

impl FromStr for SortKey {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "priority" => Ok(SortKey::Priority),
            "status" => Ok(SortKey::Status),
            "project" => Ok(SortKey::Project),
            _ => Err(BoardError::InvalidSortKey(s.to_string())),
        }
    }
}

/// A filtered, sorted view over the task list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub project: Option<String>,
    pub sort: SortKey,
}

impl TaskQuery {
    pub fn sorted_by(sort: SortKey) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Restricts the view to one project. `"all"` clears the filter.
    pub fn in_project(mut self, project: impl Into<String>) -> Self {
        let project = project.into();
        self.project = if project == "all" { None } else { Some(project) };
        self
    }

    /// Runs the query over tasks in their current order
    pub fn run<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Vec<Task> {
        let mut view: Vec<Task> = tasks
            .into_iter()
            .filter(|t| self.project.as_ref().map_or(true, |p| &t.project == p))
            .cloned()
            .collect();
        sort_tasks(&mut view, self.sort);
        view
    }
}

/// Sorts tasks in place, ascending by `key` (urgent first, backlog first,
/// projects A to Z).
///
/// The sort is stable: tasks comparing equal keep their relative order, so a
/// view recomputed after every change does not reshuffle ties.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use command_center_core::domain::sorting::{sort_tasks, SortKey};
/// use command_center_core::domain::task::{Priority, Task, TaskId};
///
/// let day = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
/// let mut low = Task::new(TaskId::from("1"), "Polish", day);
/// low.priority = Priority::Low;
/// let mut urgent = Task::new(TaskId::from("2"), "Fix outage", day);
/// urgent.priority = Priority::Urgent;
///
/// let mut tasks = vec![low, urgent];
/// sort_tasks(&mut tasks, SortKey::Priority);
/// assert_eq!(tasks[0].id.as_str(), "2");
/// ```
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    tasks.sort_by(|a, b| match key {
        SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortKey::Status => a.status.rank().cmp(&b.status.rank()),
        SortKey::Project => compare_project(&a.project, &b.project),
    });
}

/// Lexical project order, ignoring case first
fn compare_project(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
