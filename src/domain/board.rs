use crate::domain::task::{Task, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A kanban column: one workflow status and its tasks in on-screen order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: TaskStatus,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(id: TaskStatus) -> Self {
        Self {
            id,
            title: id.label().to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }
}

/// One end of a drag gesture: a column and an index within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    pub column: TaskStatus,
    pub index: usize,
}

impl DragLocation {
    pub fn new(column: TaskStatus, index: usize) -> Self {
        Self { column, index }
    }
}

/// The event delivered once when a drag gesture completes.
///
/// `destination` is `None` when the task was dropped outside any column,
/// which cancels the drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEnd {
    pub task_id: TaskId,
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

/// Problems that make a board violate its structural invariants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardDefect {
    DuplicateColumn(TaskStatus),
    DuplicateTask(TaskId),
    BlankTitle(TaskId),
    /// A task whose status names a different column than the one holding it
    StatusMismatch(TaskId),
}

/// Kanban board state: the fixed columns in workflow order.
///
/// Column membership is the single source of truth for a task's status; every
/// mutation here rewrites `Task::status` to match the owning column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    /// An empty board with every column present
    pub fn new() -> Self {
        Self {
            columns: TaskStatus::ALL.into_iter().map(Column::new).collect(),
        }
    }

    /// Builds a board from columns, adding missing ones and restoring workflow
    /// order. Task status fields are rewritten from membership.
    ///
    /// Fails if a column or a task id appears more than once, or a task has a
    /// blank title.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, BoardDefect> {
        let mut seen_columns = HashSet::new();
        for column in &columns {
            if !seen_columns.insert(column.id) {
                return Err(BoardDefect::DuplicateColumn(column.id));
            }
        }

        let mut board = Self::new();
        for mut column in columns {
            let slot = board.column_mut(column.id);
            for task in column.tasks.iter_mut() {
                task.status = column.id;
                if task.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
                    task.description = None;
                }
            }
            if !column.title.trim().is_empty() {
                slot.title = column.title;
            }
            slot.tasks = column.tasks;
        }

        board.validate()?;
        Ok(board)
    }

    /// Groups a flat task list into columns by each task's status field,
    /// keeping list order within every column.
    pub fn from_flat(tasks: Vec<Task>) -> Result<Self, BoardDefect> {
        let mut board = Self::new();
        for task in tasks {
            board.column_mut(task.status).tasks.push(task);
        }
        board.validate()?;
        Ok(board)
    }

    /// Flat view: every task in column order, then in-column order
    pub fn to_flat(&self) -> Vec<Task> {
        self.tasks().cloned().collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: TaskStatus) -> &Column {
        &self.columns[Self::slot(id)]
    }

    fn column_mut(&mut self, id: TaskStatus) -> &mut Column {
        &mut self.columns[Self::slot(id)]
    }

    // Columns are always stored in workflow order, so the rank is the index.
    fn slot(id: TaskStatus) -> usize {
        id.rank() as usize
    }

    /// Iterates all tasks in board order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Column::is_empty)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.locate(id).is_some()
    }

    /// Finds the column and index currently holding a task
    pub fn locate(&self, id: &TaskId) -> Option<DragLocation> {
        self.columns.iter().find_map(|column| {
            column
                .position(id)
                .map(|index| DragLocation::new(column.id, index))
        })
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        let at = self.locate(id)?;
        self.column(at.column).tasks.get(at.index)
    }

    pub(crate) fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        let at = self.locate(id)?;
        self.column_mut(at.column).tasks.get_mut(at.index)
    }

    /// Appends a task to the end of its status column
    pub(crate) fn push(&mut self, task: Task) {
        self.column_mut(task.status).tasks.push(task);
    }

    /// Removes a task wherever it lives
    pub(crate) fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let at = self.locate(id)?;
        Some(self.column_mut(at.column).tasks.remove(at.index))
    }

    /// Applies a drag-end event.
    ///
    /// Removes the task at the source index and inserts it at the destination
    /// index, shifting later tasks right. The destination index is clamped to
    /// the column length after removal. Returns `false` without touching the
    /// board when the drag was cancelled, did not move the task, or the source
    /// location does not hold `task_id`.
    pub fn apply_drag(&mut self, drag: &DragEnd) -> bool {
        let Some(destination) = drag.destination else {
            return false;
        };
        if destination == drag.source {
            return false;
        }

        let holds_task = self
            .column(drag.source.column)
            .tasks
            .get(drag.source.index)
            .is_some_and(|t| t.id == drag.task_id);
        if !holds_task {
            return false;
        }

        let same_column = destination.column == drag.source.column;
        let room = self.column(destination.column).len() - usize::from(same_column);
        let index = destination.index.min(room);
        if same_column && index == drag.source.index {
            return false;
        }

        // Both ends are resolved before anything is removed, so the task is
        // never absent from, or duplicated across, the columns.
        let mut task = self
            .column_mut(drag.source.column)
            .tasks
            .remove(drag.source.index);
        task.status = destination.column;
        self.column_mut(destination.column).tasks.insert(index, task);
        true
    }

    /// Moves a task to the end of another column. Returns `false` if the task
    /// is unknown or already has that status.
    pub(crate) fn move_to_end(&mut self, id: &TaskId, status: TaskStatus) -> bool {
        let Some(source) = self.locate(id) else {
            return false;
        };
        if source.column == status {
            return false;
        }
        let index = self.column(status).len();
        self.apply_drag(&DragEnd {
            task_id: id.clone(),
            source,
            destination: Some(DragLocation::new(status, index)),
        })
    }

    /// Checks the structural invariants: unique task ids, non-blank titles,
    /// task status agreeing with column membership.
    pub fn validate(&self) -> Result<(), BoardDefect> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            for task in &column.tasks {
                if !seen.insert(&task.id) {
                    return Err(BoardDefect::DuplicateTask(task.id.clone()));
                }
                if task.title.trim().is_empty() {
                    return Err(BoardDefect::BlankTitle(task.id.clone()));
                }
                if task.status != column.id {
                    return Err(BoardDefect::StatusMismatch(task.id.clone()));
                }
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: &str, status: TaskStatus) -> Task {
        let mut t = Task::new(
            TaskId::from(id),
            format!("Task {id}"),
            NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
        );
        t.status = status;
        t
    }

    fn ids(board: &Board, status: TaskStatus) -> Vec<&str> {
        board
            .column(status)
            .tasks
            .iter()
            .map(|t| t.id.as_str())
            .collect()
    }

    fn board_with(backlog: &[&str], done: &[&str]) -> Board {
        let mut board = Board::new();
        for id in backlog {
            board.push(task(id, TaskStatus::Backlog));
        }
        for id in done {
            board.push(task(id, TaskStatus::Done));
        }
        board
    }

    fn drag(id: &str, from: (TaskStatus, usize), to: Option<(TaskStatus, usize)>) -> DragEnd {
        DragEnd {
            task_id: TaskId::from(id),
            source: DragLocation::new(from.0, from.1),
            destination: to.map(|(c, i)| DragLocation::new(c, i)),
        }
    }

    #[test]
    fn test_new_board_has_all_columns_in_order() {
        let board = Board::new();
        let order: Vec<TaskStatus> = board.columns().iter().map(|c| c.id).collect();
        assert_eq!(order, TaskStatus::ALL.to_vec());
        assert_eq!(board.column(TaskStatus::Todo).title, "To Do");
        assert!(board.is_empty());
    }

    #[test]
    fn test_cross_column_drag_to_empty_column() {
        let mut board = board_with(&["T1", "T2"], &[]);

        let moved = board.apply_drag(&drag(
            "T1",
            (TaskStatus::Backlog, 0),
            Some((TaskStatus::Done, 0)),
        ));

        assert!(moved);
        assert_eq!(ids(&board, TaskStatus::Backlog), vec!["T2"]);
        assert_eq!(ids(&board, TaskStatus::Done), vec!["T1"]);
        assert_eq!(board.get(&TaskId::from("T1")).unwrap().status, TaskStatus::Done);
    }

    #[test]
    fn test_cross_column_drag_inserts_and_shifts() {
        let mut board = board_with(&["A", "B"], &["D1", "D2", "D3"]);

        board.apply_drag(&drag("A", (TaskStatus::Backlog, 0), Some((TaskStatus::Done, 2))));

        assert_eq!(ids(&board, TaskStatus::Backlog), vec!["B"]);
        assert_eq!(ids(&board, TaskStatus::Done), vec!["D1", "D2", "A", "D3"]);
        assert_eq!(board.get(&TaskId::from("A")).unwrap().status, TaskStatus::Done);
    }

    #[test]
    fn test_reorder_within_column() {
        let mut board = board_with(&["A", "B", "C", "D"], &[]);

        board.apply_drag(&drag("A", (TaskStatus::Backlog, 0), Some((TaskStatus::Backlog, 2))));
        assert_eq!(ids(&board, TaskStatus::Backlog), vec!["B", "C", "A", "D"]);

        board.apply_drag(&drag("D", (TaskStatus::Backlog, 3), Some((TaskStatus::Backlog, 0))));
        assert_eq!(ids(&board, TaskStatus::Backlog), vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_drop_on_same_spot_is_noop() {
        let mut board = board_with(&["A", "B"], &[]);
        let before = board.clone();

        let moved = board.apply_drag(&drag(
            "B",
            (TaskStatus::Backlog, 1),
            Some((TaskStatus::Backlog, 1)),
        ));

        assert!(!moved);
        assert_eq!(board, before);
    }

    #[test]
    fn test_cancelled_drag_is_noop() {
        let mut board = board_with(&["A"], &[]);
        let before = board.clone();

        assert!(!board.apply_drag(&drag("A", (TaskStatus::Backlog, 0), None)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_stale_source_is_rejected() {
        let mut board = board_with(&["A", "B"], &[]);
        let before = board.clone();

        // Wrong index for the named task
        assert!(!board.apply_drag(&drag("A", (TaskStatus::Backlog, 1), Some((TaskStatus::Done, 0)))));
        // Index out of range
        assert!(!board.apply_drag(&drag("A", (TaskStatus::Backlog, 9), Some((TaskStatus::Done, 0)))));
        assert_eq!(board, before);
    }

    #[test]
    fn test_destination_index_past_end_appends() {
        let mut board = board_with(&["A"], &["D1"]);

        board.apply_drag(&drag("A", (TaskStatus::Backlog, 0), Some((TaskStatus::Done, 40))));
        assert_eq!(ids(&board, TaskStatus::Done), vec!["D1", "A"]);
    }

    #[test]
    fn test_drop_past_end_of_own_column_when_already_last_is_noop() {
        let mut board = board_with(&["A", "B"], &[]);
        let before = board.clone();

        assert!(!board.apply_drag(&drag("B", (TaskStatus::Backlog, 1), Some((TaskStatus::Backlog, 7)))));
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_to_end() {
        let mut board = board_with(&["A", "B"], &["D1"]);

        assert!(board.move_to_end(&TaskId::from("A"), TaskStatus::Done));
        assert_eq!(ids(&board, TaskStatus::Done), vec!["D1", "A"]);
        assert!(!board.move_to_end(&TaskId::from("A"), TaskStatus::Done));
        assert!(!board.move_to_end(&TaskId::from("missing"), TaskStatus::Todo));
    }

    #[test]
    fn test_remove_and_locate() {
        let mut board = board_with(&["A", "B"], &["C"]);

        assert_eq!(
            board.locate(&TaskId::from("C")),
            Some(DragLocation::new(TaskStatus::Done, 0))
        );
        assert!(board.remove(&TaskId::from("A")).is_some());
        assert!(board.remove(&TaskId::from("A")).is_none());
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_from_columns_normalizes() {
        let mut stray = task("X", TaskStatus::Backlog);
        stray.description = Some(String::new());
        let columns = vec![
            Column {
                id: TaskStatus::Done,
                title: "Shipped".to_string(),
                tasks: vec![stray],
            },
            Column::new(TaskStatus::Backlog),
        ];

        let board = Board::from_columns(columns).unwrap();

        assert_eq!(board.columns().len(), 5);
        assert_eq!(board.columns()[0].id, TaskStatus::Backlog);
        assert_eq!(board.column(TaskStatus::Done).title, "Shipped");
        let x = board.get(&TaskId::from("X")).unwrap();
        assert_eq!(x.status, TaskStatus::Done);
        assert!(x.description.is_none());
    }

    #[test]
    fn test_from_columns_rejects_duplicates() {
        let columns = vec![
            Column {
                id: TaskStatus::Backlog,
                title: "Backlog".to_string(),
                tasks: vec![task("A", TaskStatus::Backlog)],
            },
            Column {
                id: TaskStatus::Done,
                title: "Done".to_string(),
                tasks: vec![task("A", TaskStatus::Done)],
            },
        ];
        assert_eq!(
            Board::from_columns(columns),
            Err(BoardDefect::DuplicateTask(TaskId::from("A")))
        );

        let columns = vec![Column::new(TaskStatus::Todo), Column::new(TaskStatus::Todo)];
        assert_eq!(
            Board::from_columns(columns),
            Err(BoardDefect::DuplicateColumn(TaskStatus::Todo))
        );
    }

    #[test]
    fn test_flat_round_trip_keeps_group_order() {
        let flat = vec![
            task("1", TaskStatus::Done),
            task("2", TaskStatus::Backlog),
            task("3", TaskStatus::Done),
            task("4", TaskStatus::Backlog),
        ];

        let board = Board::from_flat(flat).unwrap();

        assert_eq!(ids(&board, TaskStatus::Backlog), vec!["2", "4"]);
        assert_eq!(ids(&board, TaskStatus::Done), vec!["1", "3"]);
        let order: Vec<String> = board
            .to_flat()
            .into_iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(order, vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_status_disagreeing_with_column_is_a_defect() {
        let mut board = board_with(&["A"], &[]);
        assert_eq!(board.validate(), Ok(()));

        board.columns[0].tasks[0].status = TaskStatus::Review;

        assert_eq!(
            board.validate(),
            Err(BoardDefect::StatusMismatch(TaskId::from("A")))
        );
    }

    #[test]
    fn test_blank_title_is_a_defect() {
        let mut blank = task("A", TaskStatus::Backlog);
        blank.title = "  ".to_string();
        assert_eq!(
            Board::from_flat(vec![blank]),
            Err(BoardDefect::BlankTitle(TaskId::from("A")))
        );
    }
}
