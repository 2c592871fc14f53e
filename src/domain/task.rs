use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::error::BoardError;

/// Opaque identifier for a task (e.g. `t-1`, `7`, or a uuid)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workflow status of a task. Doubles as the column identifier on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Backlog,
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// All statuses in workflow order
    pub const ALL: [TaskStatus; 5] = [
        Self::Backlog,
        Self::Todo,
        Self::InProgress,
        Self::Review,
        Self::Done,
    ];

    /// Position in the workflow (backlog = 0 ... done = 4)
    pub fn rank(self) -> u8 {
        match self {
            Self::Backlog => 0,
            Self::Todo => 1,
            Self::InProgress => 2,
            Self::Review => 3,
            Self::Done => 4,
        }
    }

    /// Wire identifier, as used in snapshots and drag-end events
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    /// Human-readable column heading
    pub fn label(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| BoardError::InvalidStatus(s.to_string()))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Sort rank, most pressing first (urgent = 0 ... low = 3)
    pub fn rank(self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(BoardError::InvalidPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A task on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub project: String,
    pub created_at: NaiveDate,
    /// Free-form fields carried along for display but never used in board logic
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Task {
    /// Creates a task with the given identity and title; everything else defaulted
    pub fn new(id: TaskId, title: impl Into<String>, created_at: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status: TaskStatus::Backlog,
            priority: Priority::default(),
            project: String::new(),
            created_at,
            extra: BTreeMap::new(),
        }
    }

    /// Builds a task from a validated draft
    pub(crate) fn from_draft(id: TaskId, draft: TaskDraft, created_at: NaiveDate) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            status: draft.column,
            priority: draft.priority,
            project: draft.project,
            created_at,
            extra: BTreeMap::new(),
        }
    }

    /// Applies the non-empty parts of a patch. Returns whether anything changed.
    pub(crate) fn apply(&mut self, patch: TaskPatch) -> bool {
        let mut changed = false;

        if let Some(title) = patch.title {
            if title != self.title {
                self.title = title;
                changed = true;
            }
        }
        if let Some(description) = patch.description {
            if description != self.description {
                self.description = description;
                changed = true;
            }
        }
        if let Some(priority) = patch.priority {
            if priority != self.priority {
                self.priority = priority;
                changed = true;
            }
        }
        if let Some(project) = patch.project {
            if project != self.project {
                self.project = project;
                changed = true;
            }
        }

        changed
    }
}

/// Input of a create: what the add-task form submits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    priority: Priority,
    project: String,
    column: TaskStatus,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            description: None,
            priority: Priority::default(),
            project: String::new(),
            column: TaskStatus::Backlog,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into().trim().to_string();
        self
    }

    pub fn in_column(mut self, column: TaskStatus) -> Self {
        self.column = column;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn column(&self) -> TaskStatus {
        self.column
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// A draft is only acceptable with a title that has visible characters
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty()
    }

    pub(crate) fn fill_project(&mut self, default_project: &str) {
        if self.project.is_empty() {
            self.project = default_project.to_string();
        }
    }
}

/// In-place edit of a task's descriptive fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<Option<String>>,
    priority: Option<Priority>,
    project: Option<String>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into().trim().to_string());
        self
    }

    /// Sets the description; a blank one clears it
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(non_blank(description.into()));
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into().trim().to_string());
        self
    }

    /// Rejects patches that would blank out the title
    pub fn is_valid(&self) -> bool {
        self.title.as_ref().map_or(true, |t| !t.is_empty())
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 15).unwrap()
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(TaskStatus::from_str("backlog").unwrap(), TaskStatus::Backlog);
        assert_eq!(
            TaskStatus::from_str("In-Progress").unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(TaskStatus::from_str(" done ").unwrap(), TaskStatus::Done);
        assert!(TaskStatus::from_str("closed").is_err());
        assert!(TaskStatus::from_str("").is_err());
    }

    #[test]
    fn test_status_rank_follows_workflow() {
        let ranks: Vec<u8> = TaskStatus::ALL.iter().map(|s| s.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(TaskStatus::Todo.to_string(), "To Do");
        assert_eq!(TaskStatus::InProgress.to_string(), "In Progress");
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let status: TaskStatus = serde_json::from_str("\"todo\"").unwrap();
        assert_eq!(status, TaskStatus::Todo);

        assert!(serde_json::from_str::<TaskStatus>("\"blocked\"").is_err());
    }

    #[test]
    fn test_priority_rank() {
        assert!(Priority::Urgent.rank() < Priority::High.rank());
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!(Priority::from_str("URGENT").unwrap(), Priority::Urgent);
        assert_eq!(Priority::from_str("low").unwrap(), Priority::Low);
        assert!(Priority::from_str("critical").is_err());
    }

    #[test]
    fn test_draft_trims_fields() {
        let draft = TaskDraft::new("  Build leads API  ")
            .with_description("   ")
            .with_project(" Solar Funnel ");

        assert_eq!(draft.title(), "Build leads API");
        assert_eq!(draft.description, None);
        assert_eq!(draft.project(), "Solar Funnel");
        assert!(draft.is_valid());
    }

    #[test]
    fn test_whitespace_only_draft_is_invalid() {
        assert!(!TaskDraft::new("   \t\n").is_valid());
        assert!(!TaskDraft::new("").is_valid());
    }

    #[test]
    fn test_patch_applies_changes() {
        let mut task = Task::new(TaskId::from("1"), "Original", day());

        let changed = task.apply(
            TaskPatch::new()
                .title("Updated")
                .priority(Priority::Urgent)
                .description("details"),
        );

        assert!(changed);
        assert_eq!(task.title, "Updated");
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.description.as_deref(), Some("details"));
    }

    #[test]
    fn test_patch_with_same_values_reports_no_change() {
        let mut task = Task::new(TaskId::from("1"), "Same", day());
        assert!(!task.apply(TaskPatch::new().title("Same").priority(Priority::Medium)));
    }

    #[test]
    fn test_blank_title_patch_is_invalid() {
        assert!(!TaskPatch::new().title("  ").is_valid());
        assert!(TaskPatch::new().priority(Priority::Low).is_valid());
    }

    #[test]
    fn test_task_serialization_uses_camel_case() {
        let task = Task::new(TaskId::from("1"), "Set up database", day());
        let json = serde_json::to_string(&task).unwrap();

        assert!(json.contains("\"createdAt\":\"2026-02-15\""));
        assert!(json.contains("\"status\":\"backlog\""));
        // Empty optional fields are omitted
        assert!(!json.contains("description"));
        assert!(!json.contains("extra"));
    }

    #[test]
    fn test_extra_fields_survive_serialization() {
        let mut task = Task::new(TaskId::from("1"), "Call lead", day());
        task.extra.insert("phone".to_string(), "555-0100".to_string());

        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(back.extra.get("phone").map(String::as_str), Some("555-0100"));
    }

    #[test]
    fn test_deserialize_minimal_task() {
        let json = r#"{
            "id": "3",
            "title": "Set up email service",
            "status": "backlog",
            "createdAt": "2026-02-15"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id.as_str(), "3");
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.project.is_empty());
        assert!(task.description.is_none());
    }

    #[test]
    fn test_unknown_priority_is_rejected() {
        let json = r#"{
            "id": "3",
            "title": "x",
            "status": "backlog",
            "priority": "critical",
            "createdAt": "2026-02-15"
        }"#;

        assert!(serde_json::from_str::<Task>(json).is_err());
    }
}
