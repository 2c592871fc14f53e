//! Serialized form of a board as it sits in a storage slot.
//!
//! Writes always produce the versioned envelope. Reads also accept the two
//! older unversioned layouts: a bare array of columns, and a flat array of
//! tasks carrying their own status.

use crate::{
    domain::{Board, BoardDefect, Column, Priority, Task, TaskId, TaskStatus},
    error::{BoardError, Result},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    columns: &'a [Column],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    columns: Vec<Column>,
}

/// Column from the unversioned board. Its tasks were stored as just
/// `{id, title, description, priority}`: status comes from the column.
#[derive(Deserialize)]
struct LegacyColumn {
    id: TaskStatus,
    #[serde(default)]
    title: String,
    #[serde(default)]
    tasks: Vec<LegacyTask>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyTask {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    project: String,
    #[serde(default)]
    created_at: Option<NaiveDate>,
    #[serde(default)]
    extra: BTreeMap<String, String>,
}

impl LegacyColumn {
    fn into_column(self, undated: NaiveDate) -> Column {
        let LegacyColumn { id, title, tasks } = self;
        let tasks = tasks
            .into_iter()
            .map(|t| Task {
                id: t.id,
                title: t.title,
                description: t.description,
                status: id,
                priority: t.priority,
                project: t.project,
                created_at: t.created_at.unwrap_or(undated),
                extra: t.extra,
            })
            .collect();
        Column { id, title, tasks }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnySnapshot {
    Versioned(Envelope),
    Columns(Vec<LegacyColumn>),
    Flat(Vec<Task>),
}

/// Encodes a board as the current snapshot format
pub fn encode(board: &Board) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        version: SNAPSHOT_VERSION,
        columns: board.columns(),
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Decodes any supported snapshot layout into a validated board.
///
/// Legacy column-board tasks stored without a creation date get `undated`.
pub fn decode(bytes: &[u8], undated: NaiveDate) -> Result<Board> {
    let snapshot: AnySnapshot = serde_json::from_slice(bytes)?;

    let board = match snapshot {
        AnySnapshot::Versioned(envelope) => {
            if envelope.version != SNAPSHOT_VERSION {
                return Err(BoardError::UnsupportedVersion(envelope.version));
            }
            Board::from_columns(envelope.columns)
        }
        AnySnapshot::Columns(columns) => Board::from_columns(
            columns
                .into_iter()
                .map(|column| column.into_column(undated))
                .collect(),
        ),
        AnySnapshot::Flat(tasks) => Board::from_flat(tasks),
    };

    board.map_err(defect_error)
}

fn defect_error(defect: BoardDefect) -> BoardError {
    let reason = match defect {
        BoardDefect::DuplicateColumn(column) => format!("column '{}' appears twice", column.as_str()),
        BoardDefect::DuplicateTask(id) => format!("task '{id}' appears more than once"),
        BoardDefect::BlankTitle(id) => format!("task '{id}' has an empty title"),
        BoardDefect::StatusMismatch(id) => format!("task '{id}' is filed under the wrong column"),
    };
    BoardError::CorruptSnapshot(reason)
}
