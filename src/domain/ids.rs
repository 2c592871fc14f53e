use crate::domain::task::TaskId;
use chrono::{Local, NaiveDate};
use uuid::Uuid;

/// Source of fresh task identifiers, injected into the board store
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> TaskId;

    /// Told about every id already on a loaded board, so later ids do not
    /// repeat them
    fn observe(&mut self, _id: &TaskId) {}
}

/// Prefixed, monotonically increasing ids (`t-1`, `t-2`, ...)
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, next: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> TaskId {
        let id = TaskId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }

    fn observe(&mut self, id: &TaskId) {
        let taken = id
            .as_str()
            .strip_prefix(self.prefix.as_str())
            .and_then(|n| n.parse::<u64>().ok());
        if let Some(n) = taken {
            self.next = self.next.max(n.saturating_add(1));
        }
    }
}

/// Random v4 uuids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> TaskId {
        TaskId::new(Uuid::new_v4().to_string())
    }
}

/// Supplies creation dates
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
