//! The board store: authoritative in-memory board plus its persisted snapshot.
//!
//! Every mutation is applied to memory first and then flushed to storage
//! before the call returns. Nothing here surfaces an error to the caller:
//! rejected input and unknown ids leave the board untouched, and unreadable
//! storage degrades to the seed board.

use crate::{
    config::StoreConfig,
    domain::{
        seed_board, Board, Clock, DragEnd, IdGenerator, SequentialIds, SystemClock, Task,
        TaskDraft, TaskId, TaskPatch, TaskQuery, TaskStatus,
    },
    storage::{snapshot, Storage},
};
use tracing::{debug, info, warn};

/// How many ids to draw before giving up on a generator that keeps colliding
const MAX_ID_ATTEMPTS: usize = 64;

/// Result of a mutation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Nothing changed and nothing was written
    Unchanged,
    /// The board changed; `persisted` is false if the snapshot write failed
    Applied { persisted: bool },
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Result of a successful create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub id: TaskId,
    pub persisted: bool,
}

pub struct BoardStore<S: Storage> {
    storage: S,
    config: StoreConfig,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    board: Board,
}

impl<S: Storage> BoardStore<S> {
    /// Opens a store with sequential ids and the system clock, loading the
    /// persisted board (or installing the seed)
    pub async fn open(storage: S, config: StoreConfig) -> Self {
        let ids = SequentialIds::new(config.id_prefix.clone());
        Self::open_with(storage, config, ids, SystemClock).await
    }

    /// Opens a store with explicit id and date sources
    pub async fn open_with(
        storage: S,
        config: StoreConfig,
        ids: impl IdGenerator + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        let mut store = Self {
            storage,
            config,
            ids: Box::new(ids),
            clock: Box::new(clock),
            board: Board::new(),
        };
        store.load().await;
        store
    }

    /// Reloads the board from storage.
    ///
    /// An absent, unreadable, or corrupt snapshot is replaced by the seed
    /// board, which is written back immediately.
    pub async fn load(&mut self) -> &Board {
        let key = self.config.storage_key.as_str();

        let restored = match self.storage.read(key).await {
            Ok(Some(bytes)) => match snapshot::decode(&bytes, self.clock.today()) {
                Ok(board) => Some(board),
                Err(e) => {
                    warn!(key, error = %e, "Discarding corrupt board snapshot");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "Board storage unreadable");
                None
            }
        };

        match restored {
            Some(board) => {
                debug!(key, tasks = board.len(), "Restored board");
                self.board = board;
                self.observe_ids();
            }
            None => {
                info!(key, "Installing seed board");
                self.board = seed_board();
                self.observe_ids();
                self.persist().await;
            }
        }

        &self.board
    }

    /// Adds a task to the end of the draft's column.
    ///
    /// Returns `None`, leaving the board untouched, when the title is blank.
    pub async fn create(&mut self, mut draft: TaskDraft) -> Option<Created> {
        if !draft.is_valid() {
            debug!("Rejected task draft with empty title");
            return None;
        }
        draft.fill_project(&self.config.default_project);

        let Some(id) = self.fresh_id() else {
            warn!("Id generator kept producing ids already on the board");
            return None;
        };

        let task = Task::from_draft(id.clone(), draft, self.clock.today());
        debug!(id = %id, column = task.status.as_str(), "Created task");
        self.board.push(task);

        let persisted = self.persist().await;
        Some(Created { id, persisted })
    }

    /// Lets the id generator skip past every id on the current board
    fn observe_ids(&mut self) {
        for task in self.board.tasks() {
            self.ids.observe(&task.id);
        }
    }

    fn fresh_id(&mut self) -> Option<TaskId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !self.board.contains(&id) {
                return Some(id);
            }
        }
        None
    }

    /// Moves a task to the end of the column for `status`
    pub async fn change_status(&mut self, id: &TaskId, status: TaskStatus) -> Mutation {
        if !self.board.move_to_end(id, status) {
            return Mutation::Unchanged;
        }
        debug!(id = %id, status = status.as_str(), "Changed task status");
        self.applied().await
    }

    /// Removes a task; unknown ids are ignored
    pub async fn delete(&mut self, id: &TaskId) -> Mutation {
        if self.board.remove(id).is_none() {
            return Mutation::Unchanged;
        }
        debug!(id = %id, "Deleted task");
        self.applied().await
    }

    /// Applies a completed drag gesture.
    ///
    /// Cancelled drags, drops back onto the starting slot, and stale source
    /// locations change nothing and skip the write.
    pub async fn move_task(&mut self, drag: &DragEnd) -> Mutation {
        if !self.board.apply_drag(drag) {
            return Mutation::Unchanged;
        }
        debug!(
            id = %drag.task_id,
            from = drag.source.column.as_str(),
            to = ?drag.destination.map(|d| d.column),
            "Moved task"
        );
        self.applied().await
    }

    /// Edits a task's descriptive fields in place. A patch that would blank
    /// the title is rejected.
    pub async fn update(&mut self, id: &TaskId, patch: TaskPatch) -> Mutation {
        if !patch.is_valid() {
            return Mutation::Unchanged;
        }
        let changed = self
            .board
            .get_mut(id)
            .map(|task| task.apply(patch))
            .unwrap_or(false);
        if !changed {
            return Mutation::Unchanged;
        }
        debug!(id = %id, "Updated task");
        self.applied().await
    }

    /// Clears the persisted slot and goes back to the seed board
    pub async fn reset(&mut self) -> Mutation {
        let key = self.config.storage_key.as_str();
        if let Err(e) = self.storage.remove(key).await {
            warn!(key, error = %e, "Failed to clear board storage");
        }
        info!(key, "Reset board to seed");
        self.board = seed_board();
        self.observe_ids();
        self.applied().await
    }

    /// Read-only filtered and sorted view of all tasks
    pub fn query(&self, query: &TaskQuery) -> Vec<Task> {
        query.run(self.board.tasks())
    }

    /// Distinct project names, in the order they first appear on the board
    pub fn projects(&self) -> Vec<String> {
        let mut projects: Vec<String> = Vec::new();
        for task in self.board.tasks() {
            if !projects.contains(&task.project) {
                projects.push(task.project.clone());
            }
        }
        projects
    }

    /// Number of tasks per column, in workflow order
    pub fn column_counts(&self) -> Vec<(TaskStatus, usize)> {
        self.board.columns().iter().map(|c| (c.id, c.len())).collect()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.board.get(id)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Flat view of every task, column by column
    pub fn tasks(&self) -> Vec<Task> {
        self.board.to_flat()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    async fn applied(&mut self) -> Mutation {
        Mutation::Applied {
            persisted: self.persist().await,
        }
    }

    /// Writes the current board; failures are logged and reported, never raised
    async fn persist(&self) -> bool {
        let key = self.config.storage_key.as_str();
        let result = match snapshot::encode(&self.board) {
            Ok(bytes) => self.storage.write(key, &bytes).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "Failed to persist board");
                false
            }
        }
    }
}
