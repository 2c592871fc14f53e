//! # Command Center Core
//!
//! Task board state for the command center: a fixed set of workflow columns
//! holding ordered tasks, drag-and-drop reordering, filtered views, and a
//! board snapshot persisted to a key-value slot after every change.
//!
//! The [`BoardStore`] is the entry point. It owns the [`Board`], applies
//! mutations, and writes through a [`Storage`] backend.

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::StoreConfig;
pub use domain::{
    board::{Board, Column, DragEnd, DragLocation},
    sorting::{SortKey, TaskQuery},
    task::{Priority, Task, TaskDraft, TaskId, TaskPatch, TaskStatus},
};
pub use error::{BoardError, Result};
pub use storage::Storage;
pub use store::{BoardStore, Created, Mutation};
