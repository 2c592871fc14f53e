pub mod board;
pub mod ids;
pub mod seed;
pub mod sorting;
pub mod task;

pub use board::{Board, BoardDefect, Column, DragEnd, DragLocation};
pub use ids::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidIds};
pub use seed::seed_board;
pub use sorting::{sort_tasks, SortKey, TaskQuery};
pub use task::{Priority, Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
