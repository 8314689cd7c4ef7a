//! Domain model (ids, task, state, filters, events, reputation, errors).

pub mod errors;
pub mod events;
pub mod filters;
pub mod ids;
pub mod reputation;
pub mod state;
pub mod task;

pub use self::errors::{AppError, ChainError, ErrorKind, SearchError, SessionError};
pub use self::events::{ChainEvent, EventCategory, Notification, NotificationKind};
pub use self::filters::{DEFAULT_PAGE_SIZE, SearchFilters, SearchRequest, SortKey, ValueRange};
pub use self::ids::{AccountId, NotificationId, TaskId};
pub use self::reputation::{ReputationLevel, ReputationRules, ScoreChange, UserReputation};
pub use self::state::{TaskPriority, TaskStatus};
pub use self::task::{Balance, Difficulty, Task};
