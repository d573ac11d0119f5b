//! Core domain logic for the Kanban board.
//! This crate is the single source of truth for board invariants.

pub mod db;
pub mod drag;
pub mod engine;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

pub use drag::{DragSession, DropIntent};
pub use engine::{
    bulk_operation, create_card, export_board, import_board, move_card, update_card,
    BulkOperation, CardPatch, ImportError, MutationContext, NoOp, Outcome,
};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::activity::{ActivityLogEntry, ActivityType};
pub use model::board::{Board, BoardSettings, BoardValidationError, List};
pub use model::card::{Card, ChecklistItem, Comment, Priority, TimeEntry};
pub use model::id_set::IdSet;
pub use model::member::{Label, Member};
pub use model::template::{builtin_templates, find_template, BoardTemplate};
pub use query::filter::{card_matches, filter_lists, DueDateFilter, FilterCriteria, ListView};
pub use query::stats::BoardStats;
pub use service::workspace_service::{BoardWorkspace, WorkspaceError};
pub use store::{
    KeyValueStore, MemoryKeyValueStore, PersistentStore, SqliteKeyValueStore, StoreError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
