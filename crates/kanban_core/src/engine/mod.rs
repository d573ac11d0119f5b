//! Board mutation engine.
//!
//! # Responsibility
//! - Turn one intent (create card, move card, bulk operation, ...) plus the
//!   current board into a new board value.
//! - Record single-entity changes in the board activity log.
//!
//! # Invariants
//! - Operations never mutate their input board and never perform I/O.
//! - A missing id, or an intent that would change nothing, yields
//!   `Outcome::Unchanged` with the reason; it is never an error or panic.
//! - Applied single-entity operations prepend exactly one activity entry and
//!   refresh `Board::updated_at`. Bulk operations append no entry.

mod bulk;
mod card_ops;
mod list_ops;
mod lookup;
mod transfer;

pub use bulk::{bulk_operation, BulkOperation};
pub use card_ops::{
    add_checklist_item, add_comment, archive_card, create_card, move_card, remove_checklist_item,
    toggle_checklist_item, update_card, CardPatch,
};
pub use list_ops::{add_board_member, add_list, archive_list, delete_list, update_list, ListPatch};
pub use lookup::{locate_card, locate_list, CardLocation};
pub use transfer::{export_board, export_file_name, import_board, ImportError};

use crate::model::activity::ActivityLogEntry;
use crate::model::board::Board;
use chrono::{DateTime, Utc};
use log::debug;
use std::fmt::{Display, Formatter};

/// Acting user recorded when the caller does not name one.
pub const DEFAULT_USER: &str = "Current User";

/// Who performs a mutation and when.
///
/// Passing the clock reading in keeps engine functions deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationContext {
    pub user: String,
    pub now: DateTime<Utc>,
}

impl MutationContext {
    /// Context for `user` at the current wall-clock time.
    pub fn new(user: impl Into<String>) -> Self {
        Self::at(user, Utc::now())
    }

    pub fn at(user: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user: user.into(),
            now,
        }
    }
}

impl Default for MutationContext {
    fn default() -> Self {
        Self::new(DEFAULT_USER)
    }
}

/// Why an intent left the board unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoOp {
    ListNotFound(String),
    CardNotFound(String),
    ChecklistItemNotFound(String),
    /// Card is already in the requested list.
    SameList(String),
    /// A bulk operation matched none of its card ids.
    NoMatchingCards,
    MemberExists(String),
    CommentsDisabled,
    EmptyText,
}

impl Display for NoOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::CardNotFound(id) => write!(f, "card not found: {id}"),
            Self::ChecklistItemNotFound(id) => write!(f, "checklist item not found: {id}"),
            Self::SameList(id) => write!(f, "card already in list {id}"),
            Self::NoMatchingCards => write!(f, "no matching cards"),
            Self::MemberExists(id) => write!(f, "member already on board: {id}"),
            Self::CommentsDisabled => write!(f, "comments are disabled on this board"),
            Self::EmptyText => write!(f, "text must not be blank"),
        }
    }
}

/// Result of applying one intent to a board.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied(Board),
    Unchanged(NoOp),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Returns the new board when the intent was applied.
    pub fn applied(self) -> Option<Board> {
        match self {
            Self::Applied(board) => Some(board),
            Self::Unchanged(_) => None,
        }
    }

    pub fn no_op(&self) -> Option<&NoOp> {
        match self {
            Self::Applied(_) => None,
            Self::Unchanged(reason) => Some(reason),
        }
    }

    /// Returns the board to keep: the new value, or a copy of `current`.
    pub fn into_board(self, current: &Board) -> Board {
        match self {
            Self::Applied(board) => board,
            Self::Unchanged(_) => current.clone(),
        }
    }
}

/// Logs and wraps an internal operation result.
fn finish(event: &'static str, result: Result<Board, NoOp>) -> Outcome {
    match result {
        Ok(board) => {
            debug!(
                "event={} module=engine status=ok board_id={}",
                event, board.id
            );
            Outcome::Applied(board)
        }
        Err(reason) => {
            debug!(
                "event={} module=engine status=skip reason={}",
                event, reason
            );
            Outcome::Unchanged(reason)
        }
    }
}

/// Prepends `entry` to the activity log and stamps the board.
fn record(board: &mut Board, entry: ActivityLogEntry, ctx: &MutationContext) {
    board.activity_log.insert(0, entry);
    board.updated_at = ctx.now;
}

/// Trims `text`, rejecting blank input.
fn non_blank(text: &str) -> Result<&str, NoOp> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(NoOp::EmptyText);
    }
    Ok(trimmed)
}
