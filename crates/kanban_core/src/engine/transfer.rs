//! Board import/export as JSON text.
//!
//! # Invariants
//! - `import_board(&export_board(b))` yields a board equal to `b` for every
//!   board that passes `Board::validate`.
//! - A failed import never produces a partial board.

use crate::model::board::{Board, BoardValidationError};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NON_ALPHANUMERIC_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}]+").expect("valid file name regex"));

const EXPORT_FILE_SUFFIX: &str = "_board.json";
const UNTITLED_FILE_STEM: &str = "untitled";

/// Import failure. The caller's state is left as it was.
#[derive(Debug)]
pub enum ImportError {
    /// Payload is not a well-formed serialized board.
    Parse(serde_json::Error),
    /// Payload parsed but breaks board invariants.
    Invalid(BoardValidationError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid board file: {err}"),
            Self::Invalid(err) => write!(f, "inconsistent board file: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<BoardValidationError> for ImportError {
    fn from(value: BoardValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Serializes `board` as pretty-printed JSON.
pub fn export_board(board: &Board) -> String {
    // Board fields are plain structs, sequences and strings; serialization
    // cannot fail.
    let text = serde_json::to_string_pretty(board).expect("board serializes to JSON");
    info!(
        "event=board_export module=engine status=ok lists={} cards={} bytes={}",
        board.lists.len(),
        board.card_count(),
        text.len()
    );
    text
}

/// Parses and validates a board exported by [`export_board`].
///
/// # Errors
/// - `ImportError::Parse` when `text` is not a serialized board.
/// - `ImportError::Invalid` when the board breaks structural invariants.
pub fn import_board(text: &str) -> Result<Board, ImportError> {
    let board: Board = serde_json::from_str(text).map_err(|err| {
        warn!(
            "event=board_import module=engine status=error error_code=parse_failed line={} column={}",
            err.line(),
            err.column()
        );
        ImportError::Parse(err)
    })?;

    if let Err(err) = board.validate() {
        warn!("event=board_import module=engine status=error error_code=invalid_board");
        return Err(err.into());
    }

    info!(
        "event=board_import module=engine status=ok lists={} cards={}",
        board.lists.len(),
        board.card_count()
    );
    Ok(board)
}

/// File name for an exported board.
///
/// Runs of characters that are neither letters nor digits (in any script)
/// collapse to one `_`. Leading and trailing `_` are dropped, and a title
/// with no letters or digits becomes `untitled`.
pub fn export_file_name(title: &str) -> String {
    let collapsed = NON_ALPHANUMERIC_RUN_RE.replace_all(title, "_");
    let stem = collapsed.trim_matches('_');
    let stem = if stem.is_empty() {
        UNTITLED_FILE_STEM
    } else {
        stem
    };
    format!("{stem}{EXPORT_FILE_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::export_file_name;

    #[test]
    fn file_name_collapses_non_alphanumeric_runs() {
        assert_eq!(
            export_file_name("Sprint 12 -- Q3 / Ops"),
            "Sprint_12_Q3_Ops_board.json"
        );
    }

    #[test]
    fn file_name_keeps_non_ascii_letters() {
        assert_eq!(export_file_name("Été 2026"), "Été_2026_board.json");
        assert_eq!(export_file_name("Планы: Q1"), "Планы_Q1_board.json");
    }

    #[test]
    fn file_name_trims_edge_separators() {
        assert_eq!(export_file_name("Plan!"), "Plan_board.json");
        assert_eq!(export_file_name("  (Ops) "), "Ops_board.json");
    }

    #[test]
    fn file_name_falls_back_for_symbol_only_titles() {
        assert_eq!(export_file_name("  !!! "), "untitled_board.json");
    }
}
