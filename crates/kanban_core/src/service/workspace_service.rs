//! Multi-board workspace service.
//!
//! # Responsibility
//! - Hold every board plus the current selection and persist both after each
//!   change.
//! - Create boards (blank or from templates), select, archive and import them.
//! - Run engine operations against the current board.
//!
//! # Invariants
//! - The workspace always holds at least one board.
//! - The board list and the current id are two independent slots written one
//!   after the other; there is no cross-slot atomicity.
//! - An unknown stored current id falls back to the first board.

use crate::engine::{self, ImportError, MutationContext, NoOp, Outcome};
use crate::model::board::{Board, List};
use crate::model::member::Member;
use crate::model::new_id;
use crate::model::template::BoardTemplate;
use crate::store::{KeyValueStore, PersistentStore};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot holding the serialized board list.
pub const BOARDS_KEY: &str = "kanban-boards";
/// Slot holding the selected board id.
pub const CURRENT_BOARD_KEY: &str = "current-board-id";

const SEED_BOARD_TITLE: &str = "My Board";
const BLANK_BOARD_TITLE: &str = "New Board";
const BLANK_BOARD_DESCRIPTION: &str = "A new Kanban board";

#[derive(Debug)]
pub enum WorkspaceError {
    BoardNotFound(String),
    Import(ImportError),
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoardNotFound(id) => write!(f, "board not found: {id}"),
            Self::Import(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::BoardNotFound(_) => None,
            Self::Import(err) => Some(err),
        }
    }
}

impl From<ImportError> for WorkspaceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

/// All boards of one local store.
pub struct BoardWorkspace<S: KeyValueStore> {
    store: PersistentStore<S>,
    boards: Vec<Board>,
    current_board_id: String,
}

impl<S: KeyValueStore> BoardWorkspace<S> {
    /// Rehydrates the workspace from `backend`.
    ///
    /// An empty or unreadable store is seeded with one board holding the
    /// default lists and the acting user as its member, which is persisted
    /// immediately.
    pub fn load(backend: S, ctx: &MutationContext) -> Self {
        let store = PersistentStore::new(backend);
        let mut boards: Vec<Board> = store.load(BOARDS_KEY, Vec::new());
        let seeded = boards.is_empty();
        if seeded {
            let mut board = Board::with_default_lists(SEED_BOARD_TITLE, ctx.now);
            board.members.insert(creator(ctx));
            boards.push(board);
        }

        let first_id = boards[0].id.clone();
        let current_board_id = store.load(CURRENT_BOARD_KEY, first_id);
        let workspace = Self {
            store,
            boards,
            current_board_id,
        };
        if seeded {
            workspace.persist();
        }

        info!(
            "event=workspace_load module=service status=ok boards={} seeded={}",
            workspace.boards.len(),
            seeded
        );
        workspace
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn active_boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.iter().filter(|board| !board.archived)
    }

    pub fn archived_boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.iter().filter(|board| board.archived)
    }

    /// The selected board, or the first board when the selection is stale.
    pub fn current_board(&self) -> &Board {
        self.boards
            .iter()
            .find(|board| board.id == self.current_board_id)
            .unwrap_or(&self.boards[0])
    }

    pub fn select_board(&mut self, board_id: &str) -> Result<&Board, WorkspaceError> {
        let index = self.index_of(board_id)?;
        self.current_board_id = board_id.to_string();
        self.store.save(CURRENT_BOARD_KEY, &self.current_board_id);
        Ok(&self.boards[index])
    }

    /// Creates and selects a board, from `template` when given.
    ///
    /// The acting user becomes the board's first member.
    pub fn create_board(
        &mut self,
        template: Option<&BoardTemplate>,
        ctx: &MutationContext,
    ) -> &Board {
        let mut board = match template {
            Some(template) => board_from_template(template, ctx),
            None => {
                let mut board = Board::with_default_lists(BLANK_BOARD_TITLE, ctx.now);
                board.description = Some(BLANK_BOARD_DESCRIPTION.to_string());
                board
            }
        };
        board.members.insert(creator(ctx));
        info!(
            "event=board_create module=service status=ok template={} lists={}",
            template.map_or("blank", |template| template.id.as_str()),
            board.lists.len()
        );

        self.current_board_id = board.id.clone();
        self.boards.push(board);
        self.persist();
        self.current_board()
    }

    /// Replaces the stored board with the same id.
    pub fn update_board(&mut self, board: Board) -> Result<(), WorkspaceError> {
        let index = self.index_of(&board.id)?;
        self.boards[index] = board;
        self.persist();
        Ok(())
    }

    /// Applies an engine operation to the current board.
    ///
    /// The workspace is persisted only when the operation applied.
    pub fn apply<F>(&mut self, operation: F) -> Result<&Board, NoOp>
    where
        F: FnOnce(&Board) -> Outcome,
    {
        match operation(self.current_board()) {
            Outcome::Applied(board) => {
                let id = board.id.clone();
                let index = self
                    .boards
                    .iter()
                    .position(|candidate| candidate.id == id)
                    .unwrap_or(0);
                self.boards[index] = board;
                self.persist();
                Ok(&self.boards[index])
            }
            Outcome::Unchanged(reason) => Err(reason),
        }
    }

    /// Imports a serialized board and selects it.
    ///
    /// A board with the same id is replaced; otherwise the import is added.
    ///
    /// # Errors
    /// Returns `WorkspaceError::Import` and leaves the workspace untouched
    /// when `text` is malformed or inconsistent.
    pub fn import_board(&mut self, text: &str) -> Result<&Board, WorkspaceError> {
        let board = engine::import_board(text)?;
        let id = board.id.clone();
        let index = match self.boards.iter().position(|existing| existing.id == id) {
            Some(index) => {
                self.boards[index] = board;
                index
            }
            None => {
                self.boards.push(board);
                self.boards.len() - 1
            }
        };
        self.current_board_id = id;
        self.persist();
        Ok(&self.boards[index])
    }

    /// Returns `(file_name, json)` for the current board.
    pub fn export_current(&self) -> (String, String) {
        let board = self.current_board();
        (
            engine::export_file_name(&board.title),
            engine::export_board(board),
        )
    }

    pub fn archive_board(
        &mut self,
        board_id: &str,
        ctx: &MutationContext,
    ) -> Result<(), WorkspaceError> {
        self.set_archived(board_id, true, ctx)
    }

    pub fn restore_board(
        &mut self,
        board_id: &str,
        ctx: &MutationContext,
    ) -> Result<(), WorkspaceError> {
        self.set_archived(board_id, false, ctx)
    }

    fn set_archived(
        &mut self,
        board_id: &str,
        archived: bool,
        ctx: &MutationContext,
    ) -> Result<(), WorkspaceError> {
        let index = self.index_of(board_id)?;
        let board = &mut self.boards[index];
        board.archived = archived;
        board.updated_at = ctx.now;
        self.persist();
        Ok(())
    }

    fn index_of(&self, board_id: &str) -> Result<usize, WorkspaceError> {
        self.boards
            .iter()
            .position(|board| board.id == board_id)
            .ok_or_else(|| WorkspaceError::BoardNotFound(board_id.to_string()))
    }

    fn persist(&self) {
        self.store.save(BOARDS_KEY, &self.boards);
        self.store.save(CURRENT_BOARD_KEY, &self.current_board_id);
    }
}

/// The acting user as the first member of a new board.
fn creator(ctx: &MutationContext) -> Member {
    Member::new(new_id(), ctx.user.as_str())
}

fn board_from_template(template: &BoardTemplate, ctx: &MutationContext) -> Board {
    let mut board = Board::new(format!("{} Board", template.name), ctx.now);
    board.description = Some(template.description.clone());
    board.lists = template
        .lists
        .iter()
        .map(|blueprint| {
            let mut list = List::new(board.id.clone(), blueprint.title.as_str(), blueprint.position);
            list.wip_limit = blueprint.wip_limit;
            list
        })
        .collect();
    board
}
