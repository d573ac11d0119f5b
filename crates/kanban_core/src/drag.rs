//! Transient drag-and-drop interaction state.
//!
//! # Responsibility
//! - Track which card is being dragged and which list is hovered.
//! - Turn a completed drop into a move intent for the engine.
//!
//! # Invariants
//! - The session never touches a board; only [`DropIntent::apply`] does.
//! - `drop_on` and `cancel` always return the session to idle.
//! - Nested enter/leave pairs keep the hovered target until the outermost
//!   leave.

use crate::engine::{self, MutationContext, Outcome};
use crate::model::board::Board;

/// The card currently held by the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggedCard {
    pub card_id: String,
    pub source_list_id: String,
}

/// Board change requested by a completed drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropIntent {
    MoveCard {
        card_id: String,
        target_list_id: String,
    },
}

impl DropIntent {
    pub fn apply(&self, board: &Board, ctx: &MutationContext) -> Outcome {
        match self {
            Self::MoveCard {
                card_id,
                target_list_id,
            } => engine::move_card(board, card_id, target_list_id, ctx),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    dragged: Option<DraggedCard>,
    hovered: Option<String>,
    enter_depth: u32,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragged(&self) -> Option<&DraggedCard> {
        self.dragged.as_ref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn start(&mut self, card_id: impl Into<String>, source_list_id: impl Into<String>) {
        self.dragged = Some(DraggedCard {
            card_id: card_id.into(),
            source_list_id: source_list_id.into(),
        });
        self.hovered = None;
        self.enter_depth = 0;
    }

    pub fn enter(&mut self, target_id: impl Into<String>) {
        if !self.is_dragging() {
            return;
        }
        self.enter_depth += 1;
        self.hovered = Some(target_id.into());
    }

    pub fn leave(&mut self) {
        self.enter_depth = self.enter_depth.saturating_sub(1);
        if self.enter_depth == 0 {
            self.hovered = None;
        }
    }

    /// Released outside any drop target.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Completes the drag over `target_list_id`.
    ///
    /// Returns `None` when nothing was dragged or the card is dropped back on
    /// its own list.
    pub fn drop_on(&mut self, target_list_id: &str) -> Option<DropIntent> {
        let dragged = self.dragged.take();
        self.cancel();
        let dragged = dragged?;
        if dragged.source_list_id == target_list_id {
            return None;
        }
        Some(DropIntent::MoveCard {
            card_id: dragged.card_id,
            target_list_id: target_list_id.to_string(),
        })
    }
}
