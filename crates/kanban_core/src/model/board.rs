//! Board and list domain model.
//!
//! # Responsibility
//! - Define the board aggregate: ordered lists, shared members, settings and
//!   the activity log.
//! - Check structural invariants of boards coming from outside the engine.
//!
//! # Invariants
//! - Every `List::board_id` equals the owning `Board::id`.
//! - List `position` values are unique within a board.
//! - Card ids are unique across the whole board and every card's `list_id`
//!   names the list that holds it.
//! - `activity_log` is newest first.

use crate::model::activity::ActivityLogEntry;
use crate::model::card::Card;
use crate::model::id_set::IdSet;
use crate::model::member::Member;
use crate::model::new_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_BACKGROUND: &str = "linear-gradient(135deg, #667eea 0%, #764ba2 100%)";
pub const DEFAULT_LIST_TITLES: [&str; 3] = ["To Do", "In Progress", "Done"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSettings {
    pub allow_comments: bool,
    pub allow_voting: bool,
    pub card_aging: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            allow_comments: true,
            allow_voting: true,
            card_aging: false,
        }
    }
}

/// An ordered column of cards (a workflow stage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
    pub board_id: String,
    pub position: u32,
    #[serde(default)]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<u32>,
}

impl List {
    pub fn new(board_id: impl Into<String>, title: impl Into<String>, position: u32) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            cards: Vec::new(),
            board_id: board_id.into(),
            position,
            archived: false,
            wip_limit: None,
        }
    }

    /// Cards that are not archived, in list order.
    pub fn visible_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| card.is_active())
    }

    /// Whether the non-archived card count exceeds the advisory WIP limit.
    pub fn is_over_wip_limit(&self) -> bool {
        match self.wip_limit {
            Some(limit) if limit > 0 => self.visible_cards().count() > limit as usize,
            _ => false,
        }
    }
}

/// Top-level container of lists and shared reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub background: String,
    #[serde(default)]
    pub lists: Vec<List>,
    #[serde(default)]
    pub members: IdSet<Member>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub activity_log: Vec<ActivityLogEntry>,
    #[serde(default)]
    pub settings: BoardSettings,
}

impl Board {
    /// Creates a board without lists.
    pub fn new(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            description: None,
            background: DEFAULT_BACKGROUND.to_string(),
            lists: Vec::new(),
            members: IdSet::new(),
            created_at: now,
            updated_at: now,
            archived: false,
            activity_log: Vec::new(),
            settings: BoardSettings::default(),
        }
    }

    /// Creates a board with the "To Do" / "In Progress" / "Done" lists.
    pub fn with_default_lists(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        let mut board = Self::new(title, now);
        board.lists = DEFAULT_LIST_TITLES
            .iter()
            .zip(0u32..)
            .map(|(title, position)| List::new(board.id.clone(), *title, position))
            .collect();
        board
    }

    /// Iterates every card of every list in display order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.lists.iter().flat_map(|list| list.cards.iter())
    }

    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|list| list.cards.len()).sum()
    }

    /// Lists sorted by `position`.
    pub fn lists_in_display_order(&self) -> Vec<&List> {
        let mut lists: Vec<&List> = self.lists.iter().collect();
        lists.sort_by_key(|list| list.position);
        lists
    }

    /// Checks the structural invariants of this board.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), BoardValidationError> {
        if self.id.trim().is_empty() {
            return Err(BoardValidationError::EmptyBoardId);
        }

        let mut list_ids = HashSet::new();
        let mut positions = HashSet::new();
        let mut card_ids = HashSet::new();

        for list in &self.lists {
            if !list_ids.insert(list.id.as_str()) {
                return Err(BoardValidationError::DuplicateListId(list.id.clone()));
            }
            if list.board_id != self.id {
                return Err(BoardValidationError::ForeignList {
                    list_id: list.id.clone(),
                    board_id: list.board_id.clone(),
                });
            }
            if !positions.insert(list.position) {
                return Err(BoardValidationError::DuplicateListPosition(list.position));
            }
            for card in &list.cards {
                if !card_ids.insert(card.id.as_str()) {
                    return Err(BoardValidationError::DuplicateCardId(card.id.clone()));
                }
                if card.list_id != list.id {
                    return Err(BoardValidationError::MisplacedCard {
                        card_id: card.id.clone(),
                        list_id: list.id.clone(),
                        claimed_list_id: card.list_id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Structural invariant violation in a board value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardValidationError {
    EmptyBoardId,
    DuplicateListId(String),
    DuplicateListPosition(u32),
    ForeignList {
        list_id: String,
        board_id: String,
    },
    DuplicateCardId(String),
    MisplacedCard {
        card_id: String,
        list_id: String,
        claimed_list_id: String,
    },
}

impl Display for BoardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBoardId => write!(f, "board id must not be empty"),
            Self::DuplicateListId(id) => write!(f, "duplicate list id `{id}`"),
            Self::DuplicateListPosition(position) => {
                write!(f, "duplicate list position {position}")
            }
            Self::ForeignList { list_id, board_id } => write!(
                f,
                "list `{list_id}` references board `{board_id}` instead of its owner"
            ),
            Self::DuplicateCardId(id) => write!(f, "duplicate card id `{id}`"),
            Self::MisplacedCard {
                card_id,
                list_id,
                claimed_list_id,
            } => write!(
                f,
                "card `{card_id}` is held by list `{list_id}` but claims list `{claimed_list_id}`"
            ),
        }
    }
}

impl Error for BoardValidationError {}
