//! Id lookups over a board.
//!
//! Every lookup returns the not-found case as an explicit `NoOp` so each
//! operation has to decide what a miss means.

use super::NoOp;
use crate::model::board::Board;

/// Index path of a card inside `Board::lists`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLocation {
    pub list_index: usize,
    pub card_index: usize,
}

/// Finds the card with `card_id` in any list.
pub fn locate_card(board: &Board, card_id: &str) -> Result<CardLocation, NoOp> {
    board
        .lists
        .iter()
        .enumerate()
        .find_map(|(list_index, list)| {
            list.cards
                .iter()
                .position(|card| card.id == card_id)
                .map(|card_index| CardLocation {
                    list_index,
                    card_index,
                })
        })
        .ok_or_else(|| NoOp::CardNotFound(card_id.to_string()))
}

/// Finds the index of the list with `list_id`.
pub fn locate_list(board: &Board, list_id: &str) -> Result<usize, NoOp> {
    board
        .lists
        .iter()
        .position(|list| list.id == list_id)
        .ok_or_else(|| NoOp::ListNotFound(list_id.to_string()))
}
