//! Bulk operations over a selection of cards.
//!
//! # Invariants
//! - Ids that match no card are skipped.
//! - `Move` keeps the overall board order of the moved cards.
//! - `Assign`/`Label` are set inserts: applying them twice changes nothing
//!   the second time except `updated_at`.
//! - No activity entry is recorded.

use super::lookup::locate_list;
use super::{finish, MutationContext, NoOp, Outcome};
use crate::model::board::Board;
use crate::model::card::Card;
use crate::model::member::{Label, Member};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One mutation applied uniformly to the selected cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BulkOperation {
    Move {
        #[serde(rename = "cardIds")]
        card_ids: Vec<String>,
        #[serde(rename = "targetListId")]
        target_list_id: String,
    },
    Archive {
        #[serde(rename = "cardIds")]
        card_ids: Vec<String>,
    },
    Assign {
        #[serde(rename = "cardIds")]
        card_ids: Vec<String>,
        #[serde(rename = "targetMember")]
        member: Member,
    },
    Label {
        #[serde(rename = "cardIds")]
        card_ids: Vec<String>,
        #[serde(rename = "targetLabel")]
        label: Label,
    },
}

impl BulkOperation {
    pub fn card_ids(&self) -> &[String] {
        match self {
            Self::Move { card_ids, .. }
            | Self::Archive { card_ids }
            | Self::Assign { card_ids, .. }
            | Self::Label { card_ids, .. } => card_ids,
        }
    }
}

/// Applies `op` to every card whose id is selected.
pub fn bulk_operation(board: &Board, op: &BulkOperation, ctx: &MutationContext) -> Outcome {
    let selected: HashSet<&str> = op.card_ids().iter().map(String::as_str).collect();
    let result = match op {
        BulkOperation::Move { target_list_id, .. } => {
            move_selected(board, &selected, target_list_id, ctx)
        }
        BulkOperation::Archive { .. } => edit_selected(board, &selected, ctx, |card| {
            card.archived = true;
        }),
        BulkOperation::Assign { member, .. } => edit_selected(board, &selected, ctx, |card| {
            card.members.insert(member.clone());
        }),
        BulkOperation::Label { label, .. } => edit_selected(board, &selected, ctx, |card| {
            card.labels.insert(label.clone());
        }),
    };
    finish("bulk_operation", result)
}

fn move_selected(
    board: &Board,
    selected: &HashSet<&str>,
    target_list_id: &str,
    ctx: &MutationContext,
) -> Result<Board, NoOp> {
    let target_index = locate_list(board, target_list_id)?;

    let mut next = board.clone();
    let mut moving = Vec::new();
    for list in &mut next.lists {
        let (taken, kept): (Vec<Card>, Vec<Card>) = std::mem::take(&mut list.cards)
            .into_iter()
            .partition(|card| selected.contains(card.id.as_str()));
        list.cards = kept;
        moving.extend(taken);
    }
    if moving.is_empty() {
        return Err(NoOp::NoMatchingCards);
    }

    let target = &mut next.lists[target_index];
    for mut card in moving {
        card.list_id = target.id.clone();
        card.updated_at = ctx.now;
        target.cards.push(card);
    }
    next.updated_at = ctx.now;
    Ok(next)
}

fn edit_selected<F>(
    board: &Board,
    selected: &HashSet<&str>,
    ctx: &MutationContext,
    mut edit: F,
) -> Result<Board, NoOp>
where
    F: FnMut(&mut Card),
{
    let mut next = board.clone();
    let mut matched = 0usize;
    for card in next
        .lists
        .iter_mut()
        .flat_map(|list| list.cards.iter_mut())
        .filter(|card| selected.contains(card.id.as_str()))
    {
        edit(card);
        card.updated_at = ctx.now;
        matched += 1;
    }
    if matched == 0 {
        return Err(NoOp::NoMatchingCards);
    }
    next.updated_at = ctx.now;
    Ok(next)
}
