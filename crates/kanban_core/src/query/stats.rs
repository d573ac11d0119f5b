//! Board statistics summary.

use crate::model::board::Board;
use chrono::{DateTime, Utc};
use serde::Serialize;

const COMPLETED_LIST_MARKERS: [&str; 2] = ["done", "complete"];

/// Card count of one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCount {
    pub list_id: String,
    pub title: String,
    pub cards: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    /// Every card, archived ones included.
    pub total_cards: usize,
    /// Cards in the first list whose title mentions "done" or "complete".
    pub completed_cards: usize,
    /// Cards with a due date strictly before `now`.
    pub overdue_cards: usize,
    pub tracked_minutes: u64,
    pub member_count: usize,
    /// `completed_cards / total_cards` as a rounded percentage.
    pub completion_rate: u32,
    pub per_list: Vec<ListCount>,
    /// Lists whose non-archived card count exceeds their WIP limit.
    pub over_wip_limit: Vec<String>,
}

impl BoardStats {
    pub fn compute(board: &Board, now: DateTime<Utc>) -> Self {
        let total_cards = board.card_count();
        let completed_cards = board
            .lists
            .iter()
            .find(|list| {
                let title = list.title.to_lowercase();
                COMPLETED_LIST_MARKERS
                    .iter()
                    .any(|marker| title.contains(marker))
            })
            .map_or(0, |list| list.cards.len());
        let overdue_cards = board
            .cards()
            .filter(|card| card.due_date.is_some_and(|due| due < now))
            .count();
        let tracked_minutes = board.cards().map(|card| card.tracked_minutes()).sum();

        Self {
            total_cards,
            completed_cards,
            overdue_cards,
            tracked_minutes,
            member_count: board.members.len(),
            completion_rate: percentage(completed_cards, total_cards),
            per_list: board
                .lists
                .iter()
                .map(|list| ListCount {
                    list_id: list.id.clone(),
                    title: list.title.clone(),
                    cards: list.cards.len(),
                })
                .collect(),
            over_wip_limit: board
                .lists
                .iter()
                .filter(|list| list.is_over_wip_limit())
                .map(|list| list.id.clone())
                .collect(),
        }
    }

    /// Tracked time rounded to whole hours.
    pub fn tracked_hours(&self) -> u64 {
        (self.tracked_minutes + 30) / 60
    }
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (part as f64 / total as f64 * 100.0).round();
    rounded as u32
}
