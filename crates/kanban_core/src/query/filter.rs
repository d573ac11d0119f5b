//! Conjunctive card filter.
//!
//! # Invariants
//! - A card is shown iff it satisfies every active criterion independently.
//! - List order and card order within a list are preserved.
//! - Filtering borrows the board and never changes it.

use crate::model::board::{Board, List};
use crate::model::card::{Card, Priority};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Window used by [`DueDateFilter::DueSoon`].
pub const DUE_SOON_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueDateFilter {
    #[default]
    All,
    /// Due date set and strictly before now.
    Overdue,
    /// Due date set and within `[now, now + 24h]`.
    DueSoon,
    NoDate,
}

impl DueDateFilter {
    pub fn matches(self, due_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match (self, due_date) {
            (Self::All, _) => true,
            (Self::Overdue, Some(due)) => due < now,
            (Self::DueSoon, Some(due)) => {
                due >= now && due <= now + Duration::hours(DUE_SOON_WINDOW_HOURS)
            }
            (Self::NoDate, None) => true,
            (Self::Overdue | Self::DueSoon, None) | (Self::NoDate, Some(_)) => false,
        }
    }
}

/// Active filter selection. The default shows every non-archived card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Member ids; a card needs at least one of them.
    pub members: BTreeSet<String>,
    /// Label ids; a card needs at least one of them.
    pub labels: BTreeSet<String>,
    pub priority: BTreeSet<Priority>,
    pub due_date: DueDateFilter,
    /// Include archived cards.
    pub archived: bool,
    pub search_query: String,
}

impl FilterCriteria {
    /// Whether any criterion differs from the default view.
    pub fn is_active(&self) -> bool {
        !self.search_query.is_empty()
            || !self.members.is_empty()
            || !self.labels.is_empty()
            || !self.priority.is_empty()
            || self.due_date != DueDateFilter::All
            || self.archived
    }
}

/// Returns whether `card` passes every active criterion.
pub fn card_matches(card: &Card, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    matches_search(card, &criteria.search_query)
        && (criteria.members.is_empty() || card.members.intersects(&criteria.members))
        && (criteria.labels.is_empty() || card.labels.intersects(&criteria.labels))
        && (criteria.priority.is_empty() || criteria.priority.contains(&card.priority))
        && criteria.due_date.matches(card.due_date, now)
        && (criteria.archived || !card.archived)
}

fn matches_search(card: &Card, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    card.title.to_lowercase().contains(&needle)
        || card
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(&needle))
}

/// A list together with the cards that passed the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<'a> {
    pub list: &'a List,
    pub cards: Vec<&'a Card>,
}

impl ListView<'_> {
    pub fn card_ids(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.id.as_str()).collect()
    }
}

/// Derives the filtered view of every list on `board`.
pub fn filter_lists<'a>(
    board: &'a Board,
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<ListView<'a>> {
    board
        .lists
        .iter()
        .map(|list| ListView {
            list,
            cards: list
                .cards
                .iter()
                .filter(|card| card_matches(card, criteria, now))
                .collect(),
        })
        .collect()
}
