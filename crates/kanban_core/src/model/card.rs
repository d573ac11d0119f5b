//! Card domain model.
//!
//! # Responsibility
//! - Define the task record held by lists and its nested collections.
//! - Provide small read-only projections (checklist progress, tracked time).
//!
//! # Invariants
//! - `list_id` equals the id of the list currently holding the card.
//! - `labels`, `members` and `dependencies` never hold two entries with the
//!   same id.
//! - `archived` is the source of truth for card removal; cards are not
//!   hard-deleted.

use crate::model::id_set::{IdSet, Keyed};
use crate::model::member::{Label, Member};
use crate::model::new_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Card urgency, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            completed: false,
        }
    }
}

/// Card comment. Comments are kept oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

/// Logged work on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes.
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyType {
    Blocks,
    BlockedBy,
}

/// Relation from the owning card to another card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDependency {
    pub id: String,
    pub depends_on: String,
    #[serde(rename = "type")]
    pub kind: DependencyType,
}

impl Keyed for CardDependency {
    fn key(&self) -> &str {
        &self.id
    }
}

/// A single work item on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: IdSet<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub members: IdSet<Member>,
    pub list_id: String,
    pub position: u32,
    #[serde(default)]
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub time_entries: Vec<TimeEntry>,
    #[serde(default)]
    pub dependencies: IdSet<CardDependency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub priority: Priority,
}

impl Card {
    /// Creates an empty medium-priority card with a generated id.
    pub fn new(
        list_id: impl Into<String>,
        title: impl Into<String>,
        position: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self::with_id(new_id(), list_id, title, position, now)
    }

    /// Creates an empty card with a caller-provided id.
    pub fn with_id(
        id: impl Into<String>,
        list_id: impl Into<String>,
        title: impl Into<String>,
        position: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: Some(String::new()),
            labels: IdSet::new(),
            due_date: None,
            checklist: Vec::new(),
            comments: Vec::new(),
            members: IdSet::new(),
            list_id: list_id.into(),
            position,
            archived: false,
            created_at: now,
            updated_at: now,
            time_entries: Vec::new(),
            dependencies: IdSet::new(),
            estimated_hours: None,
            priority: Priority::Medium,
        }
    }

    /// Returns `(completed, total)` checklist item counts.
    pub fn checklist_progress(&self) -> (usize, usize) {
        let completed = self.checklist.iter().filter(|item| item.completed).count();
        (completed, self.checklist.len())
    }

    /// Sum of all time entry durations, in minutes.
    pub fn tracked_minutes(&self) -> u64 {
        self.time_entries
            .iter()
            .map(|entry| u64::from(entry.duration))
            .sum()
    }

    pub fn is_active(&self) -> bool {
        !self.archived
    }
}
