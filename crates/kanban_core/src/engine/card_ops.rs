//! Single-card operations.
//!
//! # Invariants
//! - New cards are appended with `position` equal to the target list's card
//!   count at creation time.
//! - `move_card` appends to the target list and never renumbers positions.
//! - Each applied operation logs one activity entry naming the card.

use super::lookup::{locate_card, locate_list};
use super::{finish, non_blank, record, MutationContext, NoOp, Outcome};
use crate::model::activity::{ActivityLogEntry, ActivityType};
use crate::model::board::{Board, BoardSettings};
use crate::model::card::{
    Card, CardDependency, ChecklistItem, Comment, Priority, TimeEntry,
};
use crate::model::id_set::IdSet;
use crate::model::member::{Label, Member};
use crate::model::new_id;
use chrono::{DateTime, Utc};

/// Field-level card update. `None` leaves a field untouched.
///
/// Identity and placement (`id`, `list_id`, `position`, `created_at`) are not
/// patchable; moves go through [`move_card`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub labels: Option<IdSet<Label>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub comments: Option<Vec<Comment>>,
    pub members: Option<IdSet<Member>>,
    pub priority: Option<Priority>,
    pub archived: Option<bool>,
    pub time_entries: Option<Vec<TimeEntry>>,
    pub dependencies: Option<IdSet<CardDependency>>,
    pub estimated_hours: Option<Option<f64>>,
}

impl CardPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    pub fn members(mut self, members: IdSet<Member>) -> Self {
        self.members = Some(members);
        self
    }

    pub fn labels(mut self, labels: IdSet<Label>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn time_entries(mut self, time_entries: Vec<TimeEntry>) -> Self {
        self.time_entries = Some(time_entries);
        self
    }

    fn apply_to(self, card: &mut Card) {
        if let Some(title) = self.title {
            card.title = title;
        }
        if let Some(description) = self.description {
            card.description = description;
        }
        if let Some(labels) = self.labels {
            card.labels = labels;
        }
        if let Some(due_date) = self.due_date {
            card.due_date = due_date;
        }
        if let Some(checklist) = self.checklist {
            card.checklist = checklist;
        }
        if let Some(comments) = self.comments {
            card.comments = comments;
        }
        if let Some(members) = self.members {
            card.members = members;
        }
        if let Some(priority) = self.priority {
            card.priority = priority;
        }
        if let Some(archived) = self.archived {
            card.archived = archived;
        }
        if let Some(time_entries) = self.time_entries {
            card.time_entries = time_entries;
        }
        if let Some(dependencies) = self.dependencies {
            card.dependencies = dependencies;
        }
        if let Some(estimated_hours) = self.estimated_hours {
            card.estimated_hours = estimated_hours;
        }
    }
}

/// Appends a new card titled `title` to the list `list_id`.
pub fn create_card(board: &Board, list_id: &str, title: &str, ctx: &MutationContext) -> Outcome {
    finish("card_create", try_create_card(board, list_id, title, ctx))
}

fn try_create_card(
    board: &Board,
    list_id: &str,
    title: &str,
    ctx: &MutationContext,
) -> Result<Board, NoOp> {
    let list_index = locate_list(board, list_id)?;
    let title = non_blank(title)?;

    let mut next = board.clone();
    let list = &mut next.lists[list_index];
    let position = u32::try_from(list.cards.len()).unwrap_or(u32::MAX);
    let card = Card::new(list.id.clone(), title, position, ctx.now);
    let entry = ActivityLogEntry::new(
        ActivityType::CardCreated,
        format!("Created card \"{title}\""),
        ctx.user.as_str(),
        ctx.now,
    )
    .with_card(card.id.as_str())
    .with_list(list.id.as_str());
    list.cards.push(card);

    record(&mut next, entry, ctx);
    Ok(next)
}

/// Shallow-merges `patch` into the card `card_id`.
pub fn update_card(
    board: &Board,
    card_id: &str,
    patch: CardPatch,
    ctx: &MutationContext,
) -> Outcome {
    let result = edit_card(board, card_id, ctx, |card, _| {
        patch.apply_to(card);
        Ok(updated(card))
    });
    finish("card_update", result)
}

/// Moves `card_id` to the end of `target_list_id`.
pub fn move_card(
    board: &Board,
    card_id: &str,
    target_list_id: &str,
    ctx: &MutationContext,
) -> Outcome {
    finish(
        "card_move",
        try_move_card(board, card_id, target_list_id, ctx),
    )
}

fn try_move_card(
    board: &Board,
    card_id: &str,
    target_list_id: &str,
    ctx: &MutationContext,
) -> Result<Board, NoOp> {
    let source = locate_card(board, card_id)?;
    let target_index = locate_list(board, target_list_id)?;
    if source.list_index == target_index {
        return Err(NoOp::SameList(target_list_id.to_string()));
    }

    let mut next = board.clone();
    let source_list = &mut next.lists[source.list_index];
    let mut card = source_list.cards.remove(source.card_index);
    let source_title = source_list.title.clone();

    let target = &mut next.lists[target_index];
    card.list_id = target.id.clone();
    card.updated_at = ctx.now;
    let entry = ActivityLogEntry::new(
        ActivityType::CardMoved,
        format!(
            "Moved \"{}\" from {} to {}",
            card.title, source_title, target.title
        ),
        ctx.user.as_str(),
        ctx.now,
    )
    .with_card(card_id)
    .with_list(target.id.as_str());
    target.cards.push(card);

    record(&mut next, entry, ctx);
    Ok(next)
}

/// Marks a card archived. The card stays in its list.
pub fn archive_card(board: &Board, card_id: &str, ctx: &MutationContext) -> Outcome {
    let result = edit_card(board, card_id, ctx, |card, _| {
        card.archived = true;
        Ok((
            ActivityType::CardArchived,
            format!("Archived card \"{}\"", card.title),
        ))
    });
    finish("card_archive", result)
}

/// Appends a comment authored by the acting user.
pub fn add_comment(board: &Board, card_id: &str, text: &str, ctx: &MutationContext) -> Outcome {
    let result = edit_card(board, card_id, ctx, |card, settings| {
        if !settings.allow_comments {
            return Err(NoOp::CommentsDisabled);
        }
        let text = non_blank(text)?;
        card.comments.push(Comment {
            id: new_id(),
            text: text.to_string(),
            author: ctx.user.clone(),
            timestamp: ctx.now,
        });
        Ok((
            ActivityType::CommentAdded,
            format!("Commented on \"{}\"", card.title),
        ))
    });
    finish("comment_add", result)
}

pub fn add_checklist_item(
    board: &Board,
    card_id: &str,
    text: &str,
    ctx: &MutationContext,
) -> Outcome {
    let result = edit_card(board, card_id, ctx, |card, _| {
        let text = non_blank(text)?;
        card.checklist.push(ChecklistItem::new(text));
        Ok(updated(card))
    });
    finish("checklist_add", result)
}

/// Flips the `completed` flag of one checklist item.
pub fn toggle_checklist_item(
    board: &Board,
    card_id: &str,
    item_id: &str,
    ctx: &MutationContext,
) -> Outcome {
    let result = edit_card(board, card_id, ctx, |card, _| {
        let item = card
            .checklist
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| NoOp::ChecklistItemNotFound(item_id.to_string()))?;
        item.completed = !item.completed;
        Ok(updated(card))
    });
    finish("checklist_toggle", result)
}

pub fn remove_checklist_item(
    board: &Board,
    card_id: &str,
    item_id: &str,
    ctx: &MutationContext,
) -> Outcome {
    let result = edit_card(board, card_id, ctx, |card, _| {
        let position = card
            .checklist
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| NoOp::ChecklistItemNotFound(item_id.to_string()))?;
        card.checklist.remove(position);
        Ok(updated(card))
    });
    finish("checklist_remove", result)
}

fn updated(card: &Card) -> (ActivityType, String) {
    (
        ActivityType::CardUpdated,
        format!("Updated card \"{}\"", card.title),
    )
}

/// Runs `edit` on a copy of the card, then stamps and logs it.
///
/// `edit` returns the activity kind and description, computed after the
/// change so descriptions show the resulting card.
fn edit_card<F>(
    board: &Board,
    card_id: &str,
    ctx: &MutationContext,
    edit: F,
) -> Result<Board, NoOp>
where
    F: FnOnce(&mut Card, &BoardSettings) -> Result<(ActivityType, String), NoOp>,
{
    let location = locate_card(board, card_id)?;
    let mut next = board.clone();
    let settings = next.settings;

    let list = &mut next.lists[location.list_index];
    let list_id = list.id.clone();
    let card = &mut list.cards[location.card_index];
    let (kind, description) = edit(card, &settings)?;
    card.updated_at = ctx.now;

    let entry = ActivityLogEntry::new(kind, description, ctx.user.as_str(), ctx.now)
        .with_card(card_id)
        .with_list(list_id);
    record(&mut next, entry, ctx);
    Ok(next)
}
