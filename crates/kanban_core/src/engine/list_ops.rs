//! List and board-membership operations.

use super::lookup::locate_list;
use super::{finish, non_blank, record, MutationContext, NoOp, Outcome};
use crate::model::activity::{ActivityLogEntry, ActivityType};
use crate::model::board::{Board, List};
use crate::model::member::Member;

/// List fields editable after creation. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPatch {
    pub title: Option<String>,
    pub wip_limit: Option<Option<u32>>,
}

/// Appends a list after the current highest position.
pub fn add_list(board: &Board, title: &str, ctx: &MutationContext) -> Outcome {
    finish("list_create", try_add_list(board, title, ctx))
}

fn try_add_list(board: &Board, title: &str, ctx: &MutationContext) -> Result<Board, NoOp> {
    let title = non_blank(title)?;
    let position = board
        .lists
        .iter()
        .map(|list| list.position)
        .max()
        .map_or(0, |highest| highest.saturating_add(1));

    let mut next = board.clone();
    let list = List::new(next.id.clone(), title, position);
    let entry = list_entry(ActivityType::ListCreated, "Created", &list, ctx);
    next.lists.push(list);
    record(&mut next, entry, ctx);
    Ok(next)
}

pub fn update_list(
    board: &Board,
    list_id: &str,
    patch: ListPatch,
    ctx: &MutationContext,
) -> Outcome {
    let result = edit_list(board, list_id, ctx, |list| {
        if let Some(title) = patch.title.as_deref() {
            list.title = non_blank(title)?.to_string();
        }
        if let Some(wip_limit) = patch.wip_limit {
            list.wip_limit = wip_limit;
        }
        Ok("Updated")
    });
    finish("list_update", result)
}

/// Flags a list archived; its cards are kept.
pub fn archive_list(board: &Board, list_id: &str, ctx: &MutationContext) -> Outcome {
    let result = edit_list(board, list_id, ctx, |list| {
        list.archived = true;
        Ok("Archived")
    });
    finish("list_archive", result)
}

/// Removes a list and every card it holds.
pub fn delete_list(board: &Board, list_id: &str, ctx: &MutationContext) -> Outcome {
    finish("list_delete", try_delete_list(board, list_id, ctx))
}

fn try_delete_list(board: &Board, list_id: &str, ctx: &MutationContext) -> Result<Board, NoOp> {
    let index = locate_list(board, list_id)?;
    let mut next = board.clone();
    let list = next.lists.remove(index);
    let entry = list_entry(ActivityType::ListUpdated, "Deleted", &list, ctx);
    record(&mut next, entry, ctx);
    Ok(next)
}

/// Adds `member` to the board unless a member with the same id exists.
pub fn add_board_member(board: &Board, member: Member, ctx: &MutationContext) -> Outcome {
    let result = if board.members.contains(&member.id) {
        Err(NoOp::MemberExists(member.id))
    } else {
        let mut next = board.clone();
        let entry = ActivityLogEntry::new(
            ActivityType::MemberAdded,
            format!("Added member \"{}\"", member.name),
            ctx.user.as_str(),
            ctx.now,
        );
        next.members.insert(member);
        record(&mut next, entry, ctx);
        Ok(next)
    };
    finish("member_add", result)
}

fn edit_list<F>(
    board: &Board,
    list_id: &str,
    ctx: &MutationContext,
    edit: F,
) -> Result<Board, NoOp>
where
    F: FnOnce(&mut List) -> Result<&'static str, NoOp>,
{
    let index = locate_list(board, list_id)?;
    let mut next = board.clone();
    let list = &mut next.lists[index];
    let verb = edit(list)?;
    let entry = list_entry(ActivityType::ListUpdated, verb, list, ctx);
    record(&mut next, entry, ctx);
    Ok(next)
}

fn list_entry(
    kind: ActivityType,
    verb: &str,
    list: &List,
    ctx: &MutationContext,
) -> ActivityLogEntry {
    ActivityLogEntry::new(
        kind,
        format!("{verb} list \"{}\"", list.title),
        ctx.user.as_str(),
        ctx.now,
    )
    .with_list(list.id.as_str())
}
