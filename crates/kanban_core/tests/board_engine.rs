use chrono::{DateTime, Duration, TimeZone, Utc};
use kanban_core::engine::{
    add_board_member, add_checklist_item, add_comment, add_list, archive_card, archive_list,
    create_card, delete_list, move_card, toggle_checklist_item, update_card, update_list,
    CardPatch, ListPatch, MutationContext, NoOp, Outcome,
};
use kanban_core::{ActivityType, Board, Card, DragSession, List, Member, Priority};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

fn ctx() -> MutationContext {
    MutationContext::at("Current User", now())
}

fn later() -> MutationContext {
    MutationContext::at("Current User", now() + Duration::minutes(5))
}

fn list(board: &Board, id: &str, title: &str, position: u32) -> List {
    let mut list = List::new(board.id.clone(), title, position);
    list.id = id.to_string();
    list
}

/// Board with lists "To Do" (`todo`) and "Done" (`done`); card `1` in "To Do".
fn sample_board() -> Board {
    let mut board = Board::new("Sprint", now());
    board.id = "board-1".to_string();
    let mut todo = list(&board, "todo", "To Do", 0);
    todo.cards.push(Card::with_id("1", "todo", "Task", 0, now()));
    let done = list(&board, "done", "Done", 1);
    board.lists = vec![todo, done];
    board
}

fn applied(outcome: Outcome) -> Board {
    match outcome {
        Outcome::Applied(board) => board,
        Outcome::Unchanged(reason) => panic!("expected applied outcome, got no-op: {reason}"),
    }
}

#[test]
fn move_card_between_lists_logs_card_moved() {
    let board = sample_board();

    let moved = applied(move_card(&board, "1", "done", &later()));

    assert!(moved.lists[0].cards.is_empty());
    assert_eq!(moved.lists[1].cards.len(), 1);
    let card = &moved.lists[1].cards[0];
    assert_eq!(card.id, "1");
    assert_eq!(card.list_id, "done");
    assert_eq!(card.updated_at, later().now);

    assert_eq!(moved.activity_log.len(), 1);
    let entry = &moved.activity_log[0];
    assert_eq!(entry.kind, ActivityType::CardMoved);
    assert_eq!(entry.description, "Moved \"Task\" from To Do to Done");
    assert_eq!(entry.card_id.as_deref(), Some("1"));
    assert_eq!(entry.list_id.as_deref(), Some("done"));
}

#[test]
fn move_card_to_same_list_is_noop() {
    let board = sample_board();
    let outcome = move_card(&board, "1", "todo", &ctx());
    assert_eq!(outcome.no_op(), Some(&NoOp::SameList("todo".to_string())));
    assert_eq!(outcome.into_board(&board), board);
}

#[test]
fn missing_ids_leave_board_unchanged() {
    let board = sample_board();

    let outcomes = [
        move_card(&board, "ghost", "done", &ctx()),
        move_card(&board, "1", "ghost-list", &ctx()),
        update_card(&board, "ghost", CardPatch::default().title("x"), &ctx()),
        archive_card(&board, "ghost", &ctx()),
        create_card(&board, "missing-list", "X", &ctx()),
    ];

    for outcome in outcomes {
        assert!(!outcome.is_applied());
        assert_eq!(outcome.into_board(&board), board);
    }
}

#[test]
fn create_card_on_missing_list_does_not_log() {
    let board = sample_board();
    let outcome = create_card(&board, "missing-list", "X", &ctx());
    assert_eq!(
        outcome.no_op(),
        Some(&NoOp::ListNotFound("missing-list".to_string()))
    );
    assert!(outcome.into_board(&board).activity_log.is_empty());
}

#[test]
fn create_card_appends_with_next_position_and_defaults() {
    let board = sample_board();

    let next = applied(create_card(&board, "todo", "  Write docs ", &ctx()));

    let cards = &next.lists[0].cards;
    assert_eq!(cards.len(), 2);
    let card = &cards[1];
    assert_eq!(card.title, "Write docs");
    assert_eq!(card.position, 1);
    assert_eq!(card.list_id, "todo");
    assert_eq!(card.priority, Priority::Medium);
    assert!(card.labels.is_empty());
    assert!(card.members.is_empty());
    assert!(card.checklist.is_empty());
    assert!(!card.archived);

    let entry = &next.activity_log[0];
    assert_eq!(entry.kind, ActivityType::CardCreated);
    assert_eq!(entry.description, "Created card \"Write docs\"");
    assert_eq!(entry.card_id.as_deref(), Some(card.id.as_str()));
    assert_eq!(entry.list_id.as_deref(), Some("todo"));
    assert_eq!(entry.user, "Current User");
    assert_eq!(next.updated_at, now());
}

#[test]
fn create_card_rejects_blank_title() {
    let board = sample_board();
    let outcome = create_card(&board, "todo", "   ", &ctx());
    assert_eq!(outcome.no_op(), Some(&NoOp::EmptyText));
}

#[test]
fn engine_never_mutates_its_input() {
    let board = sample_board();
    let snapshot = board.clone();

    let _ = create_card(&board, "todo", "Another", &ctx());
    let _ = move_card(&board, "1", "done", &ctx());
    let _ = update_card(&board, "1", CardPatch::default().priority(Priority::High), &ctx());

    assert_eq!(board, snapshot);
}

#[test]
fn update_card_merges_fields_and_logs_new_title() {
    let board = sample_board();
    let due = now() + Duration::days(2);

    let next = applied(update_card(
        &board,
        "1",
        CardPatch::default()
            .title("Task v2")
            .priority(Priority::Urgent)
            .due_date(Some(due)),
        &later(),
    ));

    let card = &next.lists[0].cards[0];
    assert_eq!(card.title, "Task v2");
    assert_eq!(card.priority, Priority::Urgent);
    assert_eq!(card.due_date, Some(due));
    assert_eq!(card.description.as_deref(), Some(""));
    assert_eq!(card.created_at, now());
    assert_eq!(card.updated_at, later().now);

    let entry = &next.activity_log[0];
    assert_eq!(entry.kind, ActivityType::CardUpdated);
    assert_eq!(entry.description, "Updated card \"Task v2\"");
}

#[test]
fn move_card_keeps_trailing_positions() {
    let mut board = sample_board();
    board.lists[1]
        .cards
        .push(Card::with_id("2", "done", "Shipped", 0, now()));
    board.lists[1]
        .cards
        .push(Card::with_id("3", "done", "Released", 1, now()));

    let next = applied(move_card(&board, "2", "todo", &ctx()));

    let todo_ids: Vec<&str> = next.lists[0].cards.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(todo_ids, vec!["1", "2"]);
    // Positions are carried over, not renumbered.
    assert_eq!(next.lists[0].cards[1].position, 0);
    assert_eq!(next.lists[1].cards[0].position, 1);
}

#[test]
fn archive_card_keeps_card_in_list() {
    let board = sample_board();
    let next = applied(archive_card(&board, "1", &ctx()));
    assert_eq!(next.lists[0].cards.len(), 1);
    assert!(next.lists[0].cards[0].archived);
    assert_eq!(next.activity_log[0].kind, ActivityType::CardArchived);
}

#[test]
fn add_comment_respects_board_setting() {
    let board = sample_board();
    let next = applied(add_comment(&board, "1", "Looks good", &ctx()));
    let comment = &next.lists[0].cards[0].comments[0];
    assert_eq!(comment.text, "Looks good");
    assert_eq!(comment.author, "Current User");
    assert_eq!(next.activity_log[0].kind, ActivityType::CommentAdded);

    let mut locked = sample_board();
    locked.settings.allow_comments = false;
    let outcome = add_comment(&locked, "1", "Looks good", &ctx());
    assert_eq!(outcome.no_op(), Some(&NoOp::CommentsDisabled));
}

#[test]
fn checklist_items_can_be_added_and_toggled() {
    let board = sample_board();
    let with_item = applied(add_checklist_item(&board, "1", "Write tests", &ctx()));
    let item_id = with_item.lists[0].cards[0].checklist[0].id.clone();

    let toggled = applied(toggle_checklist_item(&with_item, "1", &item_id, &ctx()));
    assert_eq!(toggled.lists[0].cards[0].checklist_progress(), (1, 1));
    assert_eq!(toggled.activity_log.len(), 2);

    let missing = toggle_checklist_item(&toggled, "1", "no-such-item", &ctx());
    assert_eq!(
        missing.no_op(),
        Some(&NoOp::ChecklistItemNotFound("no-such-item".to_string()))
    );
}

#[test]
fn add_list_uses_next_position_and_back_reference() {
    let board = sample_board();
    let next = applied(add_list(&board, "Review", &ctx()));
    let created = next.lists.last().unwrap();
    assert_eq!(created.title, "Review");
    assert_eq!(created.position, 2);
    assert_eq!(created.board_id, "board-1");
    assert_eq!(next.activity_log[0].kind, ActivityType::ListCreated);
    assert!(next.validate().is_ok());
}

#[test]
fn update_archive_and_delete_list() {
    let board = sample_board();

    let limited = applied(update_list(
        &board,
        "todo",
        ListPatch {
            title: Some("Backlog".to_string()),
            wip_limit: Some(Some(3)),
        },
        &ctx(),
    ));
    assert_eq!(limited.lists[0].title, "Backlog");
    assert_eq!(limited.lists[0].wip_limit, Some(3));
    assert_eq!(limited.activity_log[0].kind, ActivityType::ListUpdated);

    let archived = applied(archive_list(&limited, "done", &ctx()));
    assert!(archived.lists[1].archived);

    let deleted = applied(delete_list(&archived, "todo", &ctx()));
    assert_eq!(deleted.lists.len(), 1);
    assert!(deleted.cards().all(|card| card.id != "1"));
    assert_eq!(deleted.activity_log.len(), 3);
}

#[test]
fn add_board_member_is_set_insert() {
    let board = sample_board();
    let alice = Member::new("m1", "Alice Smith");

    let next = applied(add_board_member(&board, alice.clone(), &ctx()));
    assert_eq!(next.members.len(), 1);
    assert_eq!(next.activity_log[0].kind, ActivityType::MemberAdded);

    let again = add_board_member(&next, alice, &ctx());
    assert_eq!(again.no_op(), Some(&NoOp::MemberExists("m1".to_string())));
}

#[test]
fn drag_and_drop_moves_card_through_engine() {
    let board = sample_board();
    let mut session = DragSession::new();
    session.start("1", "todo");
    session.enter("done");

    let intent = session.drop_on("done").unwrap();
    let moved = applied(intent.apply(&board, &ctx()));

    assert_eq!(moved.lists[1].cards[0].id, "1");
    assert_eq!(moved.activity_log[0].kind, ActivityType::CardMoved);
    assert!(!session.is_dragging());
}
