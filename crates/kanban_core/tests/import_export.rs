use chrono::{DateTime, Duration, TimeZone, Utc};
use kanban_core::engine::{export_board, export_file_name, import_board, ImportError};
use kanban_core::{Board, BoardValidationError, Card, Label, Member, Priority, TimeEntry};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

fn rich_board() -> Board {
    let mut board = Board::with_default_lists("Release 2.0", now());
    board.members.insert(Member::new("alice", "Alice Smith"));
    let list_id = board.lists[1].id.clone();

    let mut card = Card::new(list_id, "Ship installer", 0, now());
    card.labels.insert(Label::new("feature", "Feature", "#4ECDC4"));
    card.members.insert(Member::new("alice", "Alice Smith"));
    card.due_date = Some(now() + Duration::days(1));
    card.priority = Priority::Urgent;
    card.estimated_hours = Some(2.5);
    card.time_entries.push(TimeEntry {
        id: "t1".to_string(),
        start_time: now(),
        end_time: None,
        duration: 45,
        description: Some("packaging".to_string()),
    });
    board.lists[1].cards.push(card);
    board
}

#[test]
fn export_then_import_round_trips() {
    let board = rich_board();
    let text = export_board(&board);
    let restored = import_board(&text).unwrap();
    assert_eq!(restored, board);
}

#[test]
fn export_uses_camel_case_wire_names() {
    let text = export_board(&rich_board());
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert!(value.get("createdAt").is_some());
    assert!(value.get("activityLog").is_some());
    assert_eq!(value["settings"]["allowComments"], true);
    let list = &value["lists"][1];
    assert!(list.get("boardId").is_some());
    let card = &list["cards"][0];
    assert_eq!(card["priority"], "urgent");
    assert_eq!(card["timeEntries"][0]["duration"], 45);
    assert_eq!(card["estimatedHours"], 2.5);
    assert!(card.get("listId").is_some());
}

#[test]
fn malformed_text_is_a_parse_error() {
    let err = import_board("{ not json").unwrap_err();
    assert!(matches!(err, ImportError::Parse(_)));

    let err = import_board(r#"{"id":"b1"}"#).unwrap_err();
    assert!(matches!(err, ImportError::Parse(_)));
}

#[test]
fn misplaced_card_is_rejected() {
    let mut board = rich_board();
    board.lists[1].cards[0].list_id = board.lists[0].id.clone();
    let err = import_board(&export_board(&board)).unwrap_err();
    match err {
        ImportError::Invalid(BoardValidationError::MisplacedCard { card_id, .. }) => {
            assert_eq!(card_id, board.lists[1].cards[0].id);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_card_ids_are_rejected() {
    let mut board = rich_board();
    let mut copy = board.lists[1].cards[0].clone();
    copy.position = 1;
    board.lists[1].cards.push(copy);
    let err = import_board(&export_board(&board)).unwrap_err();
    assert!(matches!(
        err,
        ImportError::Invalid(BoardValidationError::DuplicateCardId(_))
    ));
}

#[test]
fn imports_browser_style_document_with_missing_optionals() {
    let text = r##"{
        "id": "b-7",
        "title": "Imported",
        "background": "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        "createdAt": "2026-01-05T10:00:00.000Z",
        "updatedAt": "2026-01-06T11:30:00.000Z",
        "lists": [
            {
                "id": "l-1",
                "title": "To Do",
                "boardId": "b-7",
                "position": 0,
                "cards": [
                    {
                        "id": "c-1",
                        "title": "Call venue",
                        "listId": "l-1",
                        "position": 0,
                        "createdAt": "2026-01-05T10:00:00.000Z",
                        "updatedAt": "2026-01-05T10:00:00.000Z",
                        "labels": [
                            {"id": "venue", "name": "Venue", "color": "#FF6B6B"},
                            {"id": "venue", "name": "Venue", "color": "#FF6B6B"}
                        ]
                    }
                ]
            }
        ]
    }"##;

    let board = import_board(text).unwrap();

    assert!(board.settings.allow_comments);
    assert!(board.activity_log.is_empty());
    assert!(board.members.is_empty());
    let card = &board.lists[0].cards[0];
    assert_eq!(card.priority, Priority::Medium);
    assert_eq!(card.labels.len(), 1);
    assert!(card.description.is_none());
    assert_eq!(
        card.created_at,
        Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap()
    );
}

#[test]
fn export_file_name_follows_board_title() {
    assert_eq!(export_file_name("Release 2.0"), "Release_2_0_board.json");
    assert_eq!(export_file_name("Roadmap"), "Roadmap_board.json");
    assert_eq!(export_file_name("Café Roadmap"), "Café_Roadmap_board.json");
}
