use chrono::{DateTime, Duration, TimeZone, Utc};
use kanban_core::{
    card_matches, filter_lists, Board, BoardStats, Card, DueDateFilter, FilterCriteria, Label,
    List, Member, Priority, TimeEntry,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

fn card(id: &str, list_id: &str, title: &str) -> Card {
    Card::with_id(id, list_id, title, 0, now())
}

/// "To Do" holds a spread of cards covering every filter dimension; "Done"
/// holds one finished card.
fn filter_board() -> Board {
    let mut board = Board::new("Filters", now());
    let mut todo = List::new(board.id.clone(), "To Do", 0);
    todo.id = "todo".to_string();
    let mut done = List::new(board.id.clone(), "Done", 1);
    done.id = "done".to_string();

    let mut login = card("login", "todo", "Fix login bug");
    login.priority = Priority::High;
    login.labels.insert(Label::new("bug", "Bug", "#FF6B6B"));
    login.members.insert(Member::new("alice", "Alice Smith"));
    login.due_date = Some(now() - Duration::hours(3));

    let mut docs = card("docs", "todo", "Write docs");
    docs.description = Some("Explain the LOGIN flow".to_string());
    docs.priority = Priority::Low;
    docs.labels.insert(Label::new("docs", "Docs", "#4ECDC4"));
    docs.due_date = Some(now() + Duration::hours(12));

    let mut deploy = card("deploy", "todo", "Deploy");
    deploy.priority = Priority::Urgent;
    deploy.members.insert(Member::new("bob", "Bob Lee"));
    deploy.due_date = Some(now() + Duration::days(3));

    let mut stale = card("stale", "todo", "Old login spike");
    stale.archived = true;

    todo.cards = vec![login, docs, deploy, stale];
    done.cards = vec![card("shipped", "done", "Shipped feature")];
    board.lists = vec![todo, done];
    board
}

fn visible_ids(board: &Board, criteria: &FilterCriteria) -> Vec<Vec<String>> {
    filter_lists(board, criteria, now())
        .iter()
        .map(|view| view.card_ids().into_iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn default_criteria_hide_only_archived_cards() {
    let board = filter_board();
    let criteria = FilterCriteria::default();
    assert_eq!(
        visible_ids(&board, &criteria),
        vec![
            vec!["login", "docs", "deploy"],
            vec!["shipped"],
        ]
    );
}

#[test]
fn search_is_case_insensitive_over_title_and_description() {
    let board = filter_board();
    let criteria = FilterCriteria {
        search_query: "login".to_string(),
        ..FilterCriteria::default()
    };
    assert_eq!(
        visible_ids(&board, &criteria),
        vec![vec!["login", "docs"], vec![]]
    );

    let including_archived = FilterCriteria {
        archived: true,
        ..criteria
    };
    assert_eq!(
        visible_ids(&board, &including_archived)[0],
        vec!["login", "docs", "stale"]
    );
}

#[test]
fn member_and_label_filters_match_any_selected_id() {
    let board = filter_board();

    let members = FilterCriteria {
        members: ["alice", "bob"].iter().map(|id| id.to_string()).collect(),
        ..FilterCriteria::default()
    };
    assert_eq!(visible_ids(&board, &members)[0], vec!["login", "deploy"]);

    let labels = FilterCriteria {
        labels: ["docs".to_string()].into_iter().collect(),
        ..FilterCriteria::default()
    };
    assert_eq!(visible_ids(&board, &labels)[0], vec!["docs"]);
}

#[test]
fn priority_filter_accepts_any_selected_priority() {
    let board = filter_board();
    let criteria = FilterCriteria {
        priority: [Priority::High, Priority::Urgent].into_iter().collect(),
        ..FilterCriteria::default()
    };
    assert_eq!(visible_ids(&board, &criteria)[0], vec!["login", "deploy"]);
    assert!(visible_ids(&board, &criteria)[1].is_empty());
}

#[test]
fn due_date_filters() {
    let board = filter_board();
    let with_due = |due_date| FilterCriteria {
        due_date,
        ..FilterCriteria::default()
    };

    assert_eq!(
        visible_ids(&board, &with_due(DueDateFilter::Overdue))[0],
        vec!["login"]
    );
    assert_eq!(
        visible_ids(&board, &with_due(DueDateFilter::DueSoon))[0],
        vec!["docs"]
    );
    assert_eq!(
        visible_ids(&board, &with_due(DueDateFilter::NoDate)),
        vec![Vec::<String>::new(), vec!["shipped".to_string()]]
    );
}

#[test]
fn due_soon_window_is_inclusive() {
    let at_now = DueDateFilter::DueSoon.matches(Some(now()), now());
    let at_edge = DueDateFilter::DueSoon.matches(Some(now() + Duration::hours(24)), now());
    let past_edge = DueDateFilter::DueSoon.matches(
        Some(now() + Duration::hours(24) + Duration::seconds(1)),
        now(),
    );
    assert!(at_now);
    assert!(at_edge);
    assert!(!past_edge);
    assert!(!DueDateFilter::Overdue.matches(Some(now()), now()));
}

#[test]
fn adding_a_criterion_never_widens_the_result() {
    let board = filter_board();
    let base = FilterCriteria {
        search_query: "o".to_string(),
        ..FilterCriteria::default()
    };
    let narrowed = FilterCriteria {
        priority: [Priority::High].into_iter().collect(),
        ..base.clone()
    };

    for card in board.cards() {
        if card_matches(card, &narrowed, now()) {
            assert!(card_matches(card, &base, now()), "card {}", card.id);
        }
    }
}

#[test]
fn filtering_keeps_list_order_and_board() {
    let board = filter_board();
    let snapshot = board.clone();
    let views = filter_lists(&board, &FilterCriteria::default(), now());
    let titles: Vec<&str> = views.iter().map(|view| view.list.title.as_str()).collect();
    assert_eq!(titles, vec!["To Do", "Done"]);
    assert_eq!(board, snapshot);
}

#[test]
fn default_criteria_are_inactive_and_each_criterion_activates() {
    assert!(!FilterCriteria::default().is_active());

    let showing_archived = FilterCriteria {
        archived: true,
        ..FilterCriteria::default()
    };
    assert!(showing_archived.is_active());

    let searching = FilterCriteria {
        search_query: "bug".to_string(),
        ..FilterCriteria::default()
    };
    assert!(searching.is_active());

    let overdue_only = FilterCriteria {
        due_date: DueDateFilter::Overdue,
        ..FilterCriteria::default()
    };
    assert!(overdue_only.is_active());
}

#[test]
fn criteria_read_camel_case_payload() {
    let criteria: FilterCriteria = serde_json::from_str(
        r#"{"searchQuery":"bug","priority":["urgent"],"dueDate":"due_soon","archived":true}"#,
    )
    .unwrap();
    assert_eq!(criteria.search_query, "bug");
    assert!(criteria.priority.contains(&Priority::Urgent));
    assert_eq!(criteria.due_date, DueDateFilter::DueSoon);
    assert!(criteria.members.is_empty());
}

#[test]
fn stats_summarize_the_board() {
    let mut board = filter_board();
    board.members.insert(Member::new("alice", "Alice Smith"));
    board.lists[0].wip_limit = Some(2);
    board.lists[0].cards[0].time_entries.push(TimeEntry {
        id: "t1".to_string(),
        start_time: now() - Duration::hours(2),
        end_time: Some(now()),
        duration: 95,
        description: None,
    });

    let stats = BoardStats::compute(&board, now());

    assert_eq!(stats.total_cards, 5);
    assert_eq!(stats.completed_cards, 1);
    assert_eq!(stats.completion_rate, 20);
    assert_eq!(stats.overdue_cards, 1);
    assert_eq!(stats.tracked_minutes, 95);
    assert_eq!(stats.tracked_hours(), 2);
    assert_eq!(stats.member_count, 1);
    assert_eq!(stats.per_list[0].cards, 4);
    assert_eq!(stats.over_wip_limit, vec!["todo".to_string()]);
}

#[test]
fn stats_of_empty_board_are_zero() {
    let board = Board::with_default_lists("Empty", now());
    let stats = BoardStats::compute(&board, now());
    assert_eq!(stats.total_cards, 0);
    assert_eq!(stats.completion_rate, 0);
    assert!(stats.over_wip_limit.is_empty());
    assert_eq!(stats.per_list.len(), 3);
}
