//! Built-in board templates.

use crate::model::member::Label;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// List shape copied into boards created from a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlueprint {
    pub title: String,
    pub position: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub lists: Vec<ListBlueprint>,
    /// Suggested label palette for boards built from this template.
    pub labels: Vec<Label>,
}

static BUILTIN_TEMPLATES: Lazy<Vec<BoardTemplate>> = Lazy::new(|| {
    vec![
        template(
            "software-dev",
            "Software Development",
            "Perfect for agile software development teams",
            &[
                ("Backlog", None),
                ("To Do", None),
                ("In Progress", Some(3)),
                ("Code Review", None),
                ("Testing", None),
                ("Done", None),
            ],
            &[
                ("bug", "Bug", "#FF6B6B"),
                ("feature", "Feature", "#4ECDC4"),
                ("enhancement", "Enhancement", "#45B7D1"),
                ("urgent", "Urgent", "#FF8C42"),
                ("documentation", "Documentation", "#96CEB4"),
            ],
        ),
        template(
            "marketing",
            "Marketing Campaign",
            "Organize your marketing campaigns and content",
            &[
                ("Ideas", None),
                ("Planning", None),
                ("In Production", None),
                ("Review", None),
                ("Scheduled", None),
                ("Published", None),
            ],
            &[
                ("social-media", "Social Media", "#FF6B6B"),
                ("blog", "Blog", "#4ECDC4"),
                ("email", "Email", "#45B7D1"),
                ("video", "Video", "#96CEB4"),
                ("design", "Design", "#FFEAA7"),
            ],
        ),
        template(
            "personal",
            "Personal Tasks",
            "Manage your personal projects and daily tasks",
            &[
                ("Inbox", None),
                ("Today", None),
                ("This Week", None),
                ("Someday", None),
                ("Completed", None),
            ],
            &[
                ("urgent", "Urgent", "#FF6B6B"),
                ("important", "Important", "#FF8C42"),
                ("personal", "Personal", "#4ECDC4"),
                ("work", "Work", "#45B7D1"),
                ("health", "Health", "#96CEB4"),
            ],
        ),
        template(
            "event-planning",
            "Event Planning",
            "Plan and organize events with detailed task tracking",
            &[
                ("Initial Planning", None),
                ("Venue & Logistics", None),
                ("Marketing & Promotion", None),
                ("Final Preparations", None),
                ("Event Day", None),
                ("Post-Event", None),
            ],
            &[
                ("venue", "Venue", "#FF6B6B"),
                ("catering", "Catering", "#4ECDC4"),
                ("marketing", "Marketing", "#45B7D1"),
                ("logistics", "Logistics", "#96CEB4"),
                ("budget", "Budget", "#FFEAA7"),
            ],
        ),
    ]
});

/// Returns the built-in templates in menu order.
pub fn builtin_templates() -> &'static [BoardTemplate] {
    &BUILTIN_TEMPLATES
}

/// Looks up a built-in template by id.
pub fn find_template(id: &str) -> Option<&'static BoardTemplate> {
    BUILTIN_TEMPLATES.iter().find(|template| template.id == id)
}

fn template(
    id: &str,
    name: &str,
    description: &str,
    lists: &[(&str, Option<u32>)],
    labels: &[(&str, &str, &str)],
) -> BoardTemplate {
    BoardTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        lists: lists
            .iter()
            .zip(0u32..)
            .map(|((title, wip_limit), position)| ListBlueprint {
                title: (*title).to_string(),
                position,
                wip_limit: *wip_limit,
            })
            .collect(),
        labels: labels
            .iter()
            .map(|(id, name, color)| Label::new(*id, *name, *color))
            .collect(),
    }
}
