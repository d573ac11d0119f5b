//! Shared reference data: board members and card labels.
//!
//! Both are immutable value records copied into cards; identity is the `id`.

use crate::model::id_set::Keyed;
use serde::{Deserialize, Serialize};

/// A person who can be assigned to cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    pub initials: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Member {
    /// Creates a member, deriving initials from the first letter of each word.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        let initials = name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        Self {
            id: id.into(),
            name,
            avatar: String::new(),
            initials,
            email: None,
        }
    }
}

impl Keyed for Member {
    fn key(&self) -> &str {
        &self.id
    }
}

/// A colored tag attached to cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Label {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

impl Keyed for Label {
    fn key(&self) -> &str {
        &self.id
    }
}
