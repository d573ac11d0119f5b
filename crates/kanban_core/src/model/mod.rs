//! Board domain model.
//!
//! # Responsibility
//! - Define the Board -> List -> Card aggregate and the reference data shared
//!   by cards (members, labels).
//! - Keep serialized field names stable for persisted and exported boards.
//!
//! # Invariants
//! - Every entity is identified by a stable string id; generated ids are
//!   UUID v4 strings, imported ids are kept verbatim.
//! - Card removal is an `archived` flag; only lists are hard-deleted.

pub mod activity;
pub mod board;
pub mod card;
pub mod id_set;
pub mod member;
pub mod template;

use uuid::Uuid;

/// Generates a fresh entity id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
