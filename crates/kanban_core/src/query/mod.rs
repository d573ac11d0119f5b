//! Read-only board projections.
//!
//! # Responsibility
//! - Derive the filtered card view shown for a board.
//! - Summarize board statistics.
//!
//! # Invariants
//! - Nothing in this module mutates a board.

pub mod filter;
pub mod stats;
