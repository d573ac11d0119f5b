//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate engine calls and store persistence into use-case level APIs.
//! - Keep the engine free of I/O.

pub mod workspace_service;
