//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and generator calls into use-case level APIs.
//! - Keep the CLI decoupled from storage and generation details.

pub mod note_service;
pub mod study_service;
