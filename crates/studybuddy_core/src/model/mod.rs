//! Domain model for study notes and generated study material.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId` and belongs to exactly one
//!   `CollectionPath`.
//! - Notes are insert-only; nothing in core updates or deletes them.

pub mod collection;
pub mod note;
pub mod study_set;
