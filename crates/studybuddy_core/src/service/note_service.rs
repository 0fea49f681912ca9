//! Note use-case service.
//!
//! # Responsibility
//! - Save notes for the session's collection after validating content.
//! - Read back the recent-notes list and single notes for reloading.
//!
//! # Invariants
//! - Empty or whitespace-only content never reaches the repository.
//! - Recent notes are newest first, at most ten.
//! - Note content is never written to logs.

use crate::model::collection::CollectionPath;
use crate::model::note::{Note, NoteDraft, NoteId, NoteValidationError};
use crate::repo::note_repo::{NoteRepository, RECENT_NOTES_LIMIT};
use crate::repo::RepoError;
use log::{error, info, warn};
use thiserror::Error;

/// Service error for note use-cases.
#[derive(Debug, Error)]
pub enum NoteServiceError {
    #[error("cannot save empty notes")]
    EmptyContent,
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("inconsistent note state: {0}")]
    InconsistentState(&'static str),
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        match value {
            NoteValidationError::EmptyContent => Self::EmptyContent,
        }
    }
}

/// Note service bound to one user's collection.
pub struct NoteService<R: NoteRepository> {
    repo: R,
    collection: CollectionPath,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R, collection: CollectionPath) -> Self {
        Self { repo, collection }
    }

    /// Saves one note and returns it as stored.
    ///
    /// # Errors
    /// - `EmptyContent` when `content` is blank; nothing is persisted.
    pub fn save_note(&self, content: &str) -> Result<Note, NoteServiceError> {
        let draft = match NoteDraft::new(content) {
            Ok(draft) => draft,
            Err(err) => {
                warn!("event=note_save module=notes status=rejected reason=empty_content");
                return Err(err.into());
            }
        };

        let note_id = self
            .repo
            .create_note(&self.collection, &draft)
            .inspect_err(|err| {
                error!("event=note_save module=notes status=error error={err}");
            })?;
        info!(
            "event=note_save module=notes status=ok note_id={} content_chars={}",
            note_id,
            draft.content().chars().count()
        );

        self.repo
            .get_note(&self.collection, note_id)?
            .ok_or(NoteServiceError::InconsistentState(
                "saved note not found in read-back",
            ))
    }

    /// Lists the most recent notes, newest first.
    pub fn recent_notes(&self) -> Result<Vec<Note>, NoteServiceError> {
        let notes = self
            .repo
            .list_recent(&self.collection, Some(RECENT_NOTES_LIMIT))?;
        info!(
            "event=note_list module=notes status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }

    /// Loads one saved note so its content can be edited or generated from.
    pub fn load_note(&self, id: NoteId) -> Result<Note, NoteServiceError> {
        self.repo
            .get_note(&self.collection, id)?
            .ok_or(NoteServiceError::NoteNotFound(id))
    }
}
