//! Note domain model.
//!
//! # Invariants
//! - Persisted content is trimmed and never empty.
//! - `title` is derived from content, never supplied by callers.
//! - `created_at` is assigned by the store at insert time.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Stable identifier of a saved note.
pub type NoteId = Uuid;

/// Number of characters kept from content when deriving a title.
pub const TITLE_MAX_CHARS: usize = 50;
const TITLE_ELLIPSIS: &str = "...";

/// Rejection reasons for note drafts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteValidationError {
    #[error("cannot save empty notes")]
    EmptyContent,
}

/// A saved study note as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Trimmed study text.
    pub content: String,
    pub title: String,
    /// Unix epoch milliseconds, assigned by the store.
    pub created_at: i64,
    pub user_id: String,
}

/// Validated, not yet persisted note content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    id: NoteId,
    content: String,
    title: String,
}

impl NoteDraft {
    /// Trims `content` and derives its title.
    ///
    /// # Errors
    /// - `EmptyContent` when nothing but whitespace remains.
    pub fn new(content: &str) -> Result<Self, NoteValidationError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            content: trimmed.to_string(),
            title: derive_title(trimmed),
        })
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Derives a display title from note content.
///
/// Keeps the first `TITLE_MAX_CHARS` characters of the trimmed content and
/// appends `...` only when something was cut off.
pub fn derive_title(content: &str) -> String {
    let trimmed = content.trim();
    let mut title: String = trimmed.chars().take(TITLE_MAX_CHARS).collect();
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        title.push_str(TITLE_ELLIPSIS);
    }
    title
}
