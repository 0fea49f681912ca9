//! Quiz/flashcard generation contract.
//!
//! # Responsibility
//! - Describe the request sent to a generative model and the payload it must
//!   return.
//! - Provide the placeholder generator used in place of the external API.
//!
//! # Invariants
//! - Generation never runs on empty notes.
//! - A returned `StudySet` has passed `StudySet::validate()` by the time it
//!   leaves `StudyService`.

use crate::model::study_set::{StudySet, StudySetError};
use thiserror::Error;

mod payload;
mod placeholder;

pub use payload::{parse_study_set, response_schema};
pub use placeholder::{placeholder_study_set, PlaceholderGenerator};

/// Generation failure.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Notes required for generation.")]
    NotesRequired,
    #[error("generated payload is not valid JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error("generated payload is invalid: {0}")]
    InvalidPayload(#[from] StudySetError),
}

/// Source of study material for a block of notes.
pub trait StudyGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<StudySet, GenerationError>;
}

/// Notes to generate from, already trimmed and known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    notes: String,
}

impl GenerationRequest {
    /// # Errors
    /// - `NotesRequired` when `notes` is blank.
    pub fn new(notes: &str) -> Result<Self, GenerationError> {
        let trimmed = notes.trim();
        if trimmed.is_empty() {
            return Err(GenerationError::NotesRequired);
        }
        Ok(Self {
            notes: trimmed.to_string(),
        })
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// User query sent alongside `response_schema()` to the model.
    pub fn prompt(&self) -> String {
        format!(
            "Create a short multiple-choice quiz and a set of key-term flashcards \
             from the study notes below. Every question must list its options and \
             the exact text of the correct option.\n\nNotes:\n{}",
            self.notes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{GenerationError, GenerationRequest};

    #[test]
    fn request_rejects_blank_notes() {
        assert!(matches!(
            GenerationRequest::new("   \n"),
            Err(GenerationError::NotesRequired)
        ));
    }

    #[test]
    fn prompt_embeds_trimmed_notes() {
        let request = GenerationRequest::new("  cell theory \n").expect("notes are not blank");
        assert_eq!(request.notes(), "cell theory");
        assert!(request.prompt().ends_with("Notes:\ncell theory"));
    }
}
