//! Static stand-in for the external generation API.

use super::{GenerationError, GenerationRequest, StudyGenerator};
use crate::model::study_set::{Flashcard, QuizQuestion, StudySet};
use log::info;
use std::time::Duration;

/// Returns `placeholder_study_set()` for any non-empty notes after an
/// optional simulated latency.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderGenerator {
    latency: Duration,
}

impl PlaceholderGenerator {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl StudyGenerator for PlaceholderGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<StudySet, GenerationError> {
        if request.notes().trim().is_empty() {
            return Err(GenerationError::NotesRequired);
        }
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        info!(
            "event=generate module=generate status=ok source=placeholder latency_ms={}",
            self.latency.as_millis()
        );
        Ok(placeholder_study_set())
    }
}

/// The fixed two-question, two-flashcard study set.
pub fn placeholder_study_set() -> StudySet {
    StudySet {
        quiz: vec![
            question(
                "Q1: What is the primary benefit of keeping study notes in one place?",
                &[
                    "A. Full control over page styling",
                    "B. Faster review from a single source",
                    "C. Automatic database setup",
                ],
                1,
            ),
            question(
                "Q2: Where does the saved note data reside?",
                &[
                    "A. Local browser storage",
                    "B. The per-user note store",
                    "C. An in-memory cache",
                ],
                1,
            ),
        ],
        flashcards: vec![
            Flashcard {
                term: "Study set".to_string(),
                definition: "A generated bundle of quiz questions and flashcards built from \
                             a block of study notes."
                    .to_string(),
            },
            Flashcard {
                term: "Note store".to_string(),
                definition: "The per-user collection where saved study notes are kept and \
                             read back newest first."
                    .to_string(),
            },
        ],
    }
}

fn question(text: &str, options: &[&str], correct: usize) -> QuizQuestion {
    QuizQuestion {
        question: text.to_string(),
        options: options.iter().map(|option| option.to_string()).collect(),
        correct_answer: options[correct].to_string(),
    }
}
