//! Interactive review of a generated study set.
//!
//! Tracks the latest answer per question so a learner can retry; the score
//! always reflects the most recent pick.

use crate::model::study_set::{AnswerVerdict, Flashcard, QuizQuestion, StudySet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("question {index} does not exist; quiz has {len} questions")]
    QuestionOutOfRange { index: usize, len: usize },
    #[error("flashcard {index} does not exist; set has {len} flashcards")]
    FlashcardOutOfRange { index: usize, len: usize },
    #[error("`{option}` is not an option of question {index}")]
    UnknownOption { index: usize, option: String },
}

/// Answer tally for a review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub answered: usize,
    pub total: usize,
}

pub struct ReviewSession {
    set: StudySet,
    answers: Vec<Option<AnswerVerdict>>,
}

impl ReviewSession {
    pub fn new(set: StudySet) -> Self {
        let answers = vec![None; set.quiz.len()];
        Self { set, answers }
    }

    pub fn study_set(&self) -> &StudySet {
        &self.set
    }

    pub fn question(&self, index: usize) -> Result<&QuizQuestion, ReviewError> {
        self.set
            .quiz
            .get(index)
            .ok_or(ReviewError::QuestionOutOfRange {
                index,
                len: self.set.quiz.len(),
            })
    }

    /// Picks `option` for question `index` and records the verdict.
    pub fn answer(&mut self, index: usize, option: &str) -> Result<AnswerVerdict, ReviewError> {
        let question = self.question(index)?;
        if !question.options.iter().any(|candidate| candidate == option) {
            return Err(ReviewError::UnknownOption {
                index,
                option: option.to_string(),
            });
        }
        let verdict = question.check(option);
        self.answers[index] = Some(verdict.clone());
        Ok(verdict)
    }

    /// Picks an option by zero-based position instead of text.
    pub fn answer_by_position(
        &mut self,
        index: usize,
        position: usize,
    ) -> Result<AnswerVerdict, ReviewError> {
        let option = self
            .question(index)?
            .options
            .get(position)
            .cloned()
            .ok_or_else(|| ReviewError::UnknownOption {
                index,
                option: format!("#{}", position + 1),
            })?;
        self.answer(index, &option)
    }

    pub fn score(&self) -> Score {
        let answered = self.answers.iter().flatten().count();
        let correct = self
            .answers
            .iter()
            .flatten()
            .filter(|verdict| verdict.is_correct())
            .count();
        Score {
            correct,
            answered,
            total: self.answers.len(),
        }
    }

    /// Reveals one flashcard.
    pub fn flashcard(&self, index: usize) -> Result<&Flashcard, ReviewError> {
        self.set
            .flashcards
            .get(index)
            .ok_or(ReviewError::FlashcardOutOfRange {
                index,
                len: self.set.flashcards.len(),
            })
    }
}
