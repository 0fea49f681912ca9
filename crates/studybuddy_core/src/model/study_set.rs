//! Generated study material: multiple-choice quiz plus flashcards.
//!
//! Field names follow the payload schema requested from the generation API,
//! so `correct_answer` travels as `correctAnswer`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
}

/// One term/definition pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub term: String,
    pub definition: String,
}

/// Complete generated payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySet {
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

/// Outcome of picking one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerVerdict {
    Correct,
    Incorrect { correct_answer: String },
}

impl AnswerVerdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Structural problem in a study set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudySetError {
    #[error("question {index} has empty text")]
    EmptyQuestion { index: usize },
    #[error("question {index} has no options")]
    NoOptions { index: usize },
    #[error("question {index} correct answer `{answer}` is not one of its options")]
    AnswerNotInOptions { index: usize, answer: String },
    #[error("flashcard {index} is missing a term or definition")]
    IncompleteFlashcard { index: usize },
}

impl QuizQuestion {
    /// Grades `option` against the correct answer.
    pub fn check(&self, option: &str) -> AnswerVerdict {
        if option == self.correct_answer {
            AnswerVerdict::Correct
        } else {
            AnswerVerdict::Incorrect {
                correct_answer: self.correct_answer.clone(),
            }
        }
    }
}

impl StudySet {
    pub fn is_empty(&self) -> bool {
        self.quiz.is_empty() && self.flashcards.is_empty()
    }

    /// Checks that every question is answerable and every card is complete.
    pub fn validate(&self) -> Result<(), StudySetError> {
        for (index, question) in self.quiz.iter().enumerate() {
            if question.question.trim().is_empty() {
                return Err(StudySetError::EmptyQuestion { index });
            }
            if question.options.is_empty() {
                return Err(StudySetError::NoOptions { index });
            }
            if !question.options.contains(&question.correct_answer) {
                return Err(StudySetError::AnswerNotInOptions {
                    index,
                    answer: question.correct_answer.clone(),
                });
            }
        }
        for (index, card) in self.flashcards.iter().enumerate() {
            if card.term.trim().is_empty() || card.definition.trim().is_empty() {
                return Err(StudySetError::IncompleteFlashcard { index });
            }
        }
        Ok(())
    }
}
