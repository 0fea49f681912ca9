//! Study material use-case service.
//!
//! # Invariants
//! - Blank notes are rejected before the generator is called.
//! - Results are validated, then memoized per trimmed notes text; the
//!   generator runs at most once per distinct input.

use crate::generate::{GenerationError, GenerationRequest, StudyGenerator};
use crate::model::study_set::StudySet;
use log::{debug, warn};
use std::collections::HashMap;

/// Generator facade with a per-input result cache.
pub struct StudyService<G: StudyGenerator> {
    generator: G,
    cache: HashMap<String, StudySet>,
}

impl<G: StudyGenerator> StudyService<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            cache: HashMap::new(),
        }
    }

    /// Generates (or recalls) the study set for `notes`.
    ///
    /// # Errors
    /// - `NotesRequired` for blank notes.
    /// - `InvalidPayload` when the generator returns an unanswerable set.
    pub fn generate(&mut self, notes: &str) -> Result<StudySet, GenerationError> {
        let request = GenerationRequest::new(notes).inspect_err(|_| {
            warn!("event=generate module=study status=rejected reason=empty_notes");
        })?;

        if let Some(cached) = self.cache.get(request.notes()) {
            debug!("event=generate module=study status=ok cache=hit");
            return Ok(cached.clone());
        }

        let set = self.generator.generate(&request)?;
        set.validate()?;
        debug!(
            "event=generate module=study status=ok cache=miss questions={} flashcards={}",
            set.quiz.len(),
            set.flashcards.len()
        );
        self.cache.insert(request.notes().to_string(), set.clone());
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::StudyService;
    use crate::generate::{
        placeholder_study_set, GenerationError, GenerationRequest, StudyGenerator,
    };
    use crate::model::study_set::{QuizQuestion, StudySet};
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingGenerator {
        calls: Cell<usize>,
    }

    impl StudyGenerator for CountingGenerator {
        fn generate(&self, _request: &GenerationRequest) -> Result<StudySet, GenerationError> {
            self.calls.set(self.calls.get() + 1);
            Ok(placeholder_study_set())
        }
    }

    struct BrokenGenerator;

    impl StudyGenerator for BrokenGenerator {
        fn generate(&self, _request: &GenerationRequest) -> Result<StudySet, GenerationError> {
            Ok(StudySet {
                quiz: vec![QuizQuestion {
                    question: "q".to_string(),
                    options: Vec::new(),
                    correct_answer: "a".to_string(),
                }],
                flashcards: Vec::new(),
            })
        }
    }

    #[test]
    fn same_notes_hit_the_cache() {
        let mut service = StudyService::new(CountingGenerator::default());
        service.generate("osmosis").expect("generation should succeed");
        service.generate("  osmosis \n").expect("generation should succeed");
        service.generate("diffusion").expect("generation should succeed");
        assert_eq!(service.generator.calls.get(), 2);
        assert_eq!(service.cache.len(), 2);
    }

    #[test]
    fn blank_notes_never_reach_generator() {
        let mut service = StudyService::new(CountingGenerator::default());
        let err = service.generate(" \t").expect_err("generation should fail");
        assert!(matches!(err, GenerationError::NotesRequired));
        assert_eq!(service.generator.calls.get(), 0);
    }

    #[test]
    fn invalid_sets_are_rejected_and_not_cached() {
        let mut service = StudyService::new(BrokenGenerator);
        let err = service.generate("anything").expect_err("generation should fail");
        assert!(matches!(err, GenerationError::InvalidPayload(_)));
        assert_eq!(service.cache.len(), 0);
    }
}
