//! Wire contract with the generation API: requested schema and response
//! decoding.

use super::GenerationError;
use crate::model::study_set::StudySet;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

static FENCED_JSON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)```(?:json)?[ \t]*\r?\n(.*?)\r?\n?[ \t]*```").expect("valid fence regex")
});

/// JSON schema the model is asked to answer with.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "quiz": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "correctAnswer": { "type": "STRING" }
                    },
                    "required": ["question", "options", "correctAnswer"]
                }
            },
            "flashcards": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "term": { "type": "STRING" },
                        "definition": { "type": "STRING" }
                    },
                    "required": ["term", "definition"]
                }
            }
        },
        "required": ["quiz", "flashcards"]
    })
}

/// Decodes and validates a model response.
///
/// Accepts bare JSON, or the first Markdown code fence found in the text
/// (surrounding prose is ignored).
pub fn parse_study_set(text: &str) -> Result<StudySet, GenerationError> {
    let body = FENCED_JSON_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str());
    let set: StudySet = serde_json::from_str(body.trim())?;
    set.validate()?;
    Ok(set)
}
