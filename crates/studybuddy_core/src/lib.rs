//! Core domain logic for StudyBuddy.
//! This crate is the single source of truth for note and study-set
//! invariants; front ends only render what it returns.

pub mod config;
pub mod db;
pub mod generate;
pub mod logging;
pub mod model;
pub mod repo;
pub mod review;
pub mod service;
pub mod session;

pub use config::{AppConfig, ConfigError};
pub use generate::{
    parse_study_set, placeholder_study_set, response_schema, GenerationError, GenerationRequest,
    PlaceholderGenerator, StudyGenerator,
};
pub use logging::{default_log_level, init_logging, logging_status, LogOptions, LoggingError};
pub use model::collection::{CollectionPath, CollectionPathError};
pub use model::note::{derive_title, Note, NoteDraft, NoteId, NoteValidationError};
pub use model::study_set::{AnswerVerdict, Flashcard, QuizQuestion, StudySet, StudySetError};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository, RECENT_NOTES_LIMIT};
pub use repo::{RepoError, RepoResult};
pub use review::{ReviewError, ReviewSession, Score};
pub use service::note_service::{NoteService, NoteServiceError};
pub use service::study_service::StudyService;
pub use session::{
    resolve_session, IdentityVerifier, Session, SessionError, StaticIdentityVerifier,
    ANONYMOUS_USER_ID,
};
