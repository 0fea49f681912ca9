//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every query is scoped to one collection path.
//! - Invalid persisted rows surface as `InvalidData`, never silently skipped.

use crate::db::DbError;
use thiserror::Error;

pub mod note_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failure for note persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted note data: {0}")]
    InvalidData(String),
    #[error("required table `{0}` is missing; migrations not applied")]
    MissingRequiredTable(&'static str),
    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
