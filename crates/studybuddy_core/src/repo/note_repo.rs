//! Note repository contract and SQLite implementation.
//!
//! # Invariants
//! - Writes are unconditional inserts; rows are never updated or deleted.
//! - Recent-note reads are ordered `created_at DESC, seq DESC` and capped at
//!   `RECENT_NOTES_LIMIT`.

use crate::model::collection::CollectionPath;
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

/// Maximum number of notes returned by a recent-notes read.
pub const RECENT_NOTES_LIMIT: u32 = 10;

const NOTE_SELECT_SQL: &str = "SELECT
    uuid,
    content,
    title,
    created_at,
    user_id
FROM study_notes";

const REQUIRED_COLUMNS: [&str; 7] = [
    "seq",
    "uuid",
    "collection_path",
    "user_id",
    "content",
    "title",
    "created_at",
];

/// Repository interface for per-user note storage.
pub trait NoteRepository {
    /// Inserts one note owned by `path.user_id()` and returns its id.
    fn create_note(&self, path: &CollectionPath, draft: &NoteDraft) -> RepoResult<NoteId>;
    /// Gets one note inside `path`.
    fn get_note(&self, path: &CollectionPath, id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists the newest notes inside `path`.
    fn list_recent(&self, path: &CollectionPath, limit: Option<u32>) -> RepoResult<Vec<Note>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema has
    ///   not been bootstrapped through `db::open_db`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, path: &CollectionPath, draft: &NoteDraft) -> RepoResult<NoteId> {
        self.conn.execute(
            "INSERT INTO study_notes (uuid, collection_path, user_id, content, title)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.id().to_string(),
                path.to_string(),
                path.user_id(),
                draft.content(),
                draft.title(),
            ],
        )?;
        Ok(draft.id())
    }

    fn get_note(&self, path: &CollectionPath, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE uuid = ?1
               AND collection_path = ?2;"
        ))?;
        stmt.query_row(params![id.to_string(), path.to_string()], RawNote::from_row)
            .optional()?
            .map(RawNote::into_note)
            .transpose()
    }

    fn list_recent(&self, path: &CollectionPath, limit: Option<u32>) -> RepoResult<Vec<Note>> {
        let limit = normalize_recent_limit(limit);
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE collection_path = ?1
             ORDER BY created_at DESC, seq DESC
             LIMIT ?2;"
        ))?;
        let mut rows = stmt.query(params![path.to_string(), i64::from(limit)])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(RawNote::from_row(row)?.into_note()?);
        }
        Ok(notes)
    }
}

/// Normalizes a recent-notes limit: defaults to 10 and never exceeds 10.
pub fn normalize_recent_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => RECENT_NOTES_LIMIT,
        Some(value) => value.min(RECENT_NOTES_LIMIT),
    }
}

struct RawNote {
    uuid: String,
    content: String,
    title: String,
    created_at: i64,
    user_id: String,
}

impl RawNote {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            uuid: row.get("uuid")?,
            content: row.get("content")?,
            title: row.get("title")?,
            created_at: row.get("created_at")?,
            user_id: row.get("user_id")?,
        })
    }

    fn into_note(self) -> RepoResult<Note> {
        let id = Uuid::parse_str(&self.uuid).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid uuid value `{}` in study_notes.uuid",
                self.uuid
            ))
        })?;
        if self.content.trim().is_empty() {
            return Err(RepoError::InvalidData(format!(
                "note {id} has empty content"
            )));
        }
        Ok(Note {
            id,
            content: self.content,
            title: self.title,
            created_at: self.created_at,
            user_id: self.user_id,
        })
    }
}

fn ensure_schema_ready(conn: &Connection) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'study_notes'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable("study_notes"));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(study_notes);")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    for column in REQUIRED_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "study_notes",
                column,
            });
        }
    }
    Ok(())
}
