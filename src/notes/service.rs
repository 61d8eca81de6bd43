//! Note persistence.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::notes::model::{NewNote, Note, NoteChanges};

/// Note queries against an injected pool.
#[derive(Debug, Clone)]
pub struct NoteService {
    pool: SqlitePool,
}

impl NoteService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All notes, ordered by id.
    pub async fn list(&self) -> Result<Vec<Note>, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            "SELECT id, title, content, folder_id, modified FROM notes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Note>, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            "SELECT id, title, content, folder_id, modified FROM notes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert with `modified` set to now and return the stored row.
    pub async fn insert(&self, note: &NewNote) -> Result<Note, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            "INSERT INTO notes (title, content, folder_id, modified) VALUES (?, ?, ?, ?)
             RETURNING id, title, content, folder_id, modified",
        )
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.folder_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    /// Replace the supplied fields, refresh `modified`, and return the
    /// number of rows changed (0 or 1).
    pub async fn update(&self, id: i64, changes: &NoteChanges) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notes SET
                title = COALESCE(?, title),
                content = COALESCE(?, content),
                folder_id = COALESCE(?, folder_id),
                modified = ?
             WHERE id = ?",
        )
        .bind(changes.title.as_deref())
        .bind(changes.content.as_deref())
        .bind(changes.folder_id)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn folder_exists(&self, folder_id: i64) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM folders WHERE id = ?")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}
