//! Folder persistence.

use sqlx::SqlitePool;

use crate::folders::model::{Folder, FolderChanges, NewFolder};

/// Folder queries against an injected pool.
#[derive(Debug, Clone)]
pub struct FolderService {
    pool: SqlitePool,
}

impl FolderService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All folders, ordered by id.
    pub async fn list(&self) -> Result<Vec<Folder>, sqlx::Error> {
        sqlx::query_as::<_, Folder>("SELECT id, name FROM folders ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Folder>, sqlx::Error> {
        sqlx::query_as::<_, Folder>("SELECT id, name FROM folders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert and return the stored row, id included.
    pub async fn insert(&self, folder: &NewFolder) -> Result<Folder, sqlx::Error> {
        sqlx::query_as::<_, Folder>("INSERT INTO folders (name) VALUES (?) RETURNING id, name")
            .bind(&folder.name)
            .fetch_one(&self.pool)
            .await
    }

    /// Returns the number of rows changed (0 or 1).
    pub async fn update(&self, id: i64, changes: &FolderChanges) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE folders SET name = ? WHERE id = ?")
            .bind(&changes.name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM folders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Number of notes that reference folder `id`.
    pub async fn note_count(&self, id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notes WHERE folder_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }
}
