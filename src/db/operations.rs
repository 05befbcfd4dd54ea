use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::FileMetadata;
use crate::storage::StoredUpload;

pub struct FileOperations;

impl FileOperations {
    /// Persists the metadata of a stored upload and returns the saved row.
    pub async fn save_file_metadata(
        pool: &SqlitePool,
        upload: &StoredUpload,
    ) -> Result<FileMetadata, sqlx::Error> {
        let metadata = FileMetadata {
            id: Uuid::new_v4().to_string(),
            original_name: upload.original_name.clone(),
            mime_type: upload.mime_type.clone(),
            size: upload.size,
            path: upload.path.to_string_lossy().to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO files (id, original_name, mime_type, size, path, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&metadata.id)
        .bind(&metadata.original_name)
        .bind(&metadata.mime_type)
        .bind(metadata.size)
        .bind(&metadata.path)
        .bind(metadata.created_at)
        .execute(pool)
        .await?;

        Ok(metadata)
    }

    pub async fn get_file_metadata(
        pool: &SqlitePool,
        id: &str,
    ) -> Result<Option<FileMetadata>, sqlx::Error> {
        sqlx::query_as::<_, FileMetadata>(
            "SELECT id, original_name, mime_type, size, path, created_at FROM files WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn list_files(pool: &SqlitePool) -> Result<Vec<FileMetadata>, sqlx::Error> {
        sqlx::query_as::<_, FileMetadata>(
            "SELECT id, original_name, mime_type, size, path, created_at FROM files ORDER BY created_at",
        )
        .fetch_all(pool)
        .await
    }

    /// Removes a file row. Returns `true` when a row was actually deleted.
    pub async fn delete_file_metadata(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM files WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
