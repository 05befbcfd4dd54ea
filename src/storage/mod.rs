// Local disk storage for uploaded plate images

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

/// Metadata describing an upload persisted to the upload directory.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub path: PathBuf,
}

/// Writes uploaded bytes under a collision-free name and returns the stored
/// file's metadata.
pub async fn store_upload(
    upload_dir: &Path,
    original_name: &str,
    mime_type: &str,
    data: &[u8],
) -> std::io::Result<StoredUpload> {
    fs::create_dir_all(upload_dir).await?;

    let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original_name));
    let path = upload_dir.join(file_name);
    fs::write(&path, data).await?;

    info!("Stored upload '{}' at {}", original_name, path.display());

    Ok(StoredUpload {
        original_name: original_name.to_string(),
        mime_type: mime_type.to_string(),
        size: data.len() as i64,
        path,
    })
}

/// Deletes a stored file from disk. A file already missing is logged and
/// treated as success so that metadata cleanup can proceed.
pub async fn remove_stored_file(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => {
            info!("File deleted successfully: {}", path.display());
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!("File not found on disk: {}", path.display());
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn stores_bytes_under_unique_name() {
        let dir = TempDir::new().unwrap();

        let stored = store_upload(dir.path(), "plate 1.png", "image/png", b"image-bytes")
            .await
            .unwrap();

        assert_eq!(stored.original_name, "plate 1.png");
        assert_eq!(stored.size, 11);
        assert!(stored.path.starts_with(dir.path()));
        assert_eq!(fs::read(&stored.path).await.unwrap(), b"image-bytes");

        // The stored name keeps the sanitized original as a readable suffix.
        let file_name = stored.path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.ends_with("plate_1.png"));
    }

    #[tokio::test]
    async fn uploads_with_same_name_do_not_collide() {
        let dir = TempDir::new().unwrap();

        let first = store_upload(dir.path(), "plate.png", "image/png", b"a")
            .await
            .unwrap();
        let second = store_upload(dir.path(), "plate.png", "image/png", b"b")
            .await
            .unwrap();

        assert_ne!(first.path, second.path);
    }

    #[tokio::test]
    async fn removing_missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        remove_stored_file(&dir.path().join("gone.png")).await.unwrap();
    }

    #[tokio::test]
    async fn removes_existing_file() {
        let dir = TempDir::new().unwrap();
        let stored = store_upload(dir.path(), "plate.png", "image/png", b"a")
            .await
            .unwrap();

        remove_stored_file(&stored.path).await.unwrap();
        assert!(!stored.path.exists());
    }
}
