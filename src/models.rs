use sqlx::SqlitePool;

use crate::config::Config;
use crate::diameters::{Diameter, DiameterRegistry};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub diameters: DiameterRegistry,
}

// Note: FromRow is needed for runtime query_as (without DATABASE_URL at compile time)

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct FileMetadata {
    pub id: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub path: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Client-facing view of a file row; the on-disk path stays internal.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDto {
    pub id: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&FileMetadata> for FileDto {
    fn from(metadata: &FileMetadata) -> Self {
        Self {
            id: metadata.id.clone(),
            original_name: metadata.original_name.clone(),
            mime_type: metadata.mime_type.clone(),
            size: metadata.size,
            created_at: metadata.created_at,
        }
    }
}

/// File DTO with the measured diameters merged in.
///
/// `diameters` is `null` when the image has no entry in the reference map;
/// list responses substitute an empty array instead.
#[derive(Debug, serde::Serialize)]
pub struct FileWithDiameters {
    #[serde(flatten)]
    pub file: FileDto,
    pub diameters: Option<Vec<Diameter>>,
}

// API Request/Response types

#[derive(Debug, serde::Serialize)]
pub struct FileUploadResponse {
    pub message: String,
    pub file: FileWithDiameters,
}

#[derive(Debug, serde::Serialize)]
pub struct FileListResponse {
    pub data: Vec<FileWithDiameters>,
}

#[derive(Debug, serde::Serialize)]
pub struct FileDetailResponse {
    pub data: FileDetailData,
}

#[derive(Debug, serde::Serialize)]
pub struct FileDetailData {
    pub file: FileWithDiameters,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub database: String,
}
