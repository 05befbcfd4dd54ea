//! File API: upload, listing, detail, download, and deletion of plate images.
//!
//! Every metadata response carries the measured inhibition-zone diameters for
//! the image's original filename, looked up in the diameter registry.

use std::path::Path as FsPath;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::constants::{ALLOWED_FILE_FORMATS, FILE_UPLOADED, MAX_FILE_SIZE};
use crate::db::FileOperations;
use crate::models::{
    AppState, FileDetailData, FileDetailResponse, FileListResponse, FileUploadResponse,
    FileWithDiameters,
};
use crate::storage;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/file", get(list_files).post(upload_file))
        .route("/api/file/{id}", get(get_file).delete(remove_file))
        .route("/api/file/download/{id}", get(download_file))
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE * 2))
        .with_state(state)
}

/// POST /api/file
///
/// Accepts a multipart form with a `file` field, stores the image on disk,
/// persists its metadata, and responds with the metadata plus the diameters
/// measured for the uploaded image (null when none are on record).
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<FileUploadResponse>> {
    let mut stored = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").trim().to_string();
        let declared_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        let mime_type = resolve_mime_type(declared_type.as_deref(), &original_name);
        validate_upload(&mime_type, data.len())?;

        stored = Some(
            storage::store_upload(
                &state.config.data.upload_dir,
                &original_name,
                &mime_type,
                &data,
            )
            .await?,
        );
        break;
    }

    let upload = stored.ok_or(AppError::NoFileUploaded)?;
    let metadata = FileOperations::save_file_metadata(&state.pool, &upload).await?;
    let diameters = state.diameters.get(&metadata.original_name)?;

    info!(
        "File uploaded: {} ({} bytes)",
        metadata.original_name, metadata.size
    );

    Ok(Json(FileUploadResponse {
        message: FILE_UPLOADED.to_string(),
        file: FileWithDiameters {
            file: (&metadata).into(),
            diameters,
        },
    }))
}

/// GET /api/file
///
/// Lists all uploaded files. Images without an entry in the diameter map get
/// an empty diameters array rather than null.
async fn list_files(State(state): State<AppState>) -> AppResult<Json<FileListResponse>> {
    let files = FileOperations::list_files(&state.pool).await?;

    let mut data = Vec::with_capacity(files.len());
    for file in &files {
        let diameters = state.diameters.get(&file.original_name)?.unwrap_or_default();
        data.push(FileWithDiameters {
            file: file.into(),
            diameters: Some(diameters),
        });
    }

    Ok(Json(FileListResponse { data }))
}

/// GET /api/file/{id}
async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FileDetailResponse>> {
    let id = parse_file_id(&id)?;

    let metadata = FileOperations::get_file_metadata(&state.pool, &id)
        .await?
        .ok_or_else(|| {
            warn!("File not found: {id}");
            AppError::FileNotFound
        })?;

    let diameters = state.diameters.get(&metadata.original_name)?;

    Ok(Json(FileDetailResponse {
        data: FileDetailData {
            file: FileWithDiameters {
                file: (&metadata).into(),
                diameters,
            },
        },
    }))
}

/// GET /api/file/download/{id}
///
/// Serves the raw image bytes as an attachment under its original filename.
async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    info!("Serving file with ID: {id}");

    let metadata = FileOperations::get_file_metadata(&state.pool, &id)
        .await?
        .ok_or(AppError::FileNotFound)?;

    let path = FsPath::new(&metadata.path);
    if !path.exists() {
        warn!("File not found on disk: {}", metadata.path);
        return Err(AppError::FileNotFound);
    }

    let bytes = tokio::fs::read(path).await.map_err(|err| {
        error!("Error during file download: {err}");
        AppError::FailedToServeFile
    })?;

    let headers = [
        (header::CONTENT_TYPE, metadata.mime_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", metadata.original_name),
        ),
    ];

    Ok((headers, bytes))
}

/// DELETE /api/file/{id}
async fn remove_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_file_id(&id)?;
    info!("Attempting to delete file with ID: {id}");

    let metadata = FileOperations::get_file_metadata(&state.pool, &id)
        .await?
        .ok_or(AppError::FileNotFound)?;

    storage::remove_stored_file(FsPath::new(&metadata.path)).await?;
    FileOperations::delete_file_metadata(&state.pool, &id).await?;
    info!("File metadata removed from database for ID: {id}");

    Ok(StatusCode::NO_CONTENT)
}

fn parse_file_id(raw: &str) -> AppResult<String> {
    let id = Uuid::parse_str(raw).map_err(|_| AppError::InvalidUuid)?;
    Ok(id.to_string())
}

fn resolve_mime_type(declared: Option<&str>, original_name: &str) -> String {
    match declared {
        Some(content_type) => content_type.to_string(),
        None => mime_guess::from_path(original_name)
            .first_or_octet_stream()
            .to_string(),
    }
}

fn validate_upload(mime_type: &str, size: usize) -> AppResult<()> {
    if !ALLOWED_FILE_FORMATS.contains(&mime_type) {
        warn!("Invalid file type: {mime_type}");
        return Err(AppError::InvalidFileType);
    }
    if size > MAX_FILE_SIZE {
        return Err(AppError::FileTooLarge(MAX_FILE_SIZE));
    }
    Ok(())
}
