//! Image upload preview routes.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::services::upload::{self, CandidateFile, ACCEPTED_IMAGE_TYPES};
use crate::AppState;

/// Result of a successful preview upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCreated {
    pub preview_url: String,
    pub size_mb: f64,
    pub content_type: String,
}

/// POST /api/uploads/preview — validate an image (multipart `file`) and register a preview.
///
/// An optional `previous` field names a preview URL this upload replaces; it is
/// released once the new preview is registered.
pub async fn preview(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<PreviewCreated>>, AppError> {
    let mut candidate: Option<CandidateFile> = None;
    let mut previous: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("file") => {}
            Some("previous") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read previous: {e}")))?;
                previous = Some(text).filter(|t| !t.is_empty());
                continue;
            }
            _ => continue,
        }
        let file_name = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(|s| s.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
        candidate = Some(CandidateFile {
            file_name,
            content_type,
            bytes,
        });
    }

    let file = candidate.ok_or_else(|| {
        AppError::Validation("Missing 'file' field in multipart request".to_string())
    })?;

    if !upload::is_valid_image_type(&file) {
        return Err(AppError::Validation(format!(
            "Unsupported image type; expected one of {}",
            ACCEPTED_IMAGE_TYPES.join(", ")
        )));
    }

    let size_mb = upload::file_size_mb(&file);
    let limit_mb = state.config.upload_limit_mb();
    if size_mb > limit_mb {
        return Err(AppError::Validation(format!(
            "Image is {size_mb:.2} MB; the limit is {limit_mb} MB"
        )));
    }

    let preview_url = state
        .previews
        .replace_preview_url(previous.as_deref(), &file)
        .await;
    let entries = state.previews.len().await;
    tracing::debug!(
        preview_url = %preview_url,
        replaced = ?previous,
        file_name = ?file.file_name,
        size_mb,
        entries,
        "Registered upload preview"
    );

    Ok(ApiResponse::success(PreviewCreated {
        preview_url,
        size_mb,
        content_type: file.content_type.unwrap_or_default(),
    }))
}

/// GET /previews/{id} — raw bytes of a registered preview.
pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let preview = state
        .previews
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Preview '{id}' not found")))?;

    Ok((
        [(header::CONTENT_TYPE, preview.content_type)],
        preview.bytes,
    )
        .into_response())
}

/// DELETE /previews/{id} — release a preview reference.
pub async fn revoke(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.previews.revoke(&id.to_string()).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Preview '{id}' not found")))
    }
}
