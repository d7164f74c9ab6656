//! File handlers for Web API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::file::client_file_name;
use crate::web::dto::{DeleteFileRequest, MessageResponse, SaveFileResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::{PreviewError, Result as StoreResult};

/// Parsed `POST /api/savefile/preview` body.
#[derive(Debug, Default)]
pub struct SaveFileForm {
    /// Target folder name.
    pub folder_name: Option<String>,
    /// Client-supplied filename of the uploaded part.
    pub file_name: Option<String>,
    /// Uploaded bytes.
    pub content: Option<Vec<u8>>,
}

/// 400 reported for uploads over `max_upload_size` bytes.
fn too_large(max_upload_size: u64) -> ApiError {
    ApiError::bad_request(format!(
        "File too large (max {}MB)",
        max_upload_size / 1024 / 1024
    ))
}

/// Map a multipart read failure, reporting body-limit overruns as too large.
fn multipart_error(e: MultipartError, max_upload_size: u64, message: &str) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Upload exceeded body limit: {}", e);
        too_large(max_upload_size)
    } else {
        tracing::warn!("{}: {}", message, e);
        ApiError::bad_request(message)
    }
}

impl SaveFileForm {
    /// Read the multipart fields this endpoint cares about. Unknown fields are skipped.
    pub async fn from_multipart(
        multipart: &mut Multipart,
        max_upload_size: u64,
    ) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, max_upload_size, "Invalid multipart data"))?
        {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "folderName" => {
                    form.folder_name = Some(field.text().await.map_err(|e| {
                        multipart_error(e, max_upload_size, "Invalid folder name")
                    })?);
                }
                "file" => {
                    form.file_name = field.file_name().map(|s| s.to_string());
                    form.content = Some(
                        field
                            .bytes()
                            .await
                            .map_err(|e| {
                                multipart_error(e, max_upload_size, "Failed to read file")
                            })?
                            .to_vec(),
                    );
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Return (folder name, file name, content), or a 400 if anything is missing.
    ///
    /// A file part with no filename counts as missing.
    pub fn into_parts(self) -> Result<(String, String, Vec<u8>), ApiError> {
        match (self.folder_name, self.file_name, self.content) {
            (Some(folder), Some(file), Some(content))
                if !folder.is_empty() && !file.is_empty() =>
            {
                Ok((folder, file, content))
            }
            _ => Err(ApiError::bad_request("Folder name or file is missing")),
        }
    }
}

/// Run a blocking store operation off the async runtime.
async fn run_blocking<T, F>(op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> StoreResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| {
            tracing::error!("Storage task failed: {}", e);
            ApiError::internal("Storage task failed")
        })?
        .map_err(ApiError::from)
}

/// POST /api/savefile/preview - Upload a file into a folder.
///
/// Request body: multipart/form-data with "folderName" and "file" fields.
pub async fn save_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SaveFileResponse>, ApiError> {
    let form = SaveFileForm::from_multipart(&mut multipart, state.max_upload_size).await?;
    let (folder_name, raw_file_name, content) = form.into_parts()?;

    if content.len() as u64 > state.max_upload_size {
        return Err(too_large(state.max_upload_size));
    }

    let file_name = client_file_name(&raw_file_name).to_string();
    if file_name.is_empty() {
        return Err(PreviewError::Validation("file name is empty".to_string()).into());
    }

    let size = content.len();
    let store = state.store.clone();
    let path = {
        let folder_name = folder_name.clone();
        let file_name = file_name.clone();
        run_blocking(move || store.put(&folder_name, &file_name, &content)).await?
    };

    tracing::info!(
        folder = %folder_name,
        file = %file_name,
        size,
        "File uploaded"
    );

    Ok(Json(SaveFileResponse::uploaded(
        path.to_string_lossy().into_owned(),
    )))
}

/// DELETE /api/deletefile - Delete a file from a folder.
///
/// Request body: `{"folderName": "...", "fileName": "..."}`.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<DeleteFileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (folder_name, file_name) = req.into_parts();

    let store = state.store.clone();
    {
        let folder_name = folder_name.clone();
        let file_name = file_name.clone();
        run_blocking(move || store.delete(&folder_name, &file_name)).await?;
    }

    tracing::info!(folder = %folder_name, file = %file_name, "File deleted");

    Ok(Json(MessageResponse::new("File deleted successfully")))
}
