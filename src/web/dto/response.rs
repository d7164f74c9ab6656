//! Response DTOs for Web API.

use serde::Serialize;

/// Successful upload response.
#[derive(Debug, Serialize)]
pub struct SaveFileResponse {
    /// Status message.
    pub message: String,
    /// Absolute path of the stored file.
    pub file_path: String,
}

impl SaveFileResponse {
    /// Create an upload response for the given stored path.
    pub fn uploaded(file_path: impl Into<String>) -> Self {
        Self {
            message: "File uploaded successfully".to_string(),
            file_path: file_path.into(),
        }
    }
}

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Status message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
