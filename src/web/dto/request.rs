//! Request DTOs for Web API.

use serde::Deserialize;
use validator::Validate;

/// File deletion request (`DELETE /api/deletefile`).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileRequest {
    /// Folder containing the file.
    #[serde(default)]
    #[validate(
        required(message = "Folder name or file name is missing"),
        length(min = 1, message = "Folder name or file name is missing")
    )]
    pub folder_name: Option<String>,
    /// Name of the file to delete.
    #[serde(default)]
    #[validate(
        required(message = "Folder name or file name is missing"),
        length(min = 1, message = "Folder name or file name is missing")
    )]
    pub file_name: Option<String>,
}

impl DeleteFileRequest {
    /// Split into (folder name, file name). Missing values become empty strings.
    pub fn into_parts(self) -> (String, String) {
        (
            self.folder_name.unwrap_or_default(),
            self.file_name.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let req: DeleteFileRequest =
            serde_json::from_str(r#"{"folderName": "projectA", "fileName": "logo.png"}"#).unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(
            req.into_parts(),
            ("projectA".to_string(), "logo.png".to_string())
        );
    }

    #[test]
    fn test_missing_fields_fail_validation() {
        let req: DeleteFileRequest = serde_json::from_str(r#"{"folderName": "projectA"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: DeleteFileRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_fields_fail_validation() {
        let req: DeleteFileRequest =
            serde_json::from_str(r#"{"folderName": "", "fileName": "logo.png"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: DeleteFileRequest =
            serde_json::from_str(r#"{"folderName": "projectA", "fileName": null}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
