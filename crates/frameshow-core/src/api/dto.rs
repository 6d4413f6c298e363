//! Request and response bodies of the admin server's JSON API.
//!
//! Every path in these types carries the storage root segment
//! (`albums/...`); the tree model never does.

use serde::{Deserialize, Serialize};

pub const COPY_IMAGES: &str = "/copy-images";
pub const MOVE_IMAGES: &str = "/move-images";
pub const DELETE_IMAGES: &str = "/delete-images";
pub const ROTATE_IMAGE: &str = "/rotate-image";
pub const UPLOAD_IMAGES: &str = "/upload-images";
pub const SAVE_SETTINGS: &str = "/save-settings";

/// `status` value the server sends on success.
pub const STATUS_OK: &str = "ok";

/// One file relocation for copy, move and rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPair {
    pub old_path: String,
    pub new_path: String,
}

impl PathPair {
    pub fn new(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        Self {
            old_path: old_path.into(),
            new_path: new_path.into(),
        }
    }
}

/// Body of `/copy-images` and `/move-images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub files: Vec<PathPair>,
}

/// Response of `/copy-images` and `/move-images`.
///
/// `failed` lists `[oldPath, reason]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub failed: Vec<(String, String)>,
}

impl TransferResponse {
    /// Old paths the server could not process.
    pub fn failed_paths(&self) -> Vec<&str> {
        self.failed.iter().map(|(path, _)| path.as_str()).collect()
    }
}

/// Body of `/delete-images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub files: Vec<String>,
}

/// Response of `/delete-images`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub failed: Vec<String>,
}

/// Body of `/rotate-image`. `rotation` is 90, 180 or 270 degrees clockwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotateRequest {
    pub path: String,
    pub rotation: u16,
}

/// Response of `/rotate-image`. A rotated image is stored under `newPath`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotateResponse {
    pub status: String,
    #[serde(default)]
    pub new_path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One staged image handed to `/upload-images`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadItem {
    pub album: String,
    pub file_name: String,
}

/// Response of `/upload-images`. `failed` lists staged file names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    #[serde(default)]
    pub failed: Vec<String>,
}

/// Bare `{status}` response, as returned by `/save-settings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_pair_uses_camel_case() {
        let json = serde_json::to_string(&PathPair::new("albums/a.jpg", "albums/b.jpg")).unwrap();
        assert_eq!(json, r#"{"oldPath":"albums/a.jpg","newPath":"albums/b.jpg"}"#);
    }

    #[test]
    fn transfer_response_reads_failed_pairs() {
        let resp: TransferResponse = serde_json::from_str(
            r#"{"status": "ok", "failed": [["albums/a.jpg", "exists"], ["albums/b.jpg", "denied"]]}"#,
        )
        .unwrap();
        assert_eq!(resp.failed_paths(), vec!["albums/a.jpg", "albums/b.jpg"]);
    }

    #[test]
    fn missing_failed_list_defaults_to_empty() {
        let transfer: TransferResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(transfer.failed.is_empty());
        let delete: DeleteResponse = serde_json::from_str("{}").unwrap();
        assert!(delete.failed.is_empty());
    }

    #[test]
    fn rotate_response_reads_new_path() {
        let resp: RotateResponse =
            serde_json::from_str(r#"{"status": "ok", "newPath": "albums/x/1.a.jpg"}"#).unwrap();
        assert_eq!(resp.new_path.as_deref(), Some("albums/x/1.a.jpg"));
        assert!(resp.message.is_none());
    }

    #[test]
    fn upload_item_uses_camel_case() {
        let item = UploadItem {
            album: "Shared".into(),
            file_name: "a.jpg".into(),
        };
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"album":"Shared","fileName":"a.jpg"}"#
        );
    }

    #[test]
    fn status_response_ok() {
        let ok: StatusResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        let err: StatusResponse = serde_json::from_str(r#"{"status": "error"}"#).unwrap();
        assert!(ok.is_ok());
        assert!(!err.is_ok());
    }
}
