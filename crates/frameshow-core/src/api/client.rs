//! The seam between the core and the HTTP transport.

use async_trait::async_trait;

use crate::api::dto::{
    DeleteRequest, DeleteResponse, RotateRequest, RotateResponse, StatusResponse,
    TransferRequest, TransferResponse, UploadItem, UploadResponse,
};
use crate::config::slideshow::SlideshowSettings;
use crate::error::CoreResult;

/// Admin server endpoints used by [`crate::session::Session`].
///
/// Implementations own the transport (fetch, reqwest, a test double).
/// Transport failures are reported as [`crate::CoreError::Remote`];
/// per-file failures travel inside the response bodies.
#[async_trait]
pub trait AlbumApi: Send + Sync {
    /// `POST /copy-images`
    async fn copy_images(&self, request: &TransferRequest) -> CoreResult<TransferResponse>;

    /// `POST /move-images`, also used for renames.
    async fn move_images(&self, request: &TransferRequest) -> CoreResult<TransferResponse>;

    /// `POST /delete-images`
    async fn delete_images(&self, request: &DeleteRequest) -> CoreResult<DeleteResponse>;

    /// `POST /rotate-image`
    async fn rotate_image(&self, request: &RotateRequest) -> CoreResult<RotateResponse>;

    /// `POST /upload-images` as a multipart form keyed by album.
    async fn upload_images(&self, items: &[UploadItem]) -> CoreResult<UploadResponse>;

    /// `POST /save-settings`
    async fn save_settings(&self, settings: &SlideshowSettings) -> CoreResult<StatusResponse>;
}
