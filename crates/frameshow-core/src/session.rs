//! The admin panel's state and its server-backed operations.
//!
//! A [`Session`] owns the album tree and everything derived from it. Bulk
//! operations go through an [`AlbumApi`] and touch the tree only after the
//! server answered. Each of them ends selection mode once its input passed
//! local validation.

use crate::api::client::AlbumApi;
use crate::api::dto::{DeleteRequest, TransferRequest, STATUS_OK};
use crate::api::outcome::{apply_delete, apply_transfer, BulkOperation, FailureReport};
use crate::api::PathPair;
use crate::config::settings::Config;
use crate::config::slideshow::SlideshowSettings;
use crate::error::{CoreError, CoreResult};
use crate::fs::node::{FileTree, Node};
use crate::fs::path::{
    is_image, join, sanitize_name, secure_path, strip_root_prefix, with_root_prefix,
};
use crate::preview::PreviewState;
use crate::select::{generate_path_pairs, rename_pairs, CheckboxEffect, Selection};
use crate::staging::{UploadReport, UploadStaging};
use crate::sync::{EventBatch, ReconcileOutcome, Reconciler};

/// Client-side state of one admin panel.
#[derive(Debug, Clone)]
pub struct Session {
    tree: FileTree,
    selection: Selection,
    settings: SlideshowSettings,
    defaults: SlideshowSettings,
    staging: UploadStaging,
    preview: PreviewState,
    reconciler: Reconciler,
    root: String,
}

impl Session {
    /// Creates a session over the initial album tree.
    ///
    /// The current settings start out as the configured defaults.
    pub fn new(config: &Config, tree: FileTree) -> Self {
        Self::with_settings(config, tree, config.slideshow.clone())
    }

    /// Creates a session whose current settings came from the server.
    pub fn with_settings(config: &Config, tree: FileTree, settings: SlideshowSettings) -> Self {
        let root = config.storage.root_prefix.clone();
        Self {
            tree,
            selection: Selection::new(),
            settings,
            defaults: config.slideshow.clone(),
            staging: UploadStaging::new(),
            preview: PreviewState::new(),
            reconciler: Reconciler::new(root.clone()),
            root,
        }
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn settings(&self) -> &SlideshowSettings {
        &self.settings
    }

    pub fn staging(&self) -> &UploadStaging {
        &self.staging
    }

    pub fn staging_mut(&mut self) -> &mut UploadStaging {
        &mut self.staging
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut PreviewState {
        &mut self.preview
    }

    /// The storage root segment carried by server paths.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Creates `folder_path/folder_name` and returns the new path.
    ///
    /// The path is secured segment by segment and the name sanitized.
    /// Creating an existing folder is a no-op.
    ///
    /// # Errors
    ///
    /// - [`CoreError::EmptyField`] if either field is empty.
    /// - [`CoreError::NotAFolder`] if the name reads as an image, or if it or
    ///   an ancestor is a file.
    pub fn create_folder(&mut self, folder_path: &str, folder_name: &str) -> CoreResult<String> {
        let parent = secure_path(folder_path.trim());
        if parent.is_empty() {
            return Err(CoreError::EmptyField("Folder path"));
        }
        let name = sanitize_name(folder_name.trim());
        if name.is_empty() {
            return Err(CoreError::EmptyField("Folder name"));
        }

        let path = join(&parent, &name);
        if is_image(&name) {
            return Err(CoreError::NotAFolder(path));
        }
        match self.tree.get(&path) {
            Some(Node::Folder(_)) => return Ok(path),
            Some(Node::File) => return Err(CoreError::NotAFolder(path)),
            None => {}
        }
        if !self.tree.update("", &path) {
            return Err(CoreError::NotAFolder(parent));
        }
        tracing::info!("Created folder {path}");
        Ok(path)
    }

    /// Switches selection mode; leaving it clears the selection.
    pub fn toggle_selection_mode(&mut self) -> Vec<CheckboxEffect> {
        self.selection.toggle_mode()
    }

    /// Ticks or unticks the checkbox of `path`.
    pub fn toggle(&mut self, path: &str, checked: bool) -> CoreResult<Vec<CheckboxEffect>> {
        self.selection.toggle(&self.tree, path, checked)
    }

    /// Copies the selection into the `target` album.
    pub async fn copy_selected(
        &mut self,
        api: &dyn AlbumApi,
        target: &str,
    ) -> CoreResult<FailureReport> {
        self.transfer(api, BulkOperation::Copy, target).await
    }

    /// Moves the selection into the `target` album.
    pub async fn move_selected(
        &mut self,
        api: &dyn AlbumApi,
        target: &str,
    ) -> CoreResult<FailureReport> {
        self.transfer(api, BulkOperation::Move, target).await
    }

    async fn transfer(
        &mut self,
        api: &dyn AlbumApi,
        operation: BulkOperation,
        target: &str,
    ) -> CoreResult<FailureReport> {
        let target = target.trim();
        if target.is_empty() {
            return Err(CoreError::EmptyField("Target album"));
        }
        let pairs = generate_path_pairs(&self.selection, target, &self.root);
        let result = self.send_transfer(api, operation, pairs).await;
        self.leave_selection_mode();
        result
    }

    /// Deletes every selected file.
    pub async fn delete_selected(&mut self, api: &dyn AlbumApi) -> CoreResult<FailureReport> {
        let files: Vec<String> = self
            .selection
            .files()
            .flatten_to_paths()
            .iter()
            .map(|path| secure_path(&with_root_prefix(path, &self.root)))
            .collect();

        let result = if files.is_empty() {
            Ok(FailureReport::empty(BulkOperation::Delete))
        } else {
            let request = DeleteRequest { files };
            api.delete_images(&request)
                .await
                .map(|response| apply_delete(&mut self.tree, &request.files, &response, &self.root))
        };
        self.leave_selection_mode();
        result
    }

    /// Renames the single selected file or folder.
    ///
    /// # Errors
    ///
    /// - [`CoreError::EmptyField`] if nothing of `new_name` survives
    ///   sanitizing.
    /// - [`CoreError::InvalidSelection`] unless exactly one item is selected.
    pub async fn rename_selected(
        &mut self,
        api: &dyn AlbumApi,
        new_name: &str,
    ) -> CoreResult<FailureReport> {
        let name = sanitize_name(new_name.trim());
        let pairs = rename_pairs(&self.selection, &name, &self.root)?;
        let result = self.send_transfer(api, BulkOperation::Rename, pairs).await;
        self.leave_selection_mode();
        result
    }

    async fn send_transfer(
        &mut self,
        api: &dyn AlbumApi,
        operation: BulkOperation,
        pairs: Vec<PathPair>,
    ) -> CoreResult<FailureReport> {
        if pairs.is_empty() {
            tracing::debug!("Nothing to send for {operation:?}");
            return Ok(FailureReport::empty(operation));
        }
        let request = TransferRequest { files: pairs };
        let response = match operation {
            BulkOperation::Copy => api.copy_images(&request).await?,
            _ => api.move_images(&request).await?,
        };
        Ok(apply_transfer(
            &mut self.tree,
            operation,
            &request.files,
            &response,
            &self.root,
        ))
    }

    fn leave_selection_mode(&mut self) {
        if self.selection.is_active() {
            self.selection.toggle_mode();
        }
    }

    /// Saves the pending rotation of the previewed image.
    ///
    /// The server stores the rotated image under a new name, which the tree
    /// and the preview follow. Returns that path, or `None` when nothing was
    /// pending.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotRotatable`] if the preview is not a JPEG.
    /// - [`CoreError::Remote`] if the server refused the rotation.
    pub async fn rotate_preview(&mut self, api: &dyn AlbumApi) -> CoreResult<Option<String>> {
        let Some(request) = self.preview.rotate_request(&self.root)? else {
            return Ok(None);
        };
        let response = api.rotate_image(&request).await?;
        if response.status != STATUS_OK {
            return Err(CoreError::Remote(
                response
                    .message
                    .unwrap_or_else(|| format!("rotation failed: {}", response.status)),
            ));
        }
        let Some(new_path) = response.new_path else {
            return Err(CoreError::Remote(
                "rotation response has no newPath".to_string(),
            ));
        };

        let old = strip_root_prefix(&request.path, &self.root);
        let new = strip_root_prefix(&new_path, &self.root).to_string();
        self.tree.update(old, &new);
        self.preview.open(new.clone());
        tracing::info!("Rotated {old} by {} degrees", request.rotation);
        Ok(Some(new))
    }

    /// Uploads the staged images.
    ///
    /// # Errors
    ///
    /// - [`CoreError::UnsupportedFile`] / [`CoreError::MissingAlbum`] if the
    ///   staging list does not validate; nothing is sent.
    /// - [`CoreError::Remote`] if the server rejected the whole upload.
    pub async fn upload_staged(&mut self, api: &dyn AlbumApi) -> CoreResult<UploadReport> {
        let items = self.staging.validate()?;
        if items.is_empty() {
            return Ok(UploadReport::default());
        }
        let response = api.upload_images(&items).await?;
        if response.status != STATUS_OK {
            return Err(CoreError::Remote(format!(
                "upload failed: {}",
                response.status
            )));
        }
        let report = self.staging.complete(&mut self.tree, &response);
        tracing::info!(
            "Uploaded {} image(s), {} failed",
            report.uploaded.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Saves `form` as the slideshow settings.
    ///
    /// Values are clamped first. Returns `false` without a request when
    /// nothing changed. The settings are kept only once the server accepted
    /// them.
    pub async fn save_settings(
        &mut self,
        api: &dyn AlbumApi,
        form: SlideshowSettings,
    ) -> CoreResult<bool> {
        let form = SlideshowSettings::from_form(
            &form.album,
            i64::from(form.is_enabled),
            i64::from(form.blend),
            i64::from(form.speed),
            form.randomize,
        );
        if form == self.settings {
            tracing::debug!("Settings unchanged, not saving");
            return Ok(false);
        }
        let response = api.save_settings(&form).await?;
        if !response.is_ok() {
            return Err(CoreError::Remote(format!(
                "failed to save settings: {}",
                response.status
            )));
        }
        self.settings = form;
        Ok(true)
    }

    /// Saves the configured default settings.
    pub async fn reset_settings(&mut self, api: &dyn AlbumApi) -> CoreResult<bool> {
        let defaults = self.defaults.clone();
        self.save_settings(api, defaults).await
    }

    /// Applies a batch of pushed server events to the tree.
    pub fn apply_events(&mut self, batch: &EventBatch) -> ReconcileOutcome {
        self.reconciler.apply_batch(&mut self.tree, batch)
    }

    /// Decodes and applies a raw pushed message.
    pub fn handle_message(&mut self, data: &str) -> CoreResult<ReconcileOutcome> {
        self.reconciler.handle_message(&mut self.tree, data)
    }

    /// Albums the slideshow can play: folders with at least one image.
    pub fn album_choices(&self) -> Vec<String> {
        self.tree.list_folder_paths(true)
    }

    /// Every folder, for the upload and target-album pickers.
    pub fn upload_album_choices(&self) -> Vec<String> {
        self.tree.list_folder_paths(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{
        DeleteResponse, RotateRequest, RotateResponse, StatusResponse, TransferResponse,
        UploadItem, UploadResponse, COPY_IMAGES, DELETE_IMAGES, MOVE_IMAGES, ROTATE_IMAGE,
        SAVE_SETTINGS, UPLOAD_IMAGES,
    };
    use crate::sync::ServerEvent;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Records every request and answers with canned responses.
    struct MockApi {
        log: Mutex<Vec<(&'static str, Value)>>,
        transfer_failed: Vec<String>,
        delete_failed: Vec<String>,
        rotate: RotateResponse,
        upload: UploadResponse,
        settings_status: String,
    }

    impl Default for MockApi {
        fn default() -> Self {
            Self {
                log: Mutex::new(Vec::new()),
                transfer_failed: Vec::new(),
                delete_failed: Vec::new(),
                rotate: RotateResponse {
                    status: "ok".into(),
                    new_path: None,
                    message: None,
                },
                upload: UploadResponse {
                    status: "ok".into(),
                    failed: Vec::new(),
                },
                settings_status: "ok".into(),
            }
        }
    }

    impl MockApi {
        fn record(&self, endpoint: &'static str, body: Value) {
            self.log.lock().unwrap().push((endpoint, body));
        }

        fn requests(&self) -> Vec<(&'static str, Value)> {
            self.log.lock().unwrap().clone()
        }

        fn transfer_response(&self) -> TransferResponse {
            TransferResponse {
                status: Some("ok".into()),
                failed: self
                    .transfer_failed
                    .iter()
                    .map(|p| (p.clone(), "refused".to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl AlbumApi for MockApi {
        async fn copy_images(&self, request: &TransferRequest) -> CoreResult<TransferResponse> {
            self.record(COPY_IMAGES, serde_json::to_value(request)?);
            Ok(self.transfer_response())
        }

        async fn move_images(&self, request: &TransferRequest) -> CoreResult<TransferResponse> {
            self.record(MOVE_IMAGES, serde_json::to_value(request)?);
            Ok(self.transfer_response())
        }

        async fn delete_images(&self, request: &DeleteRequest) -> CoreResult<DeleteResponse> {
            self.record(DELETE_IMAGES, serde_json::to_value(request)?);
            Ok(DeleteResponse {
                failed: self.delete_failed.clone(),
            })
        }

        async fn rotate_image(&self, request: &RotateRequest) -> CoreResult<RotateResponse> {
            self.record(ROTATE_IMAGE, serde_json::to_value(request)?);
            Ok(self.rotate.clone())
        }

        async fn upload_images(&self, items: &[UploadItem]) -> CoreResult<UploadResponse> {
            self.record(UPLOAD_IMAGES, serde_json::to_value(items)?);
            Ok(self.upload.clone())
        }

        async fn save_settings(&self, settings: &SlideshowSettings) -> CoreResult<StatusResponse> {
            self.record(SAVE_SETTINGS, serde_json::to_value(settings)?);
            Ok(StatusResponse {
                status: self.settings_status.clone(),
            })
        }
    }

    fn tree(json: &str) -> FileTree {
        serde_json::from_str(json).unwrap()
    }

    fn session() -> Session {
        Session::new(
            &Config::default(),
            tree(
                r#"{
                    "Shared": {"trip": {"1.a.jpg": "", "2.b.jpg": ""}, "3.c.jpg": ""},
                    "alice": {"cats": {}}
                }"#,
            ),
        )
    }

    fn selecting(paths: &[&str]) -> Session {
        let mut s = session();
        s.toggle_selection_mode();
        for path in paths {
            s.toggle(path, true).unwrap();
        }
        s
    }

    #[test]
    fn create_folder_requires_both_fields() {
        let mut s = session();
        let before = s.tree().clone();
        assert!(matches!(
            s.create_folder("", "x"),
            Err(CoreError::EmptyField("Folder path"))
        ));
        assert!(matches!(
            s.create_folder("alice", "  "),
            Err(CoreError::EmptyField("Folder name"))
        ));
        assert_eq!(s.tree(), &before);
    }

    #[test]
    fn create_folder_sanitizes_the_name() {
        let mut s = session();
        let path = s.create_folder("alice", "Summer Trip!").unwrap();
        assert_eq!(path, "alice/Summer_Trip");
        assert!(s.tree().get(&path).unwrap().is_folder());
    }

    #[test]
    fn create_folder_refuses_image_names() {
        let mut s = session();
        let before = s.tree().clone();
        assert!(matches!(
            s.create_folder("alice", "old.jpg"),
            Err(CoreError::NotAFolder(_))
        ));
        assert_eq!(s.tree(), &before);
    }

    #[test]
    fn create_folder_builds_missing_parents() {
        let mut s = session();
        let path = s.create_folder("bob/2024", "summer").unwrap();
        assert_eq!(path, "bob/2024/summer");
        assert!(s.tree().get("bob/2024").unwrap().is_folder());
        assert!(s.tree().get(&path).unwrap().is_folder());
    }

    #[test]
    fn create_folder_keeps_existing_content() {
        let mut s = session();
        s.create_folder("Shared", "trip").unwrap();
        assert!(s.tree().contains("Shared/trip/1.a.jpg"));
    }

    #[test]
    fn create_folder_under_a_file_fails() {
        let mut s = session();
        assert!(matches!(
            s.create_folder("Shared/3.c.jpg", "x"),
            Err(CoreError::NotAFolder(_))
        ));
    }

    #[tokio::test]
    async fn copy_folder_recreates_it_under_target() {
        let api = MockApi::default();
        let mut s = selecting(&["Shared/trip"]);

        let report = s.copy_selected(&api, "alice/cats").await.unwrap();

        assert!(report.is_clean());
        assert_eq!(report.succeeded, 2);
        assert!(s.tree().contains("Shared/trip/1.a.jpg"));
        assert!(s.tree().contains("alice/cats/trip/1.a.jpg"));
        assert!(s.tree().contains("alice/cats/trip/2.b.jpg"));
        assert!(!s.selection().is_active());
        assert_eq!(s.selection().count(), 0);

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, COPY_IMAGES);
        assert_eq!(
            requests[0].1["files"][0],
            json!({"oldPath": "albums/Shared/trip/1.a.jpg", "newPath": "albums/alice/cats/trip/1.a.jpg"})
        );
    }

    #[tokio::test]
    async fn move_leaves_failed_files_in_place() {
        let api = MockApi {
            transfer_failed: vec!["albums/Shared/trip/2.b.jpg".into()],
            ..MockApi::default()
        };
        let mut s = selecting(&["Shared/trip"]);

        let report = s.move_selected(&api, "alice/cats").await.unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(
            report.message().unwrap(),
            "Failed to move the following files:\nalbums/Shared/trip/2.b.jpg"
        );
        assert!(!s.tree().contains("Shared/trip/1.a.jpg"));
        assert!(s.tree().contains("Shared/trip/2.b.jpg"));
        assert!(s.tree().contains("alice/cats/trip/1.a.jpg"));
        assert!(!s.selection().is_active());
    }

    #[tokio::test]
    async fn empty_target_sends_nothing() {
        let api = MockApi::default();
        let mut s = selecting(&["Shared/3.c.jpg"]);

        let err = s.move_selected(&api, " ").await.unwrap_err();

        assert!(matches!(err, CoreError::EmptyField("Target album")));
        assert!(api.requests().is_empty());
        assert!(s.selection().is_active());
    }

    #[tokio::test]
    async fn empty_selection_skips_the_request() {
        let api = MockApi::default();
        let mut s = selecting(&[]);

        let report = s.copy_selected(&api, "alice").await.unwrap();

        assert_eq!(report, FailureReport::empty(BulkOperation::Copy));
        assert!(api.requests().is_empty());
        assert!(!s.selection().is_active());
    }

    #[tokio::test]
    async fn delete_removes_confirmed_files_and_prunes() {
        let api = MockApi {
            delete_failed: vec!["albums/Shared/3.c.jpg".into()],
            ..MockApi::default()
        };
        let mut s = selecting(&["Shared/trip", "Shared/3.c.jpg"]);

        let report = s.delete_selected(&api).await.unwrap();

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, vec!["albums/Shared/3.c.jpg"]);
        assert!(s.tree().get("Shared/trip").is_none());
        assert!(s.tree().contains("Shared/3.c.jpg"));
        assert_eq!(api.requests()[0].0, DELETE_IMAGES);
        assert!(!s.selection().is_active());
    }

    #[tokio::test]
    async fn rename_file_keeps_id_and_extension() {
        let api = MockApi::default();
        let mut s = selecting(&["Shared/3.c.jpg"]);

        s.rename_selected(&api, "Beach day").await.unwrap();

        assert!(s.tree().contains("Shared/3.Beach_day.jpg"));
        assert!(!s.tree().contains("Shared/3.c.jpg"));
        let requests = api.requests();
        assert_eq!(requests[0].0, MOVE_IMAGES);
        assert_eq!(
            requests[0].1["files"][0]["newPath"],
            "albums/Shared/3.Beach_day.jpg"
        );
    }

    #[tokio::test]
    async fn rename_folder_rebases_its_files() {
        let api = MockApi::default();
        let mut s = selecting(&["Shared/trip"]);

        let report = s.rename_selected(&api, "holiday").await.unwrap();

        assert_eq!(report.succeeded, 2);
        assert!(s.tree().contains("Shared/holiday/1.a.jpg"));
        assert!(s.tree().contains("Shared/holiday/2.b.jpg"));
        assert!(s.tree().get("Shared/trip").is_none());
    }

    #[tokio::test]
    async fn rename_needs_exactly_one_item() {
        let api = MockApi::default();
        let mut s = selecting(&["Shared/trip", "Shared/3.c.jpg"]);

        let err = s.rename_selected(&api, "x").await.unwrap_err();

        assert!(matches!(err, CoreError::InvalidSelection(_)));
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn rename_rejects_empty_name() {
        let api = MockApi::default();
        let mut s = selecting(&["Shared/3.c.jpg"]);
        assert!(matches!(
            s.rename_selected(&api, "???").await,
            Err(CoreError::EmptyField(_))
        ));
    }

    #[tokio::test]
    async fn rotate_follows_the_new_path() {
        let api = MockApi {
            rotate: RotateResponse {
                status: "ok".into(),
                new_path: Some("albums/Shared/9.c.jpg".into()),
                message: None,
            },
            ..MockApi::default()
        };
        let mut s = session();
        s.preview_mut().open("Shared/3.c.jpg");
        s.preview_mut().rotate().unwrap();

        let new = s.rotate_preview(&api).await.unwrap();

        assert_eq!(new.as_deref(), Some("Shared/9.c.jpg"));
        assert!(s.tree().contains("Shared/9.c.jpg"));
        assert!(!s.tree().contains("Shared/3.c.jpg"));
        assert_eq!(s.preview().path(), Some("Shared/9.c.jpg"));
        assert_eq!(s.preview().rotation(), 0);
        assert_eq!(
            api.requests()[0].1,
            json!({"path": "albums/Shared/3.c.jpg", "rotation": 90})
        );
    }

    #[tokio::test]
    async fn rotate_without_pending_turn_sends_nothing() {
        let api = MockApi::default();
        let mut s = session();
        s.preview_mut().open("Shared/3.c.jpg");
        assert_eq!(s.rotate_preview(&api).await.unwrap(), None);
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn rotate_failure_reports_server_message() {
        let api = MockApi {
            rotate: RotateResponse {
                status: "error".into(),
                new_path: None,
                message: Some("disk full".into()),
            },
            ..MockApi::default()
        };
        let mut s = session();
        s.preview_mut().open("Shared/3.c.jpg");
        s.preview_mut().rotate().unwrap();

        let err = s.rotate_preview(&api).await.unwrap_err();

        assert!(matches!(err, CoreError::Remote(ref m) if m == "disk full"));
        assert!(s.tree().contains("Shared/3.c.jpg"));
    }

    #[tokio::test]
    async fn upload_inserts_accepted_files() {
        let api = MockApi {
            upload: UploadResponse {
                status: "ok".into(),
                failed: vec!["b.png".into()],
            },
            ..MockApi::default()
        };
        let mut s = session();
        s.staging_mut().add("a.jpg");
        s.staging_mut().add("b.png");
        s.staging_mut().assign_all("alice/cats");

        let report = s.upload_staged(&api).await.unwrap();

        assert_eq!(report.uploaded, vec!["alice/cats/a.jpg"]);
        assert!(s.tree().contains("alice/cats/a.jpg"));
        assert_eq!(s.staging().len(), 1);
        assert_eq!(api.requests()[0].0, UPLOAD_IMAGES);
    }

    #[tokio::test]
    async fn upload_validates_before_sending() {
        let api = MockApi::default();
        let mut s = session();
        s.staging_mut().add("a.jpg");

        let err = s.upload_staged(&api).await.unwrap_err();

        assert!(matches!(err, CoreError::MissingAlbum(_)));
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn unchanged_settings_are_not_sent() {
        let api = MockApi::default();
        let mut s = session();
        let saved = s.save_settings(&api, SlideshowSettings::default()).await.unwrap();
        assert!(!saved);
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn settings_are_kept_only_when_accepted() {
        let mut s = session();
        let form = SlideshowSettings {
            album: "alice/cats".into(),
            speed: 500,
            ..SlideshowSettings::default()
        };

        let refused = MockApi {
            settings_status: "error".into(),
            ..MockApi::default()
        };
        assert!(s.save_settings(&refused, form.clone()).await.is_err());
        assert_eq!(s.settings(), &SlideshowSettings::default());

        let api = MockApi::default();
        assert!(s.save_settings(&api, form).await.unwrap());
        assert_eq!(s.settings().album, "alice/cats");
        assert_eq!(s.settings().speed, 180);
        assert_eq!(api.requests()[0].1["speed"], 180);
    }

    #[tokio::test]
    async fn reset_restores_configured_defaults() {
        let api = MockApi::default();
        let mut s = Session::with_settings(
            &Config::default(),
            FileTree::new(),
            SlideshowSettings {
                randomize: true,
                ..SlideshowSettings::default()
            },
        );

        assert!(s.reset_settings(&api).await.unwrap());
        assert_eq!(s.settings(), &SlideshowSettings::default());
    }

    #[test]
    fn events_update_the_tree() {
        let mut s = session();
        let batch = EventBatch::from_events(&[
            ServerEvent::Put {
                path: "albums/alice/cats/1.x.jpg".into(),
            },
            ServerEvent::Delete {
                path: "albums/Shared/3.c.jpg".into(),
            },
        ]);

        let outcome = s.apply_events(&batch);

        assert_eq!(outcome.applied, 2);
        assert!(outcome.refresh);
        assert!(s.tree().contains("alice/cats/1.x.jpg"));
        assert!(!s.tree().contains("Shared/3.c.jpg"));
    }

    #[test]
    fn raw_message_is_decoded() {
        let mut s = session();
        let outcome = s
            .handle_message(r#"{"events": [{"event": "PUT", "path": "albums/bob/1.y.jpg"}]}"#)
            .unwrap();
        assert_eq!(outcome.applied, 1);
        assert!(s.tree().contains("bob/1.y.jpg"));
    }

    #[test]
    fn album_choices_skip_empty_folders() {
        let s = session();
        assert_eq!(s.album_choices(), vec!["Shared", "Shared/trip"]);
        assert_eq!(
            s.upload_album_choices(),
            vec!["Shared", "Shared/trip", "alice", "alice/cats"]
        );
    }
}
