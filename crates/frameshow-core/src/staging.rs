//! Images waiting to be uploaded.
//!
//! Each staged file is keyed by its sanitized name and needs an album
//! before the batch can be sent. Files the server rejects stay staged.

use std::collections::BTreeMap;

use crate::api::dto::{UploadItem, UploadResponse};
use crate::error::{CoreError, CoreResult};
use crate::fs::node::FileTree;
use crate::fs::path::{is_image, join, sanitize_name};

/// The upload staging list.
#[derive(Debug, Clone, Default)]
pub struct UploadStaging {
    files: BTreeMap<String, String>,
}

/// Outcome of an upload once the tree was updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// Album paths of the files that were added to the tree.
    pub uploaded: Vec<String>,
    /// Staged names the server rejected.
    pub failed: Vec<String>,
}

impl UploadReport {
    /// Summary line shown after an upload.
    pub fn message(&self) -> String {
        let mut msg = format!("Successfully uploaded {} image(s).", self.uploaded.len());
        if !self.failed.is_empty() {
            msg.push_str("\nFailed to upload:\n");
            msg.push_str(&self.failed.join("\n"));
        }
        msg
    }
}

impl UploadStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a file under its sanitized name with no album yet.
    ///
    /// Returns the staging key, or `None` if nothing of the name survives
    /// sanitizing. Re-staging a name resets its album.
    pub fn add(&mut self, file_name: &str) -> Option<String> {
        let key = sanitize_name(file_name);
        if key.is_empty() {
            return None;
        }
        self.files.insert(key.clone(), String::new());
        Some(key)
    }

    /// Drops a staged file. Returns whether it was staged.
    pub fn remove(&mut self, name: &str) -> bool {
        self.files.remove(name).is_some()
    }

    /// Assigns `album` to one staged file.
    pub fn assign(&mut self, name: &str, album: &str) -> CoreResult<()> {
        match self.files.get_mut(name) {
            Some(slot) => {
                *slot = album.to_string();
                Ok(())
            }
            None => Err(CoreError::NotFound(name.to_string())),
        }
    }

    /// Assigns `album` to every staged file.
    pub fn assign_all(&mut self, album: &str) {
        for slot in self.files.values_mut() {
            *slot = album.to_string();
        }
    }

    /// The album assigned to `name`; empty if none yet.
    pub fn album_of(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Checks the batch and returns what to send.
    ///
    /// # Errors
    ///
    /// - [`CoreError::UnsupportedFile`] for a non-image file.
    /// - [`CoreError::MissingAlbum`] for a file without an album.
    pub fn validate(&self) -> CoreResult<Vec<UploadItem>> {
        self.files
            .iter()
            .map(|(name, album)| {
                if !is_image(name) {
                    return Err(CoreError::UnsupportedFile(name.clone()));
                }
                if album.trim().is_empty() {
                    return Err(CoreError::MissingAlbum(name.clone()));
                }
                Ok(UploadItem {
                    album: album.clone(),
                    file_name: name.clone(),
                })
            })
            .collect()
    }

    /// Adds the accepted files to `tree` and keeps only the rejected ones.
    pub fn complete(&mut self, tree: &mut FileTree, response: &UploadResponse) -> UploadReport {
        let mut report = UploadReport::default();
        let staged = std::mem::take(&mut self.files);
        for (name, album) in staged {
            if response.failed.contains(&name) {
                report.failed.push(name.clone());
                self.files.insert(name, album);
            } else {
                let path = join(&album, &name);
                tree.update("", &path);
                report.uploaded.push(path);
            }
        }
        report
    }
}
