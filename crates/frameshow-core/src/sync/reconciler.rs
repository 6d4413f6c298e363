//! Applies pushed server events to the album tree.
//!
//! Events are applied in array order through [`FileTree::update`]. A
//! `RESYNC` replaces the tree wholesale when it carries a structure and is
//! the recovery path for any missed or reordered event. One refresh signal
//! is produced per non-empty batch, not per event.

use serde::Deserialize;

use crate::error::CoreResult;
use crate::fs::node::{FileTree, Node};
use crate::fs::path::strip_root_prefix;
use crate::sync::event::{EventBatch, ServerEvent};

/// A busy-indicator change requested by a `LOADING` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingSignal {
    pub loading: bool,
    pub message: String,
}

/// What the view has to do after a batch was applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Events that were decoded and handled.
    pub applied: usize,
    /// Unknown or malformed events that were skipped.
    pub skipped: usize,
    /// Redraw the album tree. Set once for any non-empty batch.
    pub refresh: bool,
    /// Rebuild every derived view (settings, staging, tree).
    pub full_refresh: bool,
    /// Whether a `RESYNC` replaced the tree.
    pub replaced: bool,
    /// Busy-indicator changes, in event order.
    pub loading: Vec<LoadingSignal>,
}

/// Keeps a [`FileTree`] in step with the server's event stream.
#[derive(Debug, Clone)]
pub struct Reconciler {
    root: String,
}

impl Reconciler {
    /// Creates a reconciler for paths under the `root` storage segment.
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// Decodes a raw pushed message and applies it.
    ///
    /// # Errors
    ///
    /// [`crate::CoreError::Payload`] if the message is not an event batch.
    /// Individual bad events are skipped instead.
    pub fn handle_message(&self, tree: &mut FileTree, data: &str) -> CoreResult<ReconcileOutcome> {
        let batch: EventBatch = serde_json::from_str(data)?;
        Ok(self.apply_batch(tree, &batch))
    }

    /// Applies every event of `batch` in order.
    pub fn apply_batch(&self, tree: &mut FileTree, batch: &EventBatch) -> ReconcileOutcome {
        let mut outcome = ReconcileOutcome::default();
        for raw in &batch.events {
            match ServerEvent::deserialize(raw) {
                Ok(event) => {
                    self.apply(tree, &event, &mut outcome);
                    outcome.applied += 1;
                }
                Err(e) => {
                    let kind = raw.get("event").and_then(|v| v.as_str()).unwrap_or("?");
                    tracing::warn!("Skipping unknown or malformed event {kind}: {e}");
                    outcome.skipped += 1;
                }
            }
        }
        outcome.refresh = !batch.is_empty();
        outcome
    }

    /// Applies a single decoded event.
    pub fn apply(&self, tree: &mut FileTree, event: &ServerEvent, outcome: &mut ReconcileOutcome) {
        match event {
            ServerEvent::Put { path } => {
                let path = strip_root_prefix(path, &self.root);
                tracing::debug!("PUT event: {path}");
                tree.update("", path);
            }
            ServerEvent::Delete { path } => {
                let path = strip_root_prefix(path, &self.root);
                tracing::debug!("DELETE event: {path}");
                tree.update(path, "");
            }
            ServerEvent::Move { path, new_path } => {
                let old = strip_root_prefix(path, &self.root);
                let new = strip_root_prefix(new_path, &self.root);
                tracing::debug!("MOVE event: {old} -> {new}");
                tree.update(old, new);
            }
            ServerEvent::Resync { file_structure } => {
                if let Some(structure) = file_structure {
                    match structure.root().get(&self.root) {
                        Some(Node::Folder(children)) => {
                            tree.replace(FileTree::from_root(children.clone()));
                            outcome.replaced = true;
                            tracing::info!("RESYNC event: replaced album tree");
                        }
                        _ => tracing::warn!(
                            "RESYNC event: structure has no '{}' folder, keeping tree",
                            self.root
                        ),
                    }
                } else {
                    tracing::info!("RESYNC event without structure");
                }
                outcome.full_refresh = true;
            }
            ServerEvent::Loading { loading, message } => {
                let message = message.clone().unwrap_or_default();
                tracing::debug!("LOADING event: {loading} - {message}");
                outcome.loading.push(LoadingSignal {
                    loading: *loading,
                    message,
                });
            }
        }
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(crate::fs::path::DEFAULT_ROOT_PREFIX)
    }
}
