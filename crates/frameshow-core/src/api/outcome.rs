//! Applying server results of bulk operations to the album tree.
//!
//! The tree is only touched after the server answered, and only for the
//! paths it did not report as failed. Failures are collected into one
//! [`FailureReport`] for the user.

use crate::api::dto::{DeleteResponse, PathPair, TransferResponse};
use crate::fs::node::FileTree;
use crate::fs::path::strip_root_prefix;

/// Bulk operations that may partially fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOperation {
    Copy,
    Move,
    Rename,
    Delete,
}

impl BulkOperation {
    fn verb(self) -> &'static str {
        match self {
            BulkOperation::Copy => "copy",
            BulkOperation::Move => "move",
            BulkOperation::Rename => "rename",
            BulkOperation::Delete => "delete",
        }
    }
}

/// Result of a bulk operation after the tree was reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub operation: BulkOperation,
    pub succeeded: usize,
    /// Server paths (with the root segment) that failed.
    pub failed: Vec<String>,
}

impl FailureReport {
    /// A report for an operation that sent nothing.
    pub fn empty(operation: BulkOperation) -> Self {
        Self {
            operation,
            succeeded: 0,
            failed: Vec::new(),
        }
    }

    /// Returns `true` if nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// The aggregated message shown to the user, if anything failed.
    pub fn message(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        Some(format!(
            "Failed to {} the following files:\n{}",
            self.operation.verb(),
            self.failed.join("\n")
        ))
    }
}

/// Applies a copy, move or rename result.
///
/// A copy creates each new path; a move or rename relocates old to new.
pub fn apply_transfer(
    tree: &mut FileTree,
    operation: BulkOperation,
    pairs: &[PathPair],
    response: &TransferResponse,
    root: &str,
) -> FailureReport {
    let failed = response.failed_paths();
    let mut succeeded = 0;
    for pair in pairs.iter().filter(|p| !failed.contains(&p.old_path.as_str())) {
        let new_path = strip_root_prefix(&pair.new_path, root);
        match operation {
            BulkOperation::Copy => {
                tree.update("", new_path);
            }
            _ => {
                tree.update(strip_root_prefix(&pair.old_path, root), new_path);
            }
        }
        succeeded += 1;
    }
    let report = FailureReport {
        operation,
        succeeded,
        failed: failed.into_iter().map(str::to_string).collect(),
    };
    tracing::info!(
        "{} finished: {} ok, {} failed",
        operation.verb(),
        report.succeeded,
        report.failed.len()
    );
    report
}

/// Applies a delete result.
pub fn apply_delete(
    tree: &mut FileTree,
    paths: &[String],
    response: &DeleteResponse,
    root: &str,
) -> FailureReport {
    let mut succeeded = 0;
    for path in paths.iter().filter(|p| !response.failed.contains(p)) {
        tree.update(strip_root_prefix(path, root), "");
        succeeded += 1;
    }
    tracing::info!(
        "delete finished: {} ok, {} failed",
        succeeded,
        response.failed.len()
    );
    FailureReport {
        operation: BulkOperation::Delete,
        succeeded,
        failed: response.failed.clone(),
    }
}
