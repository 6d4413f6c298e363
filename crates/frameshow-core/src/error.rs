//! Error types for `frameshow-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`. Partial failures of bulk
//! operations are not errors; they are reported through
//! [`crate::api::FailureReport`].

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The album path does not exist in the tree.
    #[error("path not found: {0}")]
    NotFound(String),

    /// A folder was expected but the path points to a file.
    #[error("not a folder: {0}")]
    NotAFolder(String),

    /// A file was expected but the path points to a folder.
    #[error("not a file: {0}")]
    NotAFile(String),

    /// A required form field was left empty.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// Top-level albums carry no checkbox and cannot be selected.
    #[error("top-level album cannot be selected: {0}")]
    NotSelectable(String),

    /// The checkbox is implied by an ancestor folder selection.
    #[error("selection is locked by a selected parent folder: {0}")]
    SelectionLocked(String),

    /// Selection mode is switched off.
    #[error("selection mode is off")]
    SelectionDisabled,

    /// The operation needs a different number of selected items.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// The staged upload is not an allowed image type.
    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),

    /// The staged upload has no album assigned.
    #[error("no album assigned to: {0}")]
    MissingAlbum(String),

    /// Only JPEG images can be rotated.
    #[error("rotation is only supported for JPG/JPEG images: {0}")]
    NotRotatable(String),

    /// Rotation must be a quarter turn.
    #[error("invalid rotation: {0}")]
    InvalidRotation(u16),

    /// The configuration file does not exist.
    #[error("config not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// A server payload could not be decoded.
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The server rejected a request or the transport failed.
    #[error("remote error: {0}")]
    Remote(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `frameshow-core`.
pub type CoreResult<T> = Result<T, CoreError>;
