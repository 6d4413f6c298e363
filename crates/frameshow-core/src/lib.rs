//! Frameshow core library: client-side logic of the slideshow admin panel.
//!
//! `frameshow-core` mirrors the server's album tree and keeps it in step with
//! both the panel's own bulk operations and the changes other clients push.
//! It is decoupled from any UI and from the HTTP transport: hosts render
//! [`select::CheckboxEffect`]s and implement [`api::AlbumApi`].
//!
//! # Modules
//!
//! - [`fs`]: Album tree ([`FileTree`]) with its single `update` primitive, and path helpers.
//! - [`select`]: Selection with folder cascade, tool states and path-pair generation.
//! - [`sync`]: Pushed server events and the [`Reconciler`] that applies them.
//! - [`api`]: Wire types, the [`AlbumApi`] seam and partial-failure reports.
//! - [`config`]: TOML client configuration and slideshow settings.
//! - [`staging`] / [`preview`]: Upload staging list and image preview rotation.
//! - [`session`]: The [`Session`] hub tying everything together.
//! - [`error`]: Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod api;
pub mod config;
pub mod error;
pub mod fs;
pub mod preview;
pub mod select;
pub mod session;
pub mod staging;
pub mod sync;

pub use api::{AlbumApi, BulkOperation, FailureReport, PathPair};
pub use config::settings::Config;
pub use config::slideshow::SlideshowSettings;
pub use error::{CoreError, CoreResult};
pub use fs::{FileTree, Node};
pub use preview::PreviewState;
pub use select::{CheckboxEffect, Selection, ToolStates};
pub use session::Session;
pub use staging::{UploadReport, UploadStaging};
pub use sync::{EventBatch, ReconcileOutcome, Reconciler, ServerEvent};
