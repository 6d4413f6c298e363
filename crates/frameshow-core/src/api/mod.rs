//! The admin server's JSON API as seen from the client.
//!
//! [`dto`] holds the wire bodies, [`client::AlbumApi`] is the transport
//! seam, and [`outcome`] reconciles bulk-operation results into the tree.

pub mod client;
pub mod dto;
pub mod outcome;

pub use client::AlbumApi;
pub use dto::PathPair;
pub use outcome::{apply_delete, apply_transfer, BulkOperation, FailureReport};
