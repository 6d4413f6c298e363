//! Album hierarchy model for Frameshow.
//!
//! This module provides the tree mirror of the server's albums
//! ([`node::FileTree`]) with its single mutation primitive, read-only walks
//! over it ([`query`]), and the path and file-name helpers ([`path`]) used
//! at the server boundary.

pub mod node;
pub mod path;
pub mod query;

pub use node::{FileTree, Node};
