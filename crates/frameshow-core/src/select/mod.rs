//! Selection logic: checked files and folders, the bulk-action tools they
//! enable, and the path pairs a copy, move or rename sends to the server.

pub mod pairs;
pub mod selection;
pub mod tools;

pub use pairs::{generate_path_pairs, rename_pairs};
pub use selection::{CheckboxEffect, Mark, Selection};
pub use tools::ToolStates;
