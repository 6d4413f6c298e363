//! Enabled state of the bulk-action buttons.

/// Which file-system tools the current selection allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolStates {
    pub rename: bool,
    pub copy: bool,
    pub move_files: bool,
    pub delete: bool,
}

impl ToolStates {
    /// Rename needs exactly one selected item; the other tools need one or more.
    pub fn from_count(count: usize) -> Self {
        Self {
            rename: count == 1,
            copy: count >= 1,
            move_files: count >= 1,
            delete: count >= 1,
        }
    }
}
