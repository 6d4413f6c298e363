//! Multi-selection of files and folders.
//!
//! A [`Selection`] mirrors the shape of the album [`FileTree`] in two trees:
//! `files` holds a copy of every chosen file (a selected folder contributes
//! its whole subtree), and `folders` marks the folders the user checked
//! explicitly. Checkbox state is tracked per path so every toggle can be
//! answered with the list of [`CheckboxEffect`]s the view has to apply.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{CoreError, CoreResult};
use crate::fs::node::{FileTree, Node};
use crate::fs::path::segments;
use crate::select::tools::ToolStates;

/// State of a checkbox that is ticked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// Ticked by the user and still toggleable.
    Checked,
    /// Ticked and disabled because an ancestor folder is selected.
    Implied,
}

/// A checkbox change the view must apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxEffect {
    pub path: String,
    pub checked: bool,
    pub disabled: bool,
}

impl CheckboxEffect {
    fn checked(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            checked: true,
            disabled: false,
        }
    }

    fn implied(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            checked: true,
            disabled: true,
        }
    }

    fn cleared(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            checked: false,
            disabled: false,
        }
    }
}

/// The files and folders picked in selection mode.
///
/// A path carries at most one [`Mark`], so it is never both individually
/// selected and implied by a selected ancestor. The selection count is the
/// number of [`Mark::Checked`] paths.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    active: bool,
    files: FileTree,
    folders: FileTree,
    marks: BTreeMap<String, Mark>,
}

impl Selection {
    /// Creates an inactive, empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while selection mode is on.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Switches selection mode. Leaving the mode clears the selection and
    /// returns the checkboxes to reset.
    pub fn toggle_mode(&mut self) -> Vec<CheckboxEffect> {
        self.active = !self.active;
        if self.active {
            Vec::new()
        } else {
            self.clear()
        }
    }

    /// Selected files, including every file below a selected folder.
    pub fn files(&self) -> &FileTree {
        &self.files
    }

    /// Folders the user checked explicitly.
    pub fn folders(&self) -> &FileTree {
        &self.folders
    }

    /// Returns the mark on `path`, if its checkbox is ticked.
    pub fn mark(&self, path: &str) -> Option<Mark> {
        self.marks.get(path).copied()
    }

    /// Number of ticked, enabled checkboxes.
    pub fn count(&self) -> usize {
        self.marks
            .values()
            .filter(|mark| **mark == Mark::Checked)
            .count()
    }

    /// Which bulk actions the current count allows.
    pub fn tool_states(&self) -> ToolStates {
        ToolStates::from_count(self.count())
    }

    /// Applies a checkbox change on `path`, dispatching on the node kind.
    pub fn toggle(
        &mut self,
        tree: &FileTree,
        path: &str,
        checked: bool,
    ) -> CoreResult<Vec<CheckboxEffect>> {
        match tree.get(path) {
            None => Err(CoreError::NotFound(path.to_string())),
            Some(Node::File) if checked => self.select_file(tree, path),
            Some(Node::File) => self.deselect_file(path),
            Some(Node::Folder(_)) if checked => self.select_folder(tree, path),
            Some(Node::Folder(_)) => self.deselect_folder(tree, path),
        }
    }

    /// Selects the file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::SelectionDisabled`] outside selection mode.
    /// - [`CoreError::SelectionLocked`] if a parent folder is selected.
    /// - [`CoreError::NotFound`] / [`CoreError::NotAFile`] if `path` is not
    ///   a file of `tree`.
    pub fn select_file(&mut self, tree: &FileTree, path: &str) -> CoreResult<Vec<CheckboxEffect>> {
        self.ensure_toggleable(path)?;
        match tree.get(path) {
            Some(Node::File) => {}
            Some(Node::Folder(_)) => return Err(CoreError::NotAFile(path.to_string())),
            None => return Err(CoreError::NotFound(path.to_string())),
        }
        if self.mark(path) == Some(Mark::Checked) {
            return Ok(Vec::new());
        }

        self.files.insert(path, Node::File);
        self.marks.insert(path.to_string(), Mark::Checked);
        tracing::debug!("Selected file {path}");
        Ok(vec![CheckboxEffect::checked(path)])
    }

    /// Deselects the file at `path`. Unselected paths are a no-op.
    pub fn deselect_file(&mut self, path: &str) -> CoreResult<Vec<CheckboxEffect>> {
        self.ensure_toggleable(path)?;
        if self.mark(path) != Some(Mark::Checked) {
            return Ok(Vec::new());
        }

        self.files.remove(path);
        self.marks.remove(path);
        tracing::debug!("Deselected file {path}");
        Ok(vec![CheckboxEffect::cleared(path)])
    }

    /// Selects the folder at `path` together with everything below it.
    ///
    /// Descendants that were selected on their own are retracted first,
    /// then every descendant becomes ticked and disabled. The count grows by
    /// one for the folder, minus the retracted selections.
    ///
    /// # Errors
    ///
    /// As [`Self::select_file`], plus [`CoreError::NotSelectable`] for
    /// top-level albums.
    pub fn select_folder(
        &mut self,
        tree: &FileTree,
        path: &str,
    ) -> CoreResult<Vec<CheckboxEffect>> {
        self.ensure_toggleable(path)?;
        if segments(path).len() < 2 {
            return Err(CoreError::NotSelectable(path.to_string()));
        }
        let subtree = match tree.get(path) {
            Some(node @ Node::Folder(_)) => node.clone(),
            Some(Node::File) => return Err(CoreError::NotAFolder(path.to_string())),
            None => return Err(CoreError::NotFound(path.to_string())),
        };
        if self.mark(path) == Some(Mark::Checked) {
            return Ok(Vec::new());
        }

        self.files.insert(path, subtree);
        self.folders.insert(path, Node::empty_folder());
        self.marks.insert(path.to_string(), Mark::Checked);

        let retracted = self.take_marks_below(path);
        let mut effects = vec![CheckboxEffect::checked(path)];
        for descendant in tree.descendants(path) {
            self.marks.insert(descendant.clone(), Mark::Implied);
            effects.push(CheckboxEffect::implied(descendant));
        }
        tracing::debug!(
            "Selected folder {path}, retracted {} nested selection(s)",
            retracted
                .values()
                .filter(|mark| **mark == Mark::Checked)
                .count()
        );
        Ok(effects)
    }

    /// Deselects the folder at `path` and releases its descendants.
    ///
    /// Both selection trees are pruned the same way a delete prunes the
    /// album tree. Unselected folders are a no-op.
    pub fn deselect_folder(
        &mut self,
        tree: &FileTree,
        path: &str,
    ) -> CoreResult<Vec<CheckboxEffect>> {
        self.ensure_toggleable(path)?;
        if self.mark(path) != Some(Mark::Checked) {
            return Ok(Vec::new());
        }

        self.files.remove(path);
        self.folders.remove(path);
        self.marks.remove(path);

        let mut released: BTreeSet<String> = self.take_marks_below(path).into_keys().collect();
        released.extend(tree.descendants(path));

        let mut effects = vec![CheckboxEffect::cleared(path)];
        effects.extend(released.into_iter().map(CheckboxEffect::cleared));
        tracing::debug!("Deselected folder {path}");
        Ok(effects)
    }

    /// Empties both trees and zeroes the count, returning every checkbox to
    /// reset. Selection mode itself is left as is.
    pub fn clear(&mut self) -> Vec<CheckboxEffect> {
        self.files.clear();
        self.folders.clear();
        std::mem::take(&mut self.marks)
            .into_keys()
            .map(CheckboxEffect::cleared)
            .collect()
    }

    fn ensure_toggleable(&self, path: &str) -> CoreResult<()> {
        if !self.active {
            return Err(CoreError::SelectionDisabled);
        }
        if self.mark(path) == Some(Mark::Implied) || self.has_selected_ancestor(path) {
            return Err(CoreError::SelectionLocked(path.to_string()));
        }
        Ok(())
    }

    /// Whether a proper ancestor of `path` is a selected folder. Covers paths
    /// that appeared in the tree after the folder was selected.
    fn has_selected_ancestor(&self, path: &str) -> bool {
        let parts = segments(path);
        (1..parts.len()).any(|n| {
            matches!(
                self.folders.get(&parts[..n].join("/")),
                Some(Node::Folder(children)) if children.is_empty()
            )
        })
    }

    fn take_marks_below(&mut self, path: &str) -> BTreeMap<String, Mark> {
        let prefix = format!("{path}/");
        let below: Vec<String> = self
            .marks
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .cloned()
            .collect();
        below
            .into_iter()
            .filter_map(|key| self.marks.remove(&key).map(|mark| (key, mark)))
            .collect()
    }
}
