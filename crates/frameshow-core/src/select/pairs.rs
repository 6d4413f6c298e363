//! Old/new path pairs for copy, move and rename requests.

use std::collections::BTreeMap;

use crate::api::dto::PathPair;
use crate::error::{CoreError, CoreResult};
use crate::fs::node::Node;
use crate::fs::path::{
    base_name, display_name, extension_of, join, parent_of, secure_path, with_root_prefix,
};
use crate::select::selection::Selection;

/// Computes where every selected file lands under `target`.
///
/// Files below a selected folder keep their position relative to that
/// folder, which is recreated as `target/<folder name>`. Files selected on
/// their own land directly in `target`. Both sides of each pair are
/// secured and carry the `root` storage segment.
///
/// # Examples
///
/// ```
/// use frameshow_core::fs::FileTree;
/// use frameshow_core::select::{generate_path_pairs, Selection};
///
/// let tree: FileTree = serde_json::from_str(r#"{"docs": {"x.jpg": ""}}"#).unwrap();
/// let mut selection = Selection::new();
/// selection.toggle_mode();
/// selection.select_file(&tree, "docs/x.jpg").unwrap();
///
/// let pairs = generate_path_pairs(&selection, "shared", "albums");
/// assert_eq!(pairs[0].old_path, "albums/docs/x.jpg");
/// assert_eq!(pairs[0].new_path, "albums/shared/x.jpg");
/// ```
pub fn generate_path_pairs(selection: &Selection, target: &str, root: &str) -> Vec<PathPair> {
    let target = target.trim_end_matches('/');
    let rebased: Vec<(String, String)> = selected_folder_roots(selection)
        .into_iter()
        .map(|folder| {
            let dest = join(target, base_name(&folder));
            (folder, dest)
        })
        .collect();

    selection
        .files()
        .flatten_to_paths()
        .into_iter()
        .map(|path| {
            let new_path = rebased
                .iter()
                .find_map(|(folder, dest)| {
                    path.strip_prefix(folder.as_str())
                        .filter(|rest| rest.starts_with('/'))
                        .map(|rest| format!("{dest}{rest}"))
                })
                .unwrap_or_else(|| join(target, base_name(&path)));
            boundary_pair(&path, &new_path, root)
        })
        .collect()
}

/// Computes the pairs that rename the single selected item to `new_name`.
///
/// A file keeps its stored id segment and extension
/// (`<id>.<new_name>.<ext>`). A folder has its last segment replaced and
/// every selected file below it rebased.
///
/// # Errors
///
/// - [`CoreError::EmptyField`] if `new_name` is empty.
/// - [`CoreError::InvalidSelection`] unless exactly one item is selected.
pub fn rename_pairs(selection: &Selection, new_name: &str, root: &str) -> CoreResult<Vec<PathPair>> {
    if new_name.is_empty() {
        return Err(CoreError::EmptyField("New name"));
    }
    if selection.count() != 1 {
        return Err(CoreError::InvalidSelection(format!(
            "rename needs exactly one item, {} selected",
            selection.count()
        )));
    }

    let files = selection.files().flatten_to_paths();
    let folders = selected_folder_roots(selection);

    match folders.as_slice() {
        [] => {
            let [path] = files.as_slice() else {
                return Err(CoreError::InvalidSelection(
                    "no file selected for rename".to_string(),
                ));
            };
            let new_path = join(parent_of(path), &renamed_file(base_name(path), new_name));
            Ok(vec![boundary_pair(path, &new_path, root)])
        }
        [folder] => {
            let new_prefix = join(parent_of(folder), new_name);
            Ok(files
                .iter()
                .filter_map(|path| {
                    path.strip_prefix(folder.as_str())
                        .filter(|rest| rest.starts_with('/'))
                        .map(|rest| boundary_pair(path, &format!("{new_prefix}{rest}"), root))
                })
                .collect())
        }
        _ => Err(CoreError::InvalidSelection(
            "rename needs exactly one folder".to_string(),
        )),
    }
}

fn renamed_file(name: &str, new_name: &str) -> String {
    let ext = extension_of(name);
    let stem = if display_name(name) != name {
        let id = name.split('.').next().unwrap_or_default();
        format!("{id}.{new_name}")
    } else {
        new_name.to_string()
    };
    if ext.is_empty() {
        stem
    } else {
        format!("{stem}.{ext}")
    }
}

fn boundary_pair(old_path: &str, new_path: &str, root: &str) -> PathPair {
    PathPair::new(
        secure_path(&with_root_prefix(old_path, root)),
        secure_path(&with_root_prefix(new_path, root)),
    )
}

/// Paths of the selected folders that have no selected folder below them.
fn selected_folder_roots(selection: &Selection) -> Vec<String> {
    let mut out = Vec::new();
    collect_leaf_folders(selection.folders().root(), "", &mut out);
    out
}

fn collect_leaf_folders(children: &BTreeMap<String, Node>, prefix: &str, out: &mut Vec<String>) {
    for (name, node) in children {
        if let Node::Folder(sub) = node {
            let path = join(prefix, name);
            if sub.is_empty() {
                out.push(path);
            } else {
                collect_leaf_folders(sub, &path, out);
            }
        }
    }
}
