//! Read-only walks over a [`FileTree`].
//!
//! All walks are depth-first in name order, so their output is stable for
//! a given tree.

use std::collections::BTreeMap;

use crate::fs::node::{FileTree, Node};
use crate::fs::path::join;

impl FileTree {
    /// Lists every folder path, parents before their children.
    ///
    /// With `ignore_empty_folders` set, a folder is listed only if a file
    /// exists somewhere below it; a folder whose only content is other
    /// non-empty folders is still listed. Otherwise every folder is listed,
    /// including empty ones. The root itself is never listed.
    pub fn list_folder_paths(&self, ignore_empty_folders: bool) -> Vec<String> {
        let mut paths = Vec::new();
        collect_folders(self.root(), "", ignore_empty_folders, &mut paths);
        paths
    }

    /// Lists the full path of every file, depth-first.
    pub fn flatten_to_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_files(self.root(), "", &mut paths);
        paths
    }

    /// Lists every path strictly below `path`, files and folders alike.
    ///
    /// Returns an empty list if `path` is missing or names a file.
    pub fn descendants(&self, path: &str) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(Node::Folder(children)) = self.get(path) {
            collect_all(children, path, &mut out);
        }
        out
    }
}

fn collect_folders(
    children: &BTreeMap<String, Node>,
    prefix: &str,
    ignore_empty: bool,
    out: &mut Vec<String>,
) {
    for (name, node) in children {
        if let Node::Folder(sub) = node {
            if ignore_empty && !node.has_leaf() {
                continue;
            }
            let path = join(prefix, name);
            out.push(path.clone());
            collect_folders(sub, &path, ignore_empty, out);
        }
    }
}

fn collect_files(children: &BTreeMap<String, Node>, prefix: &str, out: &mut Vec<String>) {
    for (name, node) in children {
        let path = join(prefix, name);
        match node {
            Node::File => out.push(path),
            Node::Folder(sub) => collect_files(sub, &path, out),
        }
    }
}

fn collect_all(children: &BTreeMap<String, Node>, prefix: &str, out: &mut Vec<String>) {
    for (name, node) in children {
        let path = join(prefix, name);
        out.push(path.clone());
        if let Node::Folder(sub) = node {
            collect_all(sub, &path, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn sample() -> FileTree {
        serde_json::from_str(
            r#"{
                "alice": {
                    "cats": {"1.tom.jpg": "", "2.kit.png": ""},
                    "trips": {"2023": {"rome": {"3.colosseum.jpg": ""}}},
                    "empty": {}
                },
                "Shared": {}
            }"#,
        )
        .unwrap()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lists_every_folder() {
        let paths: BTreeSet<String> = sample().list_folder_paths(false).into_iter().collect();
        assert_eq!(
            paths,
            set(&[
                "Shared",
                "alice",
                "alice/cats",
                "alice/empty",
                "alice/trips",
                "alice/trips/2023",
                "alice/trips/2023/rome",
            ])
        );
    }

    #[test]
    fn ignoring_empty_keeps_folders_of_folders() {
        let paths: BTreeSet<String> = sample().list_folder_paths(true).into_iter().collect();
        assert_eq!(
            paths,
            set(&[
                "alice",
                "alice/cats",
                "alice/trips",
                "alice/trips/2023",
                "alice/trips/2023/rome",
            ])
        );
    }

    #[test]
    fn folder_listing_is_parent_first_and_stable() {
        let first = sample().list_folder_paths(false);
        assert_eq!(first, sample().list_folder_paths(false));
        let alice = first.iter().position(|p| p == "alice").unwrap();
        let cats = first.iter().position(|p| p == "alice/cats").unwrap();
        assert!(alice < cats);
    }

    #[test]
    fn empty_tree_lists_nothing() {
        let t = FileTree::new();
        assert!(t.list_folder_paths(false).is_empty());
        assert!(t.flatten_to_paths().is_empty());
    }

    #[test]
    fn flatten_lists_only_files() {
        let files: BTreeSet<String> = sample().flatten_to_paths().into_iter().collect();
        assert_eq!(
            files,
            set(&[
                "alice/cats/1.tom.jpg",
                "alice/cats/2.kit.png",
                "alice/trips/2023/rome/3.colosseum.jpg",
            ])
        );
    }

    #[test]
    fn descendants_cover_files_and_folders() {
        let below: BTreeSet<String> = sample().descendants("alice/trips").into_iter().collect();
        assert_eq!(
            below,
            set(&[
                "alice/trips/2023",
                "alice/trips/2023/rome",
                "alice/trips/2023/rome/3.colosseum.jpg",
            ])
        );
    }

    #[test]
    fn descendants_of_file_or_missing_is_empty() {
        assert!(sample().descendants("alice/cats/1.tom.jpg").is_empty());
        assert!(sample().descendants("bob").is_empty());
    }
}
