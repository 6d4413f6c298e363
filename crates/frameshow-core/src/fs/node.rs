//! The in-memory mirror of the server's album hierarchy.
//!
//! [`FileTree`] owns the root folder. Every structural change goes through
//! [`FileTree::update`], so the server event stream and the completion of
//! user actions share one create/delete/move algorithm.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fs::path::{is_image, segments};

/// A node of the album hierarchy.
///
/// On the wire a folder is a JSON object and a file is an opaque string
/// (the server sends `""`), so `{"a": {"b.jpg": ""}}` decodes to a folder
/// `a` holding the file `b.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NodeRepr", into = "NodeRepr")]
pub enum Node {
    /// A folder and its children, keyed by name.
    Folder(BTreeMap<String, Node>),
    /// An image. Its content lives on the server.
    File,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NodeRepr {
    Folder(BTreeMap<String, Node>),
    File(String),
}

impl From<NodeRepr> for Node {
    fn from(repr: NodeRepr) -> Self {
        match repr {
            NodeRepr::Folder(children) => Node::Folder(children),
            NodeRepr::File(_) => Node::File,
        }
    }
}

impl From<Node> for NodeRepr {
    fn from(node: Node) -> Self {
        match node {
            Node::Folder(children) => NodeRepr::Folder(children),
            Node::File => NodeRepr::File(String::new()),
        }
    }
}

impl Node {
    /// Returns a new empty folder.
    pub fn empty_folder() -> Self {
        Node::Folder(BTreeMap::new())
    }

    /// Returns `true` for folders, including empty ones.
    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }

    /// Returns `true` for files.
    pub fn is_file(&self) -> bool {
        matches!(self, Node::File)
    }

    /// Returns the children of a folder, or `None` for a file.
    pub fn children(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Folder(children) => Some(children),
            Node::File => None,
        }
    }

    /// Returns `true` if this node is a file or a folder holding a file
    /// anywhere below it.
    pub fn has_leaf(&self) -> bool {
        match self {
            Node::File => true,
            Node::Folder(children) => children.values().any(Node::has_leaf),
        }
    }
}

/// The album hierarchy, rooted at an always-present folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileTree {
    root: BTreeMap<String, Node>,
}

impl FileTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree whose root folder holds `root`.
    pub fn from_root(root: BTreeMap<String, Node>) -> Self {
        Self { root }
    }

    /// Returns the children of the root folder.
    pub fn root(&self) -> &BTreeMap<String, Node> {
        &self.root
    }

    /// Returns `true` if the root folder has no children.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Looks up the node at `path`. The empty path is not a node.
    pub fn get(&self, path: &str) -> Option<&Node> {
        let parts = segments(path);
        let (last, parents) = parts.split_last()?;
        let mut loc = &self.root;
        for part in parents {
            match loc.get(*part)? {
                Node::Folder(children) => loc = children,
                Node::File => return None,
            }
        }
        loc.get(*last)
    }

    /// Returns `true` if a node exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Applies a create, delete or move and returns whether the tree changed.
    ///
    /// - `current` and `new` name the same path: nothing happens.
    /// - `current` empty: creates `new` along with any missing parent
    ///   folders. The final segment becomes a file if it names an image and
    ///   an empty folder otherwise. Existing nodes are left untouched.
    /// - `new` empty: removes `current`, then removes every ancestor left
    ///   empty, stopping at the first one that still has children.
    /// - both set: a create of `new` followed by a delete of `current`.
    ///
    /// Paths that run through a missing node or through a file are ignored.
    pub fn update(&mut self, current: &str, new: &str) -> bool {
        if segments(current) == segments(new) {
            return false;
        }
        match (current.is_empty(), new.is_empty()) {
            (true, false) => self.create(new),
            (false, true) => self.delete(current),
            _ => {
                let created = self.update("", new);
                let deleted = self.update(current, "");
                created || deleted
            }
        }
    }

    fn create(&mut self, path: &str) -> bool {
        let parts = segments(path);
        let Some((last, parents)) = parts.split_last() else {
            return false;
        };
        if self.blocked_by_file(parents) {
            tracing::warn!("Create ignored, parent of {path} is a file");
            return false;
        }

        let leaf = if is_image(last) {
            Node::File
        } else {
            Node::empty_folder()
        };
        let Some(loc) = self.folder_mut_or_create(parents) else {
            return false;
        };
        if loc.contains_key(*last) {
            return false;
        }
        loc.insert((*last).to_string(), leaf);
        tracing::debug!("Created {path}");
        true
    }

    fn delete(&mut self, path: &str) -> bool {
        let parts = segments(path);
        match remove_pruning(&mut self.root, &parts) {
            Some(_) => {
                tracing::debug!("Deleted {path}");
                true
            }
            None => {
                tracing::debug!("Delete ignored, {path} is not in the tree");
                false
            }
        }
    }

    /// Places `node` at `path`, replacing whatever was there and creating
    /// missing parent folders. Returns `false` if a parent is a file.
    ///
    /// Only the selection trees use this; the album tree changes through
    /// [`Self::update`].
    pub(crate) fn insert(&mut self, path: &str, node: Node) -> bool {
        let parts = segments(path);
        let Some((last, parents)) = parts.split_last() else {
            return false;
        };
        if self.blocked_by_file(parents) {
            return false;
        }
        match self.folder_mut_or_create(parents) {
            Some(loc) => {
                loc.insert((*last).to_string(), node);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the node at `path`, pruning ancestors left empty.
    /// Selection trees only, like [`Self::insert`].
    pub(crate) fn remove(&mut self, path: &str) -> Option<Node> {
        remove_pruning(&mut self.root, &segments(path))
    }

    /// Replaces the whole tree.
    pub fn replace(&mut self, other: FileTree) {
        self.root = other.root;
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.root.clear();
    }

    fn blocked_by_file(&self, parents: &[&str]) -> bool {
        let mut loc = &self.root;
        for part in parents {
            match loc.get(*part) {
                Some(Node::Folder(children)) => loc = children,
                Some(Node::File) => return true,
                None => return false,
            }
        }
        false
    }

    /// Walks `parents` from the root, creating empty folders as needed.
    ///
    /// Callers check [`Self::blocked_by_file`] first so a refused walk never
    /// leaves half-created folders behind.
    fn folder_mut_or_create(&mut self, parents: &[&str]) -> Option<&mut BTreeMap<String, Node>> {
        let mut loc = &mut self.root;
        for part in parents {
            let node = loc
                .entry((*part).to_string())
                .or_insert_with(Node::empty_folder);
            loc = match node {
                Node::Folder(children) => children,
                Node::File => return None,
            };
        }
        Some(loc)
    }
}

/// Removes the node at `parts` below `children`; on the way back up, drops
/// every folder the removal left empty.
fn remove_pruning(children: &mut BTreeMap<String, Node>, parts: &[&str]) -> Option<Node> {
    let (first, rest) = parts.split_first()?;
    if rest.is_empty() {
        return children.remove(*first);
    }
    let Some(Node::Folder(sub)) = children.get_mut(*first) else {
        return None;
    };
    let removed = remove_pruning(sub, rest)?;
    if sub.is_empty() {
        children.remove(*first);
    }
    Some(removed)
}
