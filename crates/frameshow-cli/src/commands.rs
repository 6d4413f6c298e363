//! Subcommand implementations. Each returns what `main` prints.

use std::path::Path;

use anyhow::{Context, Result};
use frameshow_core::fs::path::sanitize_name;
use frameshow_core::{Config, FileTree, Node, Session};

/// Loads the configuration, or the defaults when no path was given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Reads an album snapshot.
///
/// Accepts the page's `{"<root>": {...}}` form as well as a bare tree.
pub fn load_snapshot(path: &Path, root: &str) -> Result<FileTree> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let tree: FileTree = serde_json::from_str(&data)
        .with_context(|| format!("malformed snapshot {}", path.display()))?;
    Ok(unwrap_root(tree, root))
}

fn unwrap_root(tree: FileTree, root: &str) -> FileTree {
    match tree.root().get(root) {
        Some(Node::Folder(children)) if tree.root().len() == 1 => {
            FileTree::from_root(children.clone())
        }
        _ => tree,
    }
}

/// Counters for one replay run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub batches: usize,
    pub rejected: usize,
    pub applied: usize,
    pub skipped: usize,
}

/// Applies each non-blank line of `events` as one pushed message.
///
/// Lines that are not an event batch are logged and counted, and the
/// replay carries on.
pub fn replay(session: &mut Session, events: &str) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for (idx, line) in events.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match session.handle_message(line) {
            Ok(outcome) => {
                for signal in &outcome.loading {
                    tracing::info!(loading = signal.loading, "{}", signal.message);
                }
                if outcome.full_refresh {
                    tracing::info!("Line {}: tree resynced", idx + 1);
                } else if outcome.refresh {
                    tracing::debug!("Line {}: {} event(s) applied", idx + 1, outcome.applied);
                }
                summary.batches += 1;
                summary.applied += outcome.applied;
                summary.skipped += outcome.skipped;
            }
            Err(e) => {
                tracing::warn!("Line {}: {e}", idx + 1);
                summary.rejected += 1;
            }
        }
    }
    summary
}

/// Album choices of `session`; `all` includes folders without images.
pub fn albums(session: &Session, all: bool) -> Vec<String> {
    if all {
        session.upload_album_choices()
    } else {
        session.album_choices()
    }
}

pub fn sanitize(names: &[String]) -> Vec<String> {
    names.iter().map(|name| sanitize_name(name)).collect()
}
