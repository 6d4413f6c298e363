//! Push-event schema sent by the server.
//!
//! Messages arrive as `{"events": [...], "sender": "..."}`. Each event is
//! tagged by its `event` field; extra fields such as `id` or `timestamp`
//! are ignored.

use serde::{Deserialize, Serialize};

use crate::fs::node::FileTree;

/// A change notification for the album tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "UPPERCASE")]
pub enum ServerEvent {
    /// A file or folder was created.
    Put { path: String },
    /// A file or folder was removed.
    Delete { path: String },
    /// A file was moved or renamed.
    Move {
        path: String,
        #[serde(rename = "newPath")]
        new_path: String,
    },
    /// The client should rebuild its state, from `fileStructure` when given.
    ///
    /// The structure is keyed by the storage root, e.g. `{"albums": {...}}`.
    Resync {
        #[serde(default, rename = "fileStructure")]
        file_structure: Option<FileTree>,
    },
    /// The server started or finished a long-running task.
    Loading {
        #[serde(default)]
        loading: bool,
        #[serde(default)]
        message: Option<String>,
    },
}

impl ServerEvent {
    /// The wire name of this event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::Put { .. } => "PUT",
            ServerEvent::Delete { .. } => "DELETE",
            ServerEvent::Move { .. } => "MOVE",
            ServerEvent::Resync { .. } => "RESYNC",
            ServerEvent::Loading { .. } => "LOADING",
        }
    }
}

/// One pushed message. Events stay undecoded until the reconciler reaches
/// them so one unknown or malformed entry cannot reject the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBatch {
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
    #[serde(default)]
    pub sender: Option<String>,
}

impl EventBatch {
    /// Builds a batch from typed events.
    pub fn from_events(events: &[ServerEvent]) -> Self {
        Self {
            events: events
                .iter()
                .filter_map(|event| serde_json::to_value(event).ok())
                .collect(),
            sender: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
