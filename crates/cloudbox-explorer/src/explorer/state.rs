//! Explorer status, context and read-only snapshots.

use std::fmt;

use serde::Serialize;

use cloudbox_core::types::FolderId;
use cloudbox_entity::{Breadcrumb, FileEntry, FolderEntry, FolderRef};

use super::drag::DragState;

/// Lifecycle of the explorer view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ExplorerStatus {
    /// Nothing loaded yet.
    #[default]
    Idle,
    /// A navigation or mutation is in flight.
    Loading,
    /// The context reflects the last successful fetch.
    Ready,
    /// The last fetch failed; left only through a retry.
    Error(String),
}

impl ExplorerStatus {
    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for ExplorerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// The opened folder and its direct children, replaced wholesale on each
/// successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerContext {
    /// Opened folder; `None` is the root.
    pub current_folder: Option<FolderRef>,
    /// Path from the root to `current_folder`, root first.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Files directly inside `current_folder`.
    pub files: Vec<FileEntry>,
    /// Folders directly inside `current_folder`.
    pub folders: Vec<FolderEntry>,
}

impl Default for ExplorerContext {
    fn default() -> Self {
        Self {
            current_folder: None,
            breadcrumbs: vec![Breadcrumb::root()],
            files: Vec::new(),
            folders: Vec::new(),
        }
    }
}

impl ExplorerContext {
    /// Id of the opened folder (`None` = root).
    pub fn current_folder_id(&self) -> Option<FolderId> {
        self.current_folder.as_ref().map(|f| f.id)
    }

    /// Total number of children.
    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len()
    }

    /// Whether the folder has no children.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    /// Whether every child belongs to the opened folder.
    pub fn is_consistent(&self) -> bool {
        let here = self.current_folder_id();
        self.files.iter().all(|f| f.folder_id == here)
            && self.folders.iter().all(|f| f.parent_id == here)
    }
}

/// How a navigation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// The fetched context is now displayed.
    Applied,
    /// A newer navigation started meanwhile; the response was discarded.
    Superseded,
    /// The explorer was closed; the response was discarded.
    Cancelled,
}

/// A consistent copy of everything a view renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerSnapshot {
    /// Current status.
    pub status: ExplorerStatus,
    /// Folder being displayed (or last successfully displayed).
    pub context: ExplorerContext,
    /// Folder most recently navigated to, used by retries.
    pub target: Option<FolderId>,
    /// Active local filter.
    pub search_term: String,
    /// Drag-and-drop state.
    pub drag: DragState,
}

/// Mutable explorer state, guarded by one lock.
#[derive(Debug, Default)]
pub(crate) struct ExplorerState {
    pub(crate) status: ExplorerStatus,
    pub(crate) context: ExplorerContext,
    pub(crate) target: Option<FolderId>,
    /// Bumped on every navigation; responses carrying an older value are stale.
    pub(crate) generation: u64,
    pub(crate) search_term: String,
    pub(crate) drag: DragState,
}

impl ExplorerState {
    pub(crate) fn snapshot(&self) -> ExplorerSnapshot {
        ExplorerSnapshot {
            status: self.status.clone(),
            context: self.context.clone(),
            target: self.target,
            search_term: self.search_term.clone(),
            drag: self.drag.clone(),
        }
    }
}
