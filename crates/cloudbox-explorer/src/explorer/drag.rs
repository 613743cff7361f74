//! Drag-and-drop payloads and the rules for where they may land.

use std::fmt;

use serde::{Deserialize, Serialize};

use cloudbox_core::error::AppError;
use cloudbox_core::result::AppResult;
use cloudbox_core::types::FolderId;
use cloudbox_entity::{FileEntry, FolderEntry, ItemRef};

/// What is being dragged. The shape matches the JSON a view puts on the
/// drag event (`{"id", "name", "isFolder", "originFolderId"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    /// Raw id of the dragged file or folder.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Whether the item is a folder.
    #[serde(alias = "is_folder")]
    pub is_folder: bool,
    /// Folder the item currently sits in (`None` = root).
    #[serde(default, alias = "origin_folder_id")]
    pub origin_folder_id: Option<FolderId>,
}

impl DragPayload {
    /// Payload for dragging a file.
    pub fn for_file(file: &FileEntry) -> Self {
        Self {
            id: file.id.get(),
            name: file.name.clone(),
            is_folder: false,
            origin_folder_id: file.folder_id,
        }
    }

    /// Payload for dragging a folder.
    pub fn for_folder(folder: &FolderEntry) -> Self {
        Self {
            id: folder.id.get(),
            name: folder.name.clone(),
            is_folder: true,
            origin_folder_id: folder.parent_id,
        }
    }

    /// Decode and check an untyped payload.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let mut payload: Self = serde_json::from_str(raw)
            .map_err(|e| AppError::validation(format!("Malformed drag payload: {e}")))?;
        if payload.id <= 0 {
            return Err(AppError::validation(format!(
                "Malformed drag payload: invalid id {}",
                payload.id
            )));
        }
        if payload.origin_folder_id.is_some_and(|f| f.get() < 0) {
            return Err(AppError::validation(
                "Malformed drag payload: invalid origin folder",
            ));
        }
        payload.origin_folder_id =
            FolderId::normalize(payload.origin_folder_id.map(FolderId::get));
        Ok(payload)
    }

    /// The dragged item as a typed reference.
    pub fn item(&self) -> ItemRef {
        ItemRef::from_parts(self.id, self.is_folder)
    }

    /// Why dropping onto `target` would do nothing, if it would.
    pub fn rejection_for(&self, target: Option<FolderId>) -> Option<DropRejection> {
        if self.is_folder && target.is_some_and(|t| t.get() == self.id) {
            return Some(DropRejection::OntoItself);
        }
        if target == self.origin_folder_id {
            return Some(DropRejection::AlreadyThere);
        }
        None
    }
}

/// A place an item can be dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum DropTarget {
    Root,
    Folder(FolderId),
}

impl From<Option<FolderId>> for DropTarget {
    fn from(target: Option<FolderId>) -> Self {
        target.map_or(Self::Root, Self::Folder)
    }
}

/// Transient drag-and-drop state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DragState {
    /// Item being dragged, set between begin and end/drop.
    pub dragged_item: Option<DragPayload>,
    /// Target currently highlighted as a valid drop.
    pub drag_over: Option<DropTarget>,
}

impl DragState {
    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.dragged_item.is_some()
    }
}

/// Why a drop was turned into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropRejection {
    /// A folder was dropped on itself.
    OntoItself,
    /// The item already sits in the target folder.
    AlreadyThere,
}

impl fmt::Display for DropRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OntoItself => write!(f, "a folder cannot be dropped onto itself"),
            Self::AlreadyThere => write!(f, "the item is already in this folder"),
        }
    }
}

/// Result of a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum DropOutcome {
    /// The item was moved and the view refreshed.
    Moved(ItemRef),
    /// The drop was invalid; nothing was sent.
    Rejected(DropRejection),
    /// No drag was in progress.
    NoDrag,
}
