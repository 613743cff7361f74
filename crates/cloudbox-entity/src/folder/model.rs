//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cloudbox_core::types::FolderId;

/// A folder as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (`None` for top-level folders).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    /// When the folder was created.
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    /// When the folder was last renamed or moved.
    #[serde(default, deserialize_with = "crate::timestamp::option::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Whether the folder sits in the trash.
    #[serde(default)]
    pub is_deleted: bool,
    /// When the folder was moved to the trash.
    #[serde(default, deserialize_with = "crate::timestamp::option::deserialize")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl FolderEntry {
    /// Check if this is a top-level folder (its parent is the root).
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The lightweight reference kept as the explorer's current folder.
    pub fn to_ref(&self) -> FolderRef {
        FolderRef {
            id: self.id,
            name: self.name.clone(),
            parent_id: self.parent_id,
        }
    }
}

/// Identity of an opened folder. The synthetic root has no `FolderRef`;
/// it is the absence of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    /// Folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder (`None` = root).
    pub parent_id: Option<FolderId>,
}

impl From<&FolderEntry> for FolderRef {
    fn from(entry: &FolderEntry) -> Self {
        entry.to_ref()
    }
}
