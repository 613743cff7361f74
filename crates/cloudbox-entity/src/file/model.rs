//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cloudbox_core::types::{FileId, FolderId};

use super::kind::{FileKind, PreviewKind};

/// A file as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Unique file identifier.
    pub id: FileId,
    /// Display name (including extension).
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// MIME type reported at upload, if any.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Containing folder (`None` = root).
    #[serde(default)]
    pub folder_id: Option<FolderId>,
    /// When the file was uploaded.
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    /// When the file was last renamed or moved.
    #[serde(default, deserialize_with = "crate::timestamp::option::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Whether the file sits in the trash.
    #[serde(default)]
    pub is_deleted: bool,
    /// When the file was moved to the trash.
    #[serde(default, deserialize_with = "crate::timestamp::option::deserialize")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl FileEntry {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }

    /// Icon family derived from the MIME type.
    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(self.mime_type.as_deref())
    }

    /// How the file can be previewed in place, if at all.
    pub fn preview_kind(&self) -> Option<PreviewKind> {
        PreviewKind::from_mime(self.mime_type.as_deref())
    }

    /// Whether this entry lives directly in `folder` (`None` = root).
    pub fn is_in(&self, folder: Option<FolderId>) -> bool {
        self.folder_id == folder
    }
}
