//! Typed reference to either kind of explorer item.

use std::fmt;

use serde::{Deserialize, Serialize};

use cloudbox_core::types::{FileId, FolderId};

/// A file or a folder, addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ItemRef {
    File(FileId),
    Folder(FolderId),
}

impl ItemRef {
    /// Build from the `(id, is_folder)` pair used by views and drag payloads.
    pub fn from_parts(id: i64, is_folder: bool) -> Self {
        if is_folder {
            Self::Folder(FolderId(id))
        } else {
            Self::File(FileId(id))
        }
    }

    /// Whether this refers to a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    /// The raw backend id.
    pub fn raw_id(&self) -> i64 {
        match self {
            Self::File(id) => id.0,
            Self::Folder(id) => id.0,
        }
    }

    /// Human-facing noun used in notices.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Folder(_) => "folder",
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.noun(), self.raw_id())
    }
}
