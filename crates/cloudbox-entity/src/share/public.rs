//! What a visitor sees behind a public link.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cloudbox_core::types::FileId;

use crate::file::PreviewKind;

/// Summary of a shared file, as returned by `GET /shares/public/{token}`.
/// Needs no sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedFile {
    pub id: FileId,
    /// Display name.
    pub name: String,
    /// Name the file was uploaded under.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Size in bytes.
    pub size: u64,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "crate::timestamp::option::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SharedFile {
    /// Name to save a download under.
    pub fn download_name(&self) -> &str {
        self.original_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.name)
    }

    /// How a viewer would render the file, if it can be previewed.
    pub fn preview_kind(&self) -> Option<PreviewKind> {
        PreviewKind::from_mime(self.mime_type.as_deref())
    }
}
