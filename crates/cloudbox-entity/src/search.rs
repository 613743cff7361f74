//! Server-side search results.

use serde::{Deserialize, Serialize};

use crate::file::FileEntry;
use crate::folder::FolderEntry;

/// Matches returned by `GET /search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matching files.
    #[serde(default)]
    pub files: Vec<FileEntry>,
    /// Matching folders.
    #[serde(default)]
    pub folders: Vec<FolderEntry>,
}

impl SearchResults {
    /// Total number of matches.
    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }
}
