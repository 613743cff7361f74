//! Local name filtering over the loaded folder.

use serde::Serialize;

use cloudbox_entity::{FileEntry, FolderEntry};

use super::state::ExplorerContext;

/// Children of the opened folder that match the active filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilteredItems {
    pub folders: Vec<FolderEntry>,
    pub files: Vec<FileEntry>,
}

impl FilteredItems {
    /// Number of visible items.
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    /// Whether nothing matches.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}

/// Case-insensitive substring match of `term` against names in `context`.
/// A blank term keeps everything.
pub fn filter_items(context: &ExplorerContext, term: &str) -> FilteredItems {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return FilteredItems {
            folders: context.folders.clone(),
            files: context.files.clone(),
        };
    }
    let matches = |name: &str| name.to_lowercase().contains(&needle);
    FilteredItems {
        folders: context
            .folders
            .iter()
            .filter(|f| matches(&f.name))
            .cloned()
            .collect(),
        files: context
            .files
            .iter()
            .filter(|f| matches(&f.name))
            .cloned()
            .collect(),
    }
}
