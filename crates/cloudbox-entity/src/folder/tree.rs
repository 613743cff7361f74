//! Flattened folder-tree and breadcrumb structures for display.

use serde::{Deserialize, Serialize};

use cloudbox_core::types::FolderId;

use super::model::{FolderEntry, FolderRef};

/// Display name of the synthetic root folder.
pub const ROOT_NAME: &str = "My files";

/// One row of a flattened, pre-ordered folder tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderTreeNode {
    /// The folder itself.
    pub folder: FolderEntry,
    /// Nesting level; 0 is a direct child of the traversal root.
    pub depth: usize,
}

impl FolderTreeNode {
    /// Folder name indented two spaces per level.
    pub fn indented_name(&self) -> String {
        format!("{}{}", "  ".repeat(self.depth), self.folder.name)
    }
}

/// One step of the path from the root to the current folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Folder id (`None` for the root crumb).
    pub id: Option<FolderId>,
    /// Display name.
    pub name: String,
}

impl Breadcrumb {
    /// The crumb every trail starts with.
    pub fn root() -> Self {
        Self {
            id: None,
            name: ROOT_NAME.to_string(),
        }
    }

    /// Build a trail from the root crumb followed by `ancestors`, ordered
    /// outermost first and ending with the current folder.
    pub fn trail<'a>(ancestors: impl IntoIterator<Item = &'a FolderRef>) -> Vec<Self> {
        std::iter::once(Self::root())
            .chain(ancestors.into_iter().map(|folder| Self {
                id: Some(folder.id),
                name: folder.name.clone(),
            }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_starts_at_root() {
        let docs = FolderRef {
            id: FolderId(1),
            name: "Docs".into(),
            parent_id: None,
        };
        let reports = FolderRef {
            id: FolderId(2),
            name: "Reports".into(),
            parent_id: Some(FolderId(1)),
        };
        let trail = Breadcrumb::trail([&docs, &reports]);
        assert_eq!(trail.len(), 3);
        assert_eq!(trail[0], Breadcrumb::root());
        assert_eq!(trail[2].id, Some(FolderId(2)));
    }

    #[test]
    fn test_trail_at_root() {
        let trail = Breadcrumb::trail(std::iter::empty());
        assert_eq!(trail, vec![Breadcrumb::root()]);
    }
}
