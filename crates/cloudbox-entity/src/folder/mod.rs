//! Folder domain entities.

pub mod model;
pub mod tree;

pub use model::{FolderEntry, FolderRef};
pub use tree::{Breadcrumb, FolderTreeNode};
