//! # cloudbox-entity
//!
//! Domain models for the CloudBox client. Every struct in this crate mirrors
//! a JSON shape returned by the backend, or is a value object derived from
//! one. All entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.
//! They are observed, never owned: the server is the source of truth.

pub mod file;
pub mod folder;
pub mod item;
pub mod search;
pub mod share;
pub mod timestamp;
pub mod user;

pub use file::{FileEntry, FileKind, PreviewKind};
pub use folder::{Breadcrumb, FolderEntry, FolderRef, FolderTreeNode};
pub use item::ItemRef;
pub use search::SearchResults;
pub use share::{ShareLink, SharedFile};
