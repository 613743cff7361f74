//! File domain entities.

pub mod kind;
pub mod model;

pub use kind::{FileKind, PreviewKind};
pub use model::FileEntry;
