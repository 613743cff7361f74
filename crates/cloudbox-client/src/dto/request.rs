//! Request bodies.
//!
//! Move bodies encode the root as `0`: the backend ignores a `null` parent in
//! update requests, so `0` is the only way to say "move to root".

use chrono::{DateTime, Utc};
use serde::Serialize;

use cloudbox_core::types::FolderId;

/// Wire value for a move destination.
pub fn move_target(target: Option<FolderId>) -> i64 {
    target.map_or(0, FolderId::get)
}

/// `POST /folders/`
#[derive(Debug, Clone, Serialize)]
pub struct CreateFolderBody<'a> {
    pub name: &'a str,
    pub parent_id: Option<FolderId>,
}

/// `PUT /files/{id}` and `PUT /folders/{id}` with a new name.
#[derive(Debug, Clone, Serialize)]
pub struct RenameBody<'a> {
    pub name: &'a str,
}

/// `PUT /files/{id}` with a new folder.
#[derive(Debug, Clone, Serialize)]
pub struct MoveFileBody {
    pub folder_id: i64,
}

/// `PUT /folders/{id}` with a new parent.
#[derive(Debug, Clone, Serialize)]
pub struct MoveFolderBody {
    pub parent_id: i64,
}

/// `POST /shares/{file_id}`
#[derive(Debug, Clone, Serialize)]
pub struct CreateShareBody {
    pub expires_at: Option<DateTime<Utc>>,
}
