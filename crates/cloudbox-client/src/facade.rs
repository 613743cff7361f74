//! The remote access facade contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cloudbox_core::result::AppResult;
use cloudbox_core::types::{FileId, FolderId, ShareId};
use cloudbox_entity::{FileEntry, FolderEntry, SearchResults, ShareLink, SharedFile};

/// A file to upload in a single request.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Target file name.
    pub name: String,
    /// Raw content.
    pub bytes: Vec<u8>,
    /// MIME type, when known.
    pub mime_type: Option<String>,
    /// Destination folder (`None` = root).
    pub folder_id: Option<FolderId>,
}

/// Server acknowledgement of an upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Id of the created file.
    pub id: FileId,
    /// Stored name.
    pub name: String,
    /// Stored size in bytes.
    pub size: u64,
    /// Detected MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Downloaded file content.
#[derive(Debug, Clone, PartialEq)]
pub struct FileContent {
    /// Name the server suggested, when it sent one.
    pub name: Option<String>,
    /// Content type the server declared.
    pub mime_type: Option<String>,
    /// Raw content.
    pub bytes: Vec<u8>,
}

/// Every backend operation the client core consumes.
///
/// Parent references are always `Option<FolderId>` with `None` meaning the
/// root; implementations translate to whatever sentinel their wire format
/// uses. Every method is a single request: no retries, no caching.
#[async_trait]
pub trait RemoteFacade: Send + Sync + std::fmt::Debug + 'static {
    /// Files directly inside `parent`, excluding trashed ones.
    async fn list_files(&self, parent: Option<FolderId>) -> AppResult<Vec<FileEntry>>;

    /// Folders directly inside `parent`, excluding trashed ones.
    async fn list_folders(&self, parent: Option<FolderId>) -> AppResult<Vec<FolderEntry>>;

    /// Details of one folder. `NotFound` if missing or not owned.
    async fn get_folder(&self, id: FolderId) -> AppResult<FolderEntry>;

    /// Details of one file. `NotFound` if missing or not owned.
    async fn get_file(&self, id: FileId) -> AppResult<FileEntry>;

    /// Create a folder under `parent`.
    async fn create_folder(&self, name: &str, parent: Option<FolderId>) -> AppResult<FolderEntry>;

    /// Rename a file.
    async fn rename_file(&self, id: FileId, name: &str) -> AppResult<FileEntry>;

    /// Rename a folder.
    async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<FolderEntry>;

    /// Move a file into `target`.
    async fn move_file(&self, id: FileId, target: Option<FolderId>) -> AppResult<FileEntry>;

    /// Move a folder under `target`. Cyclic moves are rejected.
    async fn move_folder(&self, id: FolderId, target: Option<FolderId>)
    -> AppResult<FolderEntry>;

    /// Trash a file, or erase it when `permanent`.
    async fn delete_file(&self, id: FileId, permanent: bool) -> AppResult<()>;

    /// Trash a folder and its contents, or erase them when `permanent`.
    async fn delete_folder(&self, id: FolderId, permanent: bool) -> AppResult<()>;

    /// Bring a trashed file back.
    async fn restore_file(&self, id: FileId) -> AppResult<()>;

    /// Bring a trashed folder and its contents back.
    async fn restore_folder(&self, id: FolderId) -> AppResult<()>;

    /// Every trashed file, regardless of folder.
    async fn list_trashed_files(&self) -> AppResult<Vec<FileEntry>>;

    /// Every trashed folder, regardless of parent.
    async fn list_trashed_folders(&self) -> AppResult<Vec<FolderEntry>>;

    /// Issue a public link to a file.
    async fn create_share(
        &self,
        file: FileId,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<ShareLink>;

    /// Links issued by the caller, optionally for one file only.
    async fn list_shares(&self, file: Option<FileId>) -> AppResult<Vec<ShareLink>>;

    /// Revoke a link.
    async fn delete_share(&self, id: ShareId) -> AppResult<()>;

    /// Name search, optionally limited to the direct children of `scope`.
    async fn search(&self, term: &str, scope: Option<FolderId>) -> AppResult<SearchResults>;

    /// Upload a file in one request.
    async fn upload_file(&self, upload: FileUpload) -> AppResult<UploadReceipt>;

    /// Fetch the content of one of the caller's files.
    async fn download_file(&self, id: FileId) -> AppResult<FileContent>;

    /// Resolve a public link without signing in. An expired link is `NotFound`.
    async fn open_shared(&self, token: &str) -> AppResult<SharedFile>;

    /// Fetch the file behind a public link without signing in.
    async fn download_shared(&self, token: &str) -> AppResult<FileContent>;
}
