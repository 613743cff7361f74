//! In-memory [`RemoteFacade`] for tests and offline demos.
//!
//! Mirrors the backend's observable rules (trash flags, recursive folder
//! operations, cyclic move rejection, reparenting on restore) and records
//! every call so tests can assert on what was sent.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Notify;

use cloudbox_core::error::AppError;
use cloudbox_core::result::AppResult;
use cloudbox_core::types::{FileId, FolderId, ShareId};
use cloudbox_entity::{FileEntry, FolderEntry, SearchResults, ShareLink, SharedFile};

use crate::facade::{FileContent, FileUpload, RemoteFacade, UploadReceipt};

/// Operation selector for failure injection and call filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacadeOp {
    ListFiles,
    ListFolders,
    GetFolder,
    GetFile,
    CreateFolder,
    RenameFile,
    RenameFolder,
    MoveFile,
    MoveFolder,
    DeleteFile,
    DeleteFolder,
    RestoreFile,
    RestoreFolder,
    ListTrashedFiles,
    ListTrashedFolders,
    CreateShare,
    ListShares,
    DeleteShare,
    Search,
    UploadFile,
    DownloadFile,
    OpenShared,
    DownloadShared,
}

/// One recorded facade invocation with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum FacadeCall {
    ListFiles(Option<FolderId>),
    ListFolders(Option<FolderId>),
    GetFolder(FolderId),
    GetFile(FileId),
    CreateFolder {
        name: String,
        parent: Option<FolderId>,
    },
    RenameFile {
        id: FileId,
        name: String,
    },
    RenameFolder {
        id: FolderId,
        name: String,
    },
    MoveFile {
        id: FileId,
        target: Option<FolderId>,
    },
    MoveFolder {
        id: FolderId,
        target: Option<FolderId>,
    },
    DeleteFile {
        id: FileId,
        permanent: bool,
    },
    DeleteFolder {
        id: FolderId,
        permanent: bool,
    },
    RestoreFile(FileId),
    RestoreFolder(FolderId),
    ListTrashedFiles,
    ListTrashedFolders,
    CreateShare {
        file: FileId,
        expires_at: Option<DateTime<Utc>>,
    },
    ListShares(Option<FileId>),
    DeleteShare(ShareId),
    Search {
        term: String,
        scope: Option<FolderId>,
    },
    UploadFile {
        name: String,
        size: u64,
        folder_id: Option<FolderId>,
    },
    DownloadFile(FileId),
    OpenShared(String),
    DownloadShared(String),
}

impl FacadeCall {
    /// The operation this call invoked.
    pub fn op(&self) -> FacadeOp {
        match self {
            Self::ListFiles(_) => FacadeOp::ListFiles,
            Self::ListFolders(_) => FacadeOp::ListFolders,
            Self::GetFolder(_) => FacadeOp::GetFolder,
            Self::GetFile(_) => FacadeOp::GetFile,
            Self::CreateFolder { .. } => FacadeOp::CreateFolder,
            Self::RenameFile { .. } => FacadeOp::RenameFile,
            Self::RenameFolder { .. } => FacadeOp::RenameFolder,
            Self::MoveFile { .. } => FacadeOp::MoveFile,
            Self::MoveFolder { .. } => FacadeOp::MoveFolder,
            Self::DeleteFile { .. } => FacadeOp::DeleteFile,
            Self::DeleteFolder { .. } => FacadeOp::DeleteFolder,
            Self::RestoreFile(_) => FacadeOp::RestoreFile,
            Self::RestoreFolder(_) => FacadeOp::RestoreFolder,
            Self::ListTrashedFiles => FacadeOp::ListTrashedFiles,
            Self::ListTrashedFolders => FacadeOp::ListTrashedFolders,
            Self::CreateShare { .. } => FacadeOp::CreateShare,
            Self::ListShares(_) => FacadeOp::ListShares,
            Self::DeleteShare(_) => FacadeOp::DeleteShare,
            Self::Search { .. } => FacadeOp::Search,
            Self::UploadFile { .. } => FacadeOp::UploadFile,
            Self::DownloadFile(_) => FacadeOp::DownloadFile,
            Self::OpenShared(_) => FacadeOp::OpenShared,
            Self::DownloadShared(_) => FacadeOp::DownloadShared,
        }
    }

    /// Whether the call changes server state.
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Self::ListFiles(_)
                | Self::ListFolders(_)
                | Self::GetFolder(_)
                | Self::GetFile(_)
                | Self::ListTrashedFiles
                | Self::ListTrashedFolders
                | Self::ListShares(_)
                | Self::Search { .. }
                | Self::DownloadFile(_)
                | Self::OpenShared(_)
                | Self::DownloadShared(_)
        )
    }
}

#[derive(Debug, Default)]
struct Store {
    folders: BTreeMap<FolderId, FolderEntry>,
    files: BTreeMap<FileId, FileEntry>,
    shares: BTreeMap<ShareId, ShareLink>,
    contents: HashMap<FileId, Vec<u8>>,
    last_id: i64,
    calls: Vec<FacadeCall>,
    failures: HashMap<FacadeOp, VecDeque<AppError>>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn live_folder(&self, id: FolderId) -> AppResult<&FolderEntry> {
        self.folders
            .get(&id)
            .filter(|f| !f.is_deleted)
            .ok_or_else(|| AppError::not_found("Dossier non trouvé"))
    }

    fn live_file(&self, id: FileId) -> AppResult<&FileEntry> {
        self.files
            .get(&id)
            .filter(|f| !f.is_deleted)
            .ok_or_else(|| AppError::not_found("Fichier non trouvé"))
    }

    fn require_parent(&self, parent: Option<FolderId>) -> AppResult<()> {
        match parent {
            Some(id) => self.live_folder(id).map(|_| ()),
            None => Ok(()),
        }
    }

    /// `root` and every folder beneath it, regardless of trash state.
    fn subtree(&self, root: FolderId) -> Vec<FolderId> {
        let mut out = vec![root];
        let mut cursor = 0;
        while let Some(&current) = out.get(cursor) {
            out.extend(
                self.folders
                    .values()
                    .filter(|f| f.parent_id == Some(current))
                    .map(|f| f.id),
            );
            cursor += 1;
        }
        out
    }

    fn is_within(&self, candidate: FolderId, ancestor: FolderId) -> bool {
        let mut cursor = Some(candidate);
        let mut hops = 0;
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            hops += 1;
            if hops > self.folders.len() {
                return false;
            }
            cursor = self.folders.get(&id).and_then(|f| f.parent_id);
        }
        false
    }

    fn sibling_name_taken(
        &self,
        parent: Option<FolderId>,
        name: &str,
        except: Option<FolderId>,
    ) -> bool {
        self.folders.values().any(|f| {
            !f.is_deleted
                && f.parent_id == parent
                && Some(f.id) != except
                && f.name.eq_ignore_ascii_case(name)
        })
    }

    fn set_trashed(&mut self, folders: &[FolderId], trashed: bool, now: DateTime<Utc>) {
        let deleted_at = trashed.then_some(now);
        for id in folders {
            if let Some(folder) = self.folders.get_mut(id) {
                folder.is_deleted = trashed;
                folder.deleted_at = deleted_at;
            }
        }
        for file in self.files.values_mut() {
            if file.folder_id.is_some_and(|f| folders.contains(&f)) {
                file.is_deleted = trashed;
                file.deleted_at = deleted_at;
            }
        }
    }

    fn remove_file(&mut self, id: FileId) {
        self.files.remove(&id);
        self.contents.remove(&id);
        self.shares.retain(|_, s| s.file_id != id);
    }

    /// Seeded files have no stored bytes and read back as zeros.
    fn content_of(&self, file: &FileEntry) -> FileContent {
        let bytes = self
            .contents
            .get(&file.id)
            .cloned()
            .unwrap_or_else(|| vec![0; file.size as usize]);
        FileContent {
            name: Some(file.name.clone()),
            mime_type: file.mime_type.clone(),
            bytes,
        }
    }

    /// The live file behind an active, unexpired link. Following an expired
    /// link deactivates it.
    fn shared_file(&mut self, token: &str) -> AppResult<&FileEntry> {
        let share = self
            .shares
            .values_mut()
            .find(|s| s.token == token && s.is_active)
            .ok_or_else(|| AppError::not_found("Lien de partage invalide ou expiré"))?;
        if share.is_expired_at(Utc::now()) {
            share.is_active = false;
            return Err(AppError::from_status(410, "Ce lien de partage a expiré"));
        }
        let file = share.file_id;
        self.files
            .get(&file)
            .filter(|f| !f.is_deleted)
            .ok_or_else(|| AppError::not_found("Fichier non trouvé ou supprimé"))
    }
}

/// A pause point for `list_files(parent)`. Listing calls for that parent
/// block until the gate is released or dropped.
#[derive(Debug)]
pub struct ListingGate {
    parent: Option<FolderId>,
    notify: Arc<Notify>,
    gates: Arc<Mutex<HashMap<Option<FolderId>, Arc<Notify>>>>,
}

impl ListingGate {
    /// Let the blocked listing proceed.
    pub fn release(self) {}
}

impl Drop for ListingGate {
    fn drop(&mut self) {
        self.gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.parent);
        self.notify.notify_one();
    }
}

/// A whole account kept in memory.
#[derive(Debug, Default)]
pub struct MemoryFacade {
    store: Mutex<Store>,
    gates: Arc<Mutex<HashMap<Option<FolderId>, Arc<Notify>>>>,
}

impl MemoryFacade {
    /// An empty account.
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `call` and return the injected failure for it, if any.
    fn enter(&self, call: FacadeCall) -> AppResult<MutexGuard<'_, Store>> {
        let mut store = self.store();
        let op = call.op();
        store.calls.push(call);
        if let Some(err) = store.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            return Err(err);
        }
        Ok(store)
    }

    /// Add a folder directly, bypassing validation.
    pub fn seed_folder(&self, name: &str, parent: Option<FolderId>) -> FolderId {
        let mut store = self.store();
        let id = FolderId(store.next_id());
        store.folders.insert(
            id,
            FolderEntry {
                id,
                name: name.to_string(),
                parent_id: parent,
                created_at: Utc::now(),
                updated_at: None,
                is_deleted: false,
                deleted_at: None,
            },
        );
        id
    }

    /// Add a file directly, bypassing validation.
    pub fn seed_file(
        &self,
        name: &str,
        size: u64,
        mime_type: Option<&str>,
        folder: Option<FolderId>,
    ) -> FileId {
        let mut store = self.store();
        let id = FileId(store.next_id());
        store.files.insert(
            id,
            FileEntry {
                id,
                name: name.to_string(),
                size,
                mime_type: mime_type.map(str::to_string),
                folder_id: folder,
                created_at: Utc::now(),
                updated_at: None,
                is_deleted: false,
                deleted_at: None,
            },
        );
        id
    }

    /// Make the next call of `op` fail with `err`. Failures queue up.
    pub fn fail_next(&self, op: FacadeOp, err: AppError) {
        self.store().failures.entry(op).or_default().push_back(err);
    }

    /// Block `list_files(parent)` until the returned gate is released.
    pub fn pause_listing(&self, parent: Option<FolderId>) -> ListingGate {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(parent, Arc::clone(&notify));
        ListingGate {
            parent,
            notify,
            gates: Arc::clone(&self.gates),
        }
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<FacadeCall> {
        self.store().calls.clone()
    }

    /// Calls of one operation.
    pub fn calls_of(&self, op: FacadeOp) -> Vec<FacadeCall> {
        self.store()
            .calls
            .iter()
            .filter(|c| c.op() == op)
            .cloned()
            .collect()
    }

    /// Number of state-changing calls made so far.
    pub fn mutation_count(&self) -> usize {
        self.store().calls.iter().filter(|c| c.is_mutation()).count()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.store().calls.clear();
    }

    /// Current state of a folder, trashed or not.
    pub fn folder(&self, id: FolderId) -> Option<FolderEntry> {
        self.store().folders.get(&id).cloned()
    }

    /// Current state of a file, trashed or not.
    pub fn file(&self, id: FileId) -> Option<FileEntry> {
        self.store().files.get(&id).cloned()
    }

    /// Every share link, active or not.
    pub fn shares(&self) -> Vec<ShareLink> {
        self.store().shares.values().cloned().collect()
    }
}

#[async_trait]
impl RemoteFacade for MemoryFacade {
    async fn list_files(&self, parent: Option<FolderId>) -> AppResult<Vec<FileEntry>> {
        drop(self.enter(FacadeCall::ListFiles(parent))?);

        let gate = self
            .gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&parent)
            .cloned();
        if let Some(notify) = gate {
            notify.notified().await;
        }

        let store = self.store();
        store.require_parent(parent)?;
        Ok(store
            .files
            .values()
            .filter(|f| !f.is_deleted && f.folder_id == parent)
            .cloned()
            .collect())
    }

    async fn list_folders(&self, parent: Option<FolderId>) -> AppResult<Vec<FolderEntry>> {
        let store = self.enter(FacadeCall::ListFolders(parent))?;
        store.require_parent(parent)?;
        Ok(store
            .folders
            .values()
            .filter(|f| !f.is_deleted && f.parent_id == parent)
            .cloned()
            .collect())
    }

    async fn get_folder(&self, id: FolderId) -> AppResult<FolderEntry> {
        let store = self.enter(FacadeCall::GetFolder(id))?;
        store.live_folder(id).cloned()
    }

    async fn get_file(&self, id: FileId) -> AppResult<FileEntry> {
        let store = self.enter(FacadeCall::GetFile(id))?;
        store.live_file(id).cloned()
    }

    async fn create_folder(&self, name: &str, parent: Option<FolderId>) -> AppResult<FolderEntry> {
        let mut store = self.enter(FacadeCall::CreateFolder {
            name: name.to_string(),
            parent,
        })?;
        store.require_parent(parent)?;
        if store.sibling_name_taken(parent, name, None) {
            return Err(AppError::conflict(format!(
                "Un dossier nommé '{name}' existe déjà"
            )));
        }
        let id = FolderId(store.next_id());
        let folder = FolderEntry {
            id,
            name: name.to_string(),
            parent_id: parent,
            created_at: Utc::now(),
            updated_at: None,
            is_deleted: false,
            deleted_at: None,
        };
        store.folders.insert(id, folder.clone());
        Ok(folder)
    }

    async fn rename_file(&self, id: FileId, name: &str) -> AppResult<FileEntry> {
        let mut store = self.enter(FacadeCall::RenameFile {
            id,
            name: name.to_string(),
        })?;
        store.live_file(id)?;
        let file = store
            .files
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Fichier non trouvé"))?;
        file.name = name.to_string();
        file.updated_at = Some(Utc::now());
        Ok(file.clone())
    }

    async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<FolderEntry> {
        let mut store = self.enter(FacadeCall::RenameFolder {
            id,
            name: name.to_string(),
        })?;
        let parent = store.live_folder(id)?.parent_id;
        if store.sibling_name_taken(parent, name, Some(id)) {
            return Err(AppError::conflict(format!(
                "Un dossier nommé '{name}' existe déjà"
            )));
        }
        let folder = store
            .folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Dossier non trouvé"))?;
        folder.name = name.to_string();
        folder.updated_at = Some(Utc::now());
        Ok(folder.clone())
    }

    async fn move_file(&self, id: FileId, target: Option<FolderId>) -> AppResult<FileEntry> {
        let mut store = self.enter(FacadeCall::MoveFile { id, target })?;
        store.live_file(id)?;
        store.require_parent(target)?;
        let file = store
            .files
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Fichier non trouvé"))?;
        file.folder_id = target;
        file.updated_at = Some(Utc::now());
        Ok(file.clone())
    }

    async fn move_folder(
        &self,
        id: FolderId,
        target: Option<FolderId>,
    ) -> AppResult<FolderEntry> {
        let mut store = self.enter(FacadeCall::MoveFolder { id, target })?;
        store.live_folder(id)?;
        if let Some(target) = target {
            if target == id {
                return Err(AppError::conflict(
                    "Un dossier ne peut pas être son propre parent",
                ));
            }
            store.live_folder(target)?;
            if store.is_within(target, id) {
                return Err(AppError::conflict(
                    "Impossible de déplacer un dossier dans un de ses sous-dossiers",
                ));
            }
        }
        let folder = store
            .folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Dossier non trouvé"))?;
        folder.parent_id = target;
        folder.updated_at = Some(Utc::now());
        Ok(folder.clone())
    }

    async fn delete_file(&self, id: FileId, permanent: bool) -> AppResult<()> {
        let mut store = self.enter(FacadeCall::DeleteFile { id, permanent })?;
        if permanent {
            if !store.files.contains_key(&id) {
                return Err(AppError::not_found("Fichier non trouvé"));
            }
            store.remove_file(id);
            return Ok(());
        }
        store.live_file(id)?;
        if let Some(file) = store.files.get_mut(&id) {
            file.is_deleted = true;
            file.deleted_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete_folder(&self, id: FolderId, permanent: bool) -> AppResult<()> {
        let mut store = self.enter(FacadeCall::DeleteFolder { id, permanent })?;
        if permanent {
            if !store.folders.contains_key(&id) {
                return Err(AppError::not_found("Dossier non trouvé"));
            }
            let subtree = store.subtree(id);
            let doomed: Vec<FileId> = store
                .files
                .values()
                .filter(|f| f.folder_id.is_some_and(|p| subtree.contains(&p)))
                .map(|f| f.id)
                .collect();
            for file in doomed {
                store.remove_file(file);
            }
            for folder in subtree {
                store.folders.remove(&folder);
            }
            return Ok(());
        }
        store.live_folder(id)?;
        let subtree = store.subtree(id);
        store.set_trashed(&subtree, true, Utc::now());
        Ok(())
    }

    async fn restore_file(&self, id: FileId) -> AppResult<()> {
        let mut store = self.enter(FacadeCall::RestoreFile(id))?;
        let folder = store
            .files
            .get(&id)
            .filter(|f| f.is_deleted)
            .ok_or_else(|| AppError::not_found("Fichier non trouvé dans la corbeille"))?
            .folder_id;
        let orphaned = folder.is_some_and(|p| store.live_folder(p).is_err());
        if let Some(file) = store.files.get_mut(&id) {
            file.is_deleted = false;
            file.deleted_at = None;
            if orphaned {
                file.folder_id = None;
            }
        }
        Ok(())
    }

    async fn restore_folder(&self, id: FolderId) -> AppResult<()> {
        let mut store = self.enter(FacadeCall::RestoreFolder(id))?;
        let parent = store
            .folders
            .get(&id)
            .filter(|f| f.is_deleted)
            .ok_or_else(|| AppError::not_found("Dossier non trouvé dans la corbeille"))?
            .parent_id;
        let orphaned = parent.is_some_and(|p| store.live_folder(p).is_err());
        let subtree = store.subtree(id);
        store.set_trashed(&subtree, false, Utc::now());
        if orphaned {
            if let Some(folder) = store.folders.get_mut(&id) {
                folder.parent_id = None;
            }
        }
        Ok(())
    }

    async fn list_trashed_files(&self) -> AppResult<Vec<FileEntry>> {
        let store = self.enter(FacadeCall::ListTrashedFiles)?;
        Ok(store.files.values().filter(|f| f.is_deleted).cloned().collect())
    }

    async fn list_trashed_folders(&self) -> AppResult<Vec<FolderEntry>> {
        let store = self.enter(FacadeCall::ListTrashedFolders)?;
        Ok(store
            .folders
            .values()
            .filter(|f| f.is_deleted)
            .cloned()
            .collect())
    }

    async fn create_share(
        &self,
        file: FileId,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<ShareLink> {
        let mut store = self.enter(FacadeCall::CreateShare { file, expires_at })?;
        store.live_file(file)?;
        let id = ShareId(store.next_id());
        let link = ShareLink {
            id,
            token: format!("share-{:08x}", id.get()),
            file_id: file,
            is_active: true,
            expires_at,
            created_at: Utc::now(),
        };
        store.shares.insert(id, link.clone());
        Ok(link)
    }

    async fn list_shares(&self, file: Option<FileId>) -> AppResult<Vec<ShareLink>> {
        let store = self.enter(FacadeCall::ListShares(file))?;
        Ok(store
            .shares
            .values()
            .filter(|s| file.is_none_or(|f| s.file_id == f))
            .cloned()
            .collect())
    }

    async fn delete_share(&self, id: ShareId) -> AppResult<()> {
        let mut store = self.enter(FacadeCall::DeleteShare(id))?;
        store
            .shares
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Lien de partage non trouvé"))
    }

    async fn search(&self, term: &str, scope: Option<FolderId>) -> AppResult<SearchResults> {
        let store = self.enter(FacadeCall::Search {
            term: term.to_string(),
            scope,
        })?;
        let needle = term.to_lowercase();
        let matches = |name: &str| name.to_lowercase().contains(&needle);
        Ok(SearchResults {
            files: store
                .files
                .values()
                .filter(|f| !f.is_deleted && matches(&f.name))
                .filter(|f| scope.is_none() || f.folder_id == scope)
                .cloned()
                .collect(),
            folders: store
                .folders
                .values()
                .filter(|f| !f.is_deleted && matches(&f.name))
                .filter(|f| scope.is_none() || f.parent_id == scope)
                .cloned()
                .collect(),
        })
    }

    async fn upload_file(&self, upload: FileUpload) -> AppResult<UploadReceipt> {
        let size = upload.bytes.len() as u64;
        let mut store = self.enter(FacadeCall::UploadFile {
            name: upload.name.clone(),
            size,
            folder_id: upload.folder_id,
        })?;
        store.require_parent(upload.folder_id)?;
        let id = FileId(store.next_id());
        store.files.insert(
            id,
            FileEntry {
                id,
                name: upload.name.clone(),
                size,
                mime_type: upload.mime_type.clone(),
                folder_id: upload.folder_id,
                created_at: Utc::now(),
                updated_at: None,
                is_deleted: false,
                deleted_at: None,
            },
        );
        store.contents.insert(id, upload.bytes);
        Ok(UploadReceipt {
            id,
            name: upload.name,
            size,
            mime_type: upload.mime_type,
        })
    }

    async fn download_file(&self, id: FileId) -> AppResult<FileContent> {
        let store = self.enter(FacadeCall::DownloadFile(id))?;
        let file = store.live_file(id)?;
        Ok(store.content_of(file))
    }

    async fn open_shared(&self, token: &str) -> AppResult<SharedFile> {
        let mut store = self.enter(FacadeCall::OpenShared(token.to_string()))?;
        let file = store.shared_file(token)?;
        Ok(SharedFile {
            id: file.id,
            name: file.name.clone(),
            original_name: Some(file.name.clone()),
            size: file.size,
            mime_type: file.mime_type.clone(),
            created_at: Some(file.created_at),
        })
    }

    async fn download_shared(&self, token: &str) -> AppResult<FileContent> {
        let mut store = self.enter(FacadeCall::DownloadShared(token.to_string()))?;
        let file = store.shared_file(token)?.clone();
        Ok(store.content_of(&file))
    }
}
