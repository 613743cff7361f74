//! The trash view: soft-deleted files and folders.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use cloudbox_client::RemoteFacade;
use cloudbox_core::error::ErrorKind;
use cloudbox_core::result::AppResult;
use cloudbox_entity::{FileEntry, FolderEntry, ItemRef};

use crate::explorer::state::ExplorerStatus;

/// Everything currently in the trash.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrashListing {
    pub files: Vec<FileEntry>,
    pub folders: Vec<FolderEntry>,
}

impl TrashListing {
    /// Number of trashed items.
    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len()
    }

    /// Whether the trash is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    /// Every item as a typed reference, files first.
    pub fn items(&self) -> Vec<ItemRef> {
        self.files
            .iter()
            .map(|f| ItemRef::File(f.id))
            .chain(self.folders.iter().map(|f| ItemRef::Folder(f.id)))
            .collect()
    }
}

/// Summary of an empty-trash run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmptyTrashReport {
    /// Items erased by this run.
    pub deleted: usize,
    /// Items already gone, usually erased along with a trashed parent.
    pub already_gone: usize,
}

#[derive(Debug, Default)]
struct TrashState {
    status: ExplorerStatus,
    listing: TrashListing,
    generation: u64,
}

/// Keeps a view of the trash in step with the backend.
#[derive(Debug)]
pub struct TrashReconciler {
    facade: Arc<dyn RemoteFacade>,
    state: RwLock<TrashState>,
}

impl TrashReconciler {
    /// Creates an empty, unloaded view.
    pub fn new(facade: Arc<dyn RemoteFacade>) -> Self {
        Self {
            facade,
            state: RwLock::new(TrashState::default()),
        }
    }

    /// Current status.
    pub async fn status(&self) -> ExplorerStatus {
        self.state.read().await.status.clone()
    }

    /// Last successfully loaded listing.
    pub async fn listing(&self) -> TrashListing {
        self.state.read().await.listing.clone()
    }

    /// Fetch trashed files and folders. Overlapping loads resolve to the
    /// last one started; a failed load keeps the previous listing.
    #[instrument(skip(self))]
    pub async fn load(&self) -> AppResult<TrashListing> {
        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.status = ExplorerStatus::Loading;
            state.generation
        };

        let fetched = futures::try_join!(
            self.facade.list_trashed_files(),
            self.facade.list_trashed_folders(),
        );

        let mut state = self.state.write().await;
        if state.generation != generation {
            debug!("Discarding stale trash listing");
            return Ok(state.listing.clone());
        }
        match fetched {
            Ok((files, folders)) => {
                state.listing = TrashListing {
                    files: files.into_iter().filter(|f| f.is_deleted).collect(),
                    folders: folders.into_iter().filter(|f| f.is_deleted).collect(),
                };
                state.status = ExplorerStatus::Ready;
                Ok(state.listing.clone())
            }
            Err(e) => {
                state.status = ExplorerStatus::Error(e.message.clone());
                Err(e)
            }
        }
    }

    /// Bring an item back, then reload.
    #[instrument(skip(self))]
    pub async fn restore(&self, item: ItemRef) -> AppResult<()> {
        let result = match item {
            ItemRef::File(id) => self.facade.restore_file(id).await,
            ItemRef::Folder(id) => self.facade.restore_folder(id).await,
        };
        self.settle(item, "restored", result).await
    }

    /// Erase an item for good, then reload.
    #[instrument(skip(self))]
    pub async fn delete_permanently(&self, item: ItemRef) -> AppResult<()> {
        let result = self.erase(item).await;
        self.settle(item, "erased", result).await
    }

    /// Erase everything in the trash: files first, then folders.
    ///
    /// An item that is already gone (erased with its folder) is counted and
    /// skipped. Any other failure stops the run; the listing is reloaded
    /// either way.
    #[instrument(skip(self))]
    pub async fn empty(&self) -> AppResult<EmptyTrashReport> {
        let listing = self.load().await?;
        let mut report = EmptyTrashReport::default();

        for item in listing.items() {
            match self.erase(item).await {
                Ok(()) => report.deleted += 1,
                Err(e) if e.kind == ErrorKind::NotFound => {
                    debug!(%item, "Already gone");
                    report.already_gone += 1;
                }
                Err(e) => {
                    warn!(%item, error = %e, "Empty trash interrupted");
                    if let Err(reload) = self.load().await {
                        warn!(error = %reload, "Trash reload failed");
                    }
                    return Err(e);
                }
            }
        }

        self.load().await?;
        info!(
            deleted = report.deleted,
            already_gone = report.already_gone,
            "Trash emptied"
        );
        Ok(report)
    }

    async fn erase(&self, item: ItemRef) -> AppResult<()> {
        match item {
            ItemRef::File(id) => self.facade.delete_file(id, true).await,
            ItemRef::Folder(id) => self.facade.delete_folder(id, true).await,
        }
    }

    /// Reload after a single-item change. A `NotFound` also reloads, since
    /// the listing was stale.
    async fn settle(&self, item: ItemRef, verb: &str, result: AppResult<()>) -> AppResult<()> {
        match result {
            Ok(()) => {
                info!(%item, "Trash item {verb}");
                if let Err(e) = self.load().await {
                    warn!(error = %e, "Trash reload failed");
                }
                Ok(())
            }
            Err(e) => {
                if e.kind.invalidates_view() {
                    if let Err(reload) = self.load().await {
                        warn!(error = %reload, "Trash reload failed");
                    }
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cloudbox_client::{FacadeOp, MemoryFacade};
    use cloudbox_core::error::AppError;

    use super::*;

    #[tokio::test]
    async fn test_load_lists_only_trashed() {
        let facade = Arc::new(MemoryFacade::new());
        let keep = facade.seed_file("keep.txt", 1, None, None);
        let gone = facade.seed_file("gone.txt", 1, None, None);
        facade.delete_file(gone, false).await.unwrap();

        let trash = TrashReconciler::new(facade.clone());
        let listing = trash.load().await.unwrap();
        assert_eq!(listing.items(), vec![ItemRef::File(gone)]);
        assert_ne!(listing.files[0].id, keep);
        assert_eq!(trash.status().await, ExplorerStatus::Ready);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_listing() {
        let facade = Arc::new(MemoryFacade::new());
        let gone = facade.seed_file("gone.txt", 1, None, None);
        facade.delete_file(gone, false).await.unwrap();
        let trash = TrashReconciler::new(facade.clone());
        trash.load().await.unwrap();

        facade.fail_next(FacadeOp::ListTrashedFolders, AppError::network("offline"));
        assert!(trash.load().await.is_err());
        assert_eq!(trash.listing().await.len(), 1);
        assert!(trash.status().await.error().is_some());
    }

    #[tokio::test]
    async fn test_restore_missing_item_reloads() {
        let facade = Arc::new(MemoryFacade::new());
        let trash = TrashReconciler::new(facade.clone());

        let err = trash
            .restore(ItemRef::File(cloudbox_core::types::FileId(9)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(facade.calls_of(FacadeOp::ListTrashedFiles).len(), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_the_original_error() {
        let facade = Arc::new(MemoryFacade::new());
        let gone = facade.seed_file("gone.txt", 1, None, None);
        let trash = TrashReconciler::new(facade.clone());

        facade.fail_next(FacadeOp::RestoreFile, AppError::not_found("Fichier non trouvé"));
        facade.fail_next(FacadeOp::ListTrashedFiles, AppError::network("offline"));
        let err = trash.restore(ItemRef::File(gone)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(trash.status().await.error().is_some());

        facade.delete_file(gone, false).await.unwrap();
        trash.load().await.unwrap();
        facade.fail_next(FacadeOp::DeleteFile, AppError::network("offline"));
        facade.fail_next(FacadeOp::ListTrashedFiles, AppError::network("still offline"));
        let err = trash.empty().await.unwrap_err();
        assert_eq!(err.message, "offline");
        assert_eq!(trash.listing().await.len(), 1);
    }
}
