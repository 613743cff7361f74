//! The explorer: one folder view kept consistent with the backend.
//!
//! All state lives behind a single lock that is never held across a facade
//! call. Each navigation takes a generation number; a response whose
//! generation is no longer current is dropped, so the last navigation issued
//! always wins. Mutations are never applied locally: a successful call is
//! followed by a re-fetch of the opened folder.

pub mod drag;
pub mod search;
pub mod state;

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use cloudbox_client::{FileUpload, RemoteFacade, UploadReceipt};
use cloudbox_core::config::explorer::ExplorerConfig;
use cloudbox_core::error::AppError;
use cloudbox_core::result::AppResult;
use cloudbox_core::types::{FileId, FolderId, ShareId};
use cloudbox_entity::{
    Breadcrumb, FolderEntry, FolderRef, FolderTreeNode, ItemRef, SearchResults, ShareLink,
};

use crate::format::format_file_size;
use crate::tree::FolderTreeAggregator;
use crate::validation::validate_file_name;

use self::drag::{DragPayload, DragState, DropOutcome};
use self::search::{FilteredItems, filter_items};
use self::state::{ExplorerContext, ExplorerSnapshot, ExplorerState, ExplorerStatus};

pub use self::state::NavigationOutcome;

/// A folder view bound to one backend.
#[derive(Debug)]
pub struct Explorer {
    facade: Arc<dyn RemoteFacade>,
    config: ExplorerConfig,
    state: RwLock<ExplorerState>,
    cancel: CancellationToken,
}

impl Explorer {
    /// Creates an idle explorer. Nothing is fetched until the first
    /// [`navigate_to`](Self::navigate_to).
    pub fn new(facade: Arc<dyn RemoteFacade>, config: ExplorerConfig) -> Self {
        Self {
            facade,
            config,
            state: RwLock::new(ExplorerState::default()),
            cancel: CancellationToken::new(),
        }
    }

    /// The backend this explorer talks to.
    pub fn facade(&self) -> &Arc<dyn RemoteFacade> {
        &self.facade
    }

    /// Explorer tunables.
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// A consistent copy of the whole view state.
    pub async fn snapshot(&self) -> ExplorerSnapshot {
        self.state.read().await.snapshot()
    }

    /// Current status.
    pub async fn status(&self) -> ExplorerStatus {
        self.state.read().await.status.clone()
    }

    /// Currently displayed folder and children.
    pub async fn context(&self) -> ExplorerContext {
        self.state.read().await.context.clone()
    }

    /// Whether [`close`](Self::close) was called.
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn ensure_open(&self) -> AppResult<()> {
        if self.is_closed() {
            return Err(AppError::cancelled("The explorer is closed"));
        }
        Ok(())
    }

    /// Render a byte count with the configured precision.
    pub fn format_size(&self, bytes: u64) -> String {
        format_file_size(bytes, self.config.size_decimals)
    }

    // ── Navigation ─────────────────────────────────────────────────

    /// Open `target` (`None` = root).
    ///
    /// Folder details, files and subfolders are fetched concurrently and
    /// swapped in together. On failure the status becomes `Error` and the
    /// last good context stays on display.
    #[instrument(skip(self), fields(folder_id = ?target))]
    pub async fn navigate_to(&self, target: Option<FolderId>) -> AppResult<NavigationOutcome> {
        if self.is_closed() {
            return Ok(NavigationOutcome::Cancelled);
        }

        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.target = target;
            state.status = ExplorerStatus::Loading;
            state.generation
        };

        let fetched = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Ok(NavigationOutcome::Cancelled),
            fetched = self.fetch_context(target) => fetched,
        };

        let mut state = self.state.write().await;
        if self.is_closed() {
            return Ok(NavigationOutcome::Cancelled);
        }
        if state.generation != generation {
            debug!(generation, current = state.generation, "Discarding stale listing");
            return Ok(NavigationOutcome::Superseded);
        }

        match fetched {
            Ok(context) => {
                debug!(
                    files = context.files.len(),
                    folders = context.folders.len(),
                    "Folder loaded"
                );
                state.context = context;
                state.status = ExplorerStatus::Ready;
                Ok(NavigationOutcome::Applied)
            }
            Err(e) => {
                warn!(error = %e, "Folder load failed");
                state.status = ExplorerStatus::Error(e.message.clone());
                Err(e)
            }
        }
    }

    /// Re-run the last navigation. The only way out of `Error`.
    pub async fn retry(&self) -> AppResult<NavigationOutcome> {
        let target = self.state.read().await.target;
        self.navigate_to(target).await
    }

    /// Re-fetch the opened folder.
    pub async fn refresh(&self) -> AppResult<NavigationOutcome> {
        let target = self.state.read().await.target;
        self.navigate_to(target).await
    }

    async fn fetch_context(&self, target: Option<FolderId>) -> AppResult<ExplorerContext> {
        let ((current_folder, breadcrumbs), files, folders) = futures::try_join!(
            self.resolve_folder(target),
            self.facade.list_files(target),
            self.facade.list_folders(target),
        )?;
        Ok(ExplorerContext {
            current_folder,
            breadcrumbs,
            files,
            folders,
        })
    }

    /// Details of `target` and the breadcrumb trail leading to it.
    async fn resolve_folder(
        &self,
        target: Option<FolderId>,
    ) -> AppResult<(Option<FolderRef>, Vec<Breadcrumb>)> {
        let Some(id) = target else {
            return Ok((None, vec![Breadcrumb::root()]));
        };

        let folder = self.facade.get_folder(id).await?.to_ref();
        let mut ancestry = vec![folder.clone()];
        let mut seen = HashSet::from([folder.id]);
        let mut parent = folder.parent_id;
        while let Some(parent_id) = parent {
            if !seen.insert(parent_id) {
                return Err(AppError::conflict(format!(
                    "Folder {parent_id} is its own ancestor"
                )));
            }
            let entry = self.facade.get_folder(parent_id).await?;
            parent = entry.parent_id;
            ancestry.push(entry.to_ref());
        }
        ancestry.reverse();

        Ok((Some(folder), Breadcrumb::trail(&ancestry)))
    }

    // ── Local search ───────────────────────────────────────────────

    /// Set the local filter and return the matching children. Never fetches
    /// and never touches the loaded context.
    pub async fn apply_search(&self, term: &str) -> FilteredItems {
        let mut state = self.state.write().await;
        state.search_term = term.to_string();
        filter_items(&state.context, term)
    }

    /// Children matching the active filter.
    pub async fn filtered_items(&self) -> FilteredItems {
        let state = self.state.read().await;
        filter_items(&state.context, &state.search_term)
    }

    /// Server-side name search. Leaves the view untouched.
    #[instrument(skip(self))]
    pub async fn search_remote(
        &self,
        term: &str,
        scope: Option<FolderId>,
    ) -> AppResult<SearchResults> {
        self.ensure_open()?;
        let term = term.trim();
        if term.is_empty() {
            return Ok(SearchResults::default());
        }
        self.facade.search(term, scope).await
    }

    // ── Mutations ──────────────────────────────────────────────────

    /// Run one mutating call, then refresh.
    ///
    /// The status shows `Loading` while the call is in flight. On failure the
    /// prior status comes back and the context is left as it was, except that
    /// a `NotFound` also triggers a refresh since the view is likely stale.
    async fn mutate<T>(
        &self,
        action: &'static str,
        call: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        self.ensure_open()?;

        let (prior, generation) = {
            let mut state = self.state.write().await;
            let prior = std::mem::replace(&mut state.status, ExplorerStatus::Loading);
            (prior, state.generation)
        };

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(AppError::cancelled("The explorer is closed")),
            result = call => result,
        };

        match result {
            Ok(value) => {
                info!(action, "Change applied");
                if let Err(e) = self.refresh().await {
                    warn!(action, error = %e, "Refresh after change failed");
                }
                Ok(value)
            }
            Err(e) => {
                {
                    let mut state = self.state.write().await;
                    if state.generation == generation && state.status.is_loading() {
                        state.status = prior;
                    }
                }
                if e.kind.invalidates_view() && !self.is_closed() {
                    debug!(action, "Target vanished, refreshing");
                    if let Err(refresh_err) = self.refresh().await {
                        warn!(action, error = %refresh_err, "Refresh after failure failed");
                    }
                }
                Err(e)
            }
        }
    }

    /// Create a folder named `name` inside `parent` (`None` = root).
    #[instrument(skip(self), fields(parent_id = ?parent))]
    pub async fn create_folder(
        &self,
        name: &str,
        parent: Option<FolderId>,
    ) -> AppResult<FolderEntry> {
        validate_file_name(name)?;
        self.mutate("create_folder", self.facade.create_folder(name, parent))
            .await
    }

    /// Rename a file or folder.
    #[instrument(skip(self))]
    pub async fn rename_item(&self, item: ItemRef, new_name: &str) -> AppResult<()> {
        validate_file_name(new_name)?;
        match item {
            ItemRef::File(id) => {
                self.mutate("rename_file", self.facade.rename_file(id, new_name))
                    .await?;
            }
            ItemRef::Folder(id) => {
                self.mutate("rename_folder", self.facade.rename_folder(id, new_name))
                    .await?;
            }
        }
        Ok(())
    }

    /// Move a file or folder into `target` (`None` = root).
    ///
    /// Folder moves are checked first: moving a folder into itself or one of
    /// its descendants fails with `Conflict` before anything is changed.
    #[instrument(skip(self), fields(target = ?target))]
    pub async fn move_item(&self, item: ItemRef, target: Option<FolderId>) -> AppResult<()> {
        self.ensure_open()?;
        match item {
            ItemRef::File(id) => {
                self.mutate("move_file", self.facade.move_file(id, target))
                    .await?;
            }
            ItemRef::Folder(id) => {
                self.ensure_not_into_own_subtree(id, target).await?;
                self.mutate("move_folder", self.facade.move_folder(id, target))
                    .await?;
            }
        }
        Ok(())
    }

    /// Navigate to the folder that currently holds `item`.
    #[instrument(skip(self))]
    pub async fn reveal(&self, item: ItemRef) -> AppResult<NavigationOutcome> {
        self.ensure_open()?;
        let parent = match item {
            ItemRef::File(id) => self.facade.get_file(id).await?.folder_id,
            ItemRef::Folder(id) => self.facade.get_folder(id).await?.parent_id,
        };
        self.navigate_to(parent).await
    }

    /// Walk up from `target` and fail if `folder` is on the way.
    async fn ensure_not_into_own_subtree(
        &self,
        folder: FolderId,
        target: Option<FolderId>,
    ) -> AppResult<()> {
        let mut cursor = target;
        let mut seen = HashSet::new();
        while let Some(id) = cursor {
            if id == folder {
                return Err(AppError::conflict(
                    "A folder cannot be moved into itself or one of its subfolders",
                ));
            }
            if !seen.insert(id) {
                return Err(AppError::conflict(format!(
                    "Folder {id} is its own ancestor"
                )));
            }
            cursor = self.facade.get_folder(id).await?.parent_id;
        }
        Ok(())
    }

    /// Send an item to the trash, or erase it when `permanent`.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, item: ItemRef, permanent: bool) -> AppResult<()> {
        match item {
            ItemRef::File(id) => {
                self.mutate("delete_file", self.facade.delete_file(id, permanent))
                    .await
            }
            ItemRef::Folder(id) => {
                self.mutate("delete_folder", self.facade.delete_folder(id, permanent))
                    .await
            }
        }
    }

    /// Bring an item back from the trash.
    #[instrument(skip(self))]
    pub async fn restore_item(&self, item: ItemRef) -> AppResult<()> {
        match item {
            ItemRef::File(id) => {
                self.mutate("restore_file", self.facade.restore_file(id))
                    .await
            }
            ItemRef::Folder(id) => {
                self.mutate("restore_folder", self.facade.restore_folder(id))
                    .await
            }
        }
    }

    /// Upload a file after checking its name and size.
    #[instrument(skip(self, upload), fields(name = %upload.name, size = upload.bytes.len()))]
    pub async fn upload_file(&self, upload: FileUpload) -> AppResult<UploadReceipt> {
        validate_file_name(&upload.name)?;
        let size = upload.bytes.len() as u64;
        if size > self.config.max_upload_bytes {
            return Err(AppError::validation(format!(
                "The file is too large ({} > {})",
                self.format_size(size),
                self.format_size(self.config.max_upload_bytes)
            )));
        }
        self.mutate("upload_file", self.facade.upload_file(upload))
            .await
    }

    // ── Sharing ────────────────────────────────────────────────────

    /// Issue a public link to a file.
    #[instrument(skip(self))]
    pub async fn create_share_link(
        &self,
        file: FileId,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<ShareLink> {
        self.ensure_open()?;
        if expires_at.is_some_and(|at| at <= Utc::now()) {
            return Err(AppError::validation("The expiry date must be in the future"));
        }
        let link = self.facade.create_share(file, expires_at).await?;
        info!(share_id = %link.id, file_id = %file, "Share link created");
        Ok(link)
    }

    /// Public URL of a link, on the configured web origin.
    pub fn share_url(&self, link: &ShareLink) -> String {
        link.public_url(&self.config.share_base_url)
    }

    /// Links issued by the caller, optionally for one file only.
    pub async fn list_shares(&self, file: Option<FileId>) -> AppResult<Vec<ShareLink>> {
        self.ensure_open()?;
        self.facade.list_shares(file).await
    }

    /// Revoke a link.
    #[instrument(skip(self))]
    pub async fn revoke_share(&self, id: ShareId) -> AppResult<()> {
        self.ensure_open()?;
        self.facade.delete_share(id).await?;
        info!(share_id = %id, "Share link revoked");
        Ok(())
    }

    // ── Move destinations ──────────────────────────────────────────

    /// An aggregator that stops when this explorer is closed.
    pub fn aggregator(&self) -> FolderTreeAggregator {
        FolderTreeAggregator::with_cancellation(Arc::clone(&self.facade), self.cancel.child_token())
    }

    /// Folders `item` could be moved into. A folder's own subtree is left out.
    pub async fn move_destinations(&self, item: ItemRef) -> AppResult<Vec<FolderTreeNode>> {
        self.ensure_open()?;
        let exclude = match item {
            ItemRef::Folder(id) => Some(id),
            ItemRef::File(_) => None,
        };
        self.aggregator().list_candidate_destinations(exclude).await
    }

    // ── Drag and drop ──────────────────────────────────────────────

    /// Start dragging `payload`.
    pub async fn begin_drag(&self, payload: DragPayload) {
        debug!(item = %payload.item(), "Drag started");
        self.state.write().await.drag = DragState {
            dragged_item: Some(payload),
            drag_over: None,
        };
    }

    /// The pointer entered `target`. Highlights it and returns `true` only
    /// when a drop there would move something.
    pub async fn drag_enter(&self, target: Option<FolderId>) -> bool {
        let mut state = self.state.write().await;
        let valid = state
            .drag
            .dragged_item
            .as_ref()
            .is_some_and(|payload| payload.rejection_for(target).is_none());
        state.drag.drag_over = valid.then(|| target.into());
        valid
    }

    /// The pointer left the highlighted target.
    pub async fn drag_leave(&self) {
        self.state.write().await.drag.drag_over = None;
    }

    /// Drop the dragged item on `target`.
    ///
    /// The drag is cleared first, whatever happens next. An invalid drop is
    /// a no-op that sends nothing.
    pub async fn drop(&self, target: Option<FolderId>) -> AppResult<DropOutcome> {
        let dragged = std::mem::take(&mut self.state.write().await.drag).dragged_item;
        let Some(payload) = dragged else {
            return Ok(DropOutcome::NoDrag);
        };
        if let Some(reason) = payload.rejection_for(target) {
            debug!(item = %payload.item(), %reason, "Drop ignored");
            return Ok(DropOutcome::Rejected(reason));
        }
        let item = payload.item();
        self.move_item(item, target).await?;
        Ok(DropOutcome::Moved(item))
    }

    /// The drag ended without a drop.
    pub async fn end_drag(&self) {
        self.state.write().await.drag = DragState::default();
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    /// Discard the view. In-flight fetches finish as no-ops and later calls
    /// fail with `Cancelled`.
    pub async fn close(&self) {
        self.cancel.cancel();
        let mut state = self.state.write().await;
        let generation = state.generation + 1;
        *state = ExplorerState {
            generation,
            ..ExplorerState::default()
        };
        info!("Explorer closed");
    }
}

#[cfg(test)]
mod tests {
    use cloudbox_client::{FacadeCall, FacadeOp, MemoryFacade};
    use cloudbox_core::ErrorKind;

    use super::*;

    fn explorer(facade: &Arc<MemoryFacade>) -> Explorer {
        Explorer::new(facade.clone(), ExplorerConfig::default())
    }

    #[tokio::test]
    async fn test_navigate_root_then_folder() {
        let facade = Arc::new(MemoryFacade::new());
        let docs = facade.seed_folder("Docs", None);
        let sub = facade.seed_folder("Sub", Some(docs));
        facade.seed_file("a.txt", 3, Some("text/plain"), Some(sub));

        let explorer = explorer(&facade);
        assert_eq!(explorer.status().await, ExplorerStatus::Idle);

        let outcome = explorer.navigate_to(None).await.unwrap();
        assert_eq!(outcome, NavigationOutcome::Applied);
        let ctx = explorer.context().await;
        assert_eq!(ctx.folders.len(), 1);
        assert_eq!(ctx.breadcrumbs, vec![Breadcrumb::root()]);

        explorer.navigate_to(Some(sub)).await.unwrap();
        let snap = explorer.snapshot().await;
        assert_eq!(snap.status, ExplorerStatus::Ready);
        assert_eq!(snap.context.current_folder_id(), Some(sub));
        assert_eq!(
            snap.context
                .breadcrumbs
                .iter()
                .map(|b| b.name.as_str())
                .collect::<Vec<_>>(),
            vec!["My files", "Docs", "Sub"]
        );
        assert_eq!(snap.context.files.len(), 1);
        assert!(snap.context.is_consistent());
    }

    #[tokio::test]
    async fn test_failed_navigation_keeps_last_good_context() {
        let facade = Arc::new(MemoryFacade::new());
        facade.seed_folder("Docs", None);
        let explorer = explorer(&facade);
        explorer.navigate_to(None).await.unwrap();
        let before = explorer.context().await;

        facade.fail_next(FacadeOp::ListFiles, AppError::network("offline"));
        let err = explorer.navigate_to(None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);

        let snap = explorer.snapshot().await;
        assert_eq!(snap.status, ExplorerStatus::Error("offline".into()));
        assert_eq!(snap.context, before);

        assert_eq!(explorer.retry().await.unwrap(), NavigationOutcome::Applied);
        assert_eq!(explorer.status().await, ExplorerStatus::Ready);
    }

    #[tokio::test]
    async fn test_navigate_to_missing_folder_is_error() {
        let facade = Arc::new(MemoryFacade::new());
        let explorer = explorer(&facade);
        let err = explorer.navigate_to(Some(FolderId(99))).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(explorer.status().await.error().is_some());
    }

    #[tokio::test]
    async fn test_invalid_name_sends_nothing() {
        let facade = Arc::new(MemoryFacade::new());
        let explorer = explorer(&facade);
        explorer.navigate_to(None).await.unwrap();
        facade.clear_calls();

        let err = explorer.create_folder("a/b", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let err = explorer
            .rename_item(ItemRef::Folder(FolderId(1)), "CON")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(facade.calls().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_mutation_refreshes() {
        let facade = Arc::new(MemoryFacade::new());
        let explorer = explorer(&facade);
        explorer.navigate_to(None).await.unwrap();
        facade.clear_calls();

        let err = explorer
            .delete_item(ItemRef::File(FileId(42)), false)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(facade.calls().contains(&FacadeCall::ListFiles(None)));
    }

    #[tokio::test]
    async fn test_upload_size_limit() {
        let facade = Arc::new(MemoryFacade::new());
        let config = ExplorerConfig {
            max_upload_bytes: 4,
            ..ExplorerConfig::default()
        };
        let explorer = Explorer::new(facade.clone(), config);

        let err = explorer
            .upload_file(FileUpload {
                name: "big.bin".into(),
                bytes: vec![0; 5],
                mime_type: None,
                folder_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(facade.mutation_count(), 0);

        let receipt = explorer
            .upload_file(FileUpload {
                name: "ok.bin".into(),
                bytes: vec![0; 4],
                mime_type: None,
                folder_id: None,
            })
            .await
            .unwrap();
        assert_eq!(receipt.size, 4);
        assert_eq!(explorer.context().await.files.len(), 1);
    }

    #[tokio::test]
    async fn test_drag_enter_highlights_only_valid_targets() {
        let facade = Arc::new(MemoryFacade::new());
        let explorer = explorer(&facade);
        let payload = DragPayload {
            id: 5,
            name: "X".into(),
            is_folder: true,
            origin_folder_id: None,
        };

        assert!(!explorer.drag_enter(Some(FolderId(6))).await);

        explorer.begin_drag(payload).await;
        assert!(!explorer.drag_enter(Some(FolderId(5))).await);
        assert!(!explorer.drag_enter(None).await);
        assert!(explorer.drag_enter(Some(FolderId(6))).await);
        assert_eq!(
            explorer.snapshot().await.drag.drag_over,
            Some(drag::DropTarget::Folder(FolderId(6)))
        );

        explorer.drag_leave().await;
        let drag = explorer.snapshot().await.drag;
        assert!(drag.is_active());
        assert_eq!(drag.drag_over, None);

        explorer.end_drag().await;
        assert!(!explorer.snapshot().await.drag.is_active());
    }

    #[tokio::test]
    async fn test_drop_without_drag() {
        let facade = Arc::new(MemoryFacade::new());
        let explorer = explorer(&facade);
        assert_eq!(explorer.drop(None).await.unwrap(), DropOutcome::NoDrag);
    }

    #[tokio::test]
    async fn test_closed_explorer_rejects_work() {
        let facade = Arc::new(MemoryFacade::new());
        let explorer = explorer(&facade);
        explorer.close().await;

        assert_eq!(
            explorer.navigate_to(None).await.unwrap(),
            NavigationOutcome::Cancelled
        );
        let err = explorer.create_folder("Reports", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cancelled);
        assert!(facade.calls().is_empty());
    }
}
