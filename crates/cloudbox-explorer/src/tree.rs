//! Move-destination discovery: a pre-order walk of the folder hierarchy.

use std::collections::HashSet;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use cloudbox_client::RemoteFacade;
use cloudbox_core::error::AppError;
use cloudbox_core::result::AppResult;
use cloudbox_core::types::FolderId;
use cloudbox_entity::{FolderEntry, FolderTreeNode};

/// Lists every folder reachable from the root as a flat, depth-annotated
/// sequence. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct FolderTreeAggregator {
    facade: Arc<dyn RemoteFacade>,
    cancel: CancellationToken,
}

impl FolderTreeAggregator {
    /// Creates an aggregator with its own cancellation token.
    pub fn new(facade: Arc<dyn RemoteFacade>) -> Self {
        Self::with_cancellation(facade, CancellationToken::new())
    }

    /// Creates an aggregator that stops when `cancel` fires.
    pub fn with_cancellation(facade: Arc<dyn RemoteFacade>, cancel: CancellationToken) -> Self {
        Self { facade, cancel }
    }

    /// Token that aborts an in-flight walk.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Every folder a selection could be moved into, parents before their
    /// children.
    ///
    /// When `exclude` is set, that folder and its whole subtree are skipped.
    /// Any failed listing aborts the walk; a partial tree is never returned.
    #[instrument(skip(self))]
    pub async fn list_candidate_destinations(
        &self,
        exclude: Option<FolderId>,
    ) -> AppResult<Vec<FolderTreeNode>> {
        let mut nodes = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<(FolderEntry, usize)> = Vec::new();

        self.push_children(&mut stack, None, 0, exclude).await?;

        while let Some((folder, depth)) = stack.pop() {
            if !seen.insert(folder.id) {
                return Err(AppError::conflict(format!(
                    "Folder {} appears twice in the hierarchy",
                    folder.id
                )));
            }
            let id = folder.id;
            nodes.push(FolderTreeNode { folder, depth });
            self.push_children(&mut stack, Some(id), depth + 1, exclude)
                .await?;
        }

        debug!(count = nodes.len(), "Folder tree collected");
        Ok(nodes)
    }

    /// Push the children of `parent` so that the first child is popped first.
    async fn push_children(
        &self,
        stack: &mut Vec<(FolderEntry, usize)>,
        parent: Option<FolderId>,
        depth: usize,
        exclude: Option<FolderId>,
    ) -> AppResult<()> {
        let children = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                return Err(AppError::cancelled("Folder tree walk cancelled"));
            }
            listed = self.facade.list_folders(parent) => listed?,
        };
        stack.extend(
            children
                .into_iter()
                .rev()
                .filter(|child| Some(child.id) != exclude)
                .map(|child| (child, depth)),
        );
        Ok(())
    }
}
