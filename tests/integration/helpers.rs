//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use cloudbox_client::MemoryFacade;
use cloudbox_core::config::explorer::ExplorerConfig;
use cloudbox_core::types::{FileId, FolderId};
use cloudbox_explorer::Explorer;

/// A seeded in-memory account and an explorer over it.
///
/// ```text
/// /
/// ├── Documents/
/// │   ├── Work/
/// │   │   └── Archive/
/// │   └── report.pdf
/// ├── Photos/
/// │   └── beach.jpg
/// └── notes.txt
/// ```
pub struct TestAccount {
    pub facade: Arc<MemoryFacade>,
    pub explorer: Explorer,
    pub documents: FolderId,
    pub work: FolderId,
    pub archive: FolderId,
    pub photos: FolderId,
    pub report: FileId,
    pub beach: FileId,
    pub notes: FileId,
}

impl TestAccount {
    /// Seed the account with default explorer settings.
    pub fn new() -> Self {
        Self::with_config(ExplorerConfig::default())
    }

    /// Seed the account with custom explorer settings.
    pub fn with_config(config: ExplorerConfig) -> Self {
        let facade = Arc::new(MemoryFacade::new());

        let documents = facade.seed_folder("Documents", None);
        let work = facade.seed_folder("Work", Some(documents));
        let archive = facade.seed_folder("Archive", Some(work));
        let photos = facade.seed_folder("Photos", None);
        let report = facade.seed_file(
            "report.pdf",
            250_000,
            Some("application/pdf"),
            Some(documents),
        );
        let beach = facade.seed_file("beach.jpg", 3_500_000, Some("image/jpeg"), Some(photos));
        let notes = facade.seed_file("notes.txt", 1_024, Some("text/plain"), None);
        facade.clear_calls();

        let explorer = Explorer::new(facade.clone(), config);

        Self {
            facade,
            explorer,
            documents,
            work,
            archive,
            photos,
            report,
            beach,
            notes,
        }
    }

    /// Names of the folders and files currently displayed, folders first.
    pub async fn visible_names(&self) -> Vec<String> {
        let context = self.explorer.context().await;
        context
            .folders
            .iter()
            .map(|f| f.name.clone())
            .chain(context.files.iter().map(|f| f.name.clone()))
            .collect()
    }
}
