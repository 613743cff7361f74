//! Integration tests for explorer navigation and mutations.

mod helpers;

use cloudbox_client::{FacadeCall, FacadeOp, FileUpload, RemoteFacade};
use cloudbox_core::config::explorer::ExplorerConfig;
use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_entity::ItemRef;
use cloudbox_explorer::{ExplorerStatus, NavigationOutcome};

#[tokio::test]
async fn test_navigate_builds_breadcrumbs() {
    let account = helpers::TestAccount::new();

    let outcome = account
        .explorer
        .navigate_to(Some(account.archive))
        .await
        .unwrap();
    assert_eq!(outcome, NavigationOutcome::Applied);

    let snapshot = account.explorer.snapshot().await;
    assert_eq!(snapshot.status, ExplorerStatus::Ready);
    let trail: Vec<&str> = snapshot
        .context
        .breadcrumbs
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(trail, ["My files", "Documents", "Work", "Archive"]);
    assert_eq!(snapshot.context.breadcrumbs[0].id, None);
    assert_eq!(snapshot.context.current_folder_id(), Some(account.archive));
    assert!(snapshot.context.is_empty());
}

#[tokio::test]
async fn test_root_listing_is_consistent() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();

    let context = account.explorer.context().await;
    assert!(context.current_folder.is_none());
    assert!(context.is_consistent());
    assert_eq!(
        account.visible_names().await,
        ["Documents", "Photos", "notes.txt"]
    );
}

#[tokio::test]
async fn test_stale_navigation_is_discarded() {
    let account = helpers::TestAccount::new();
    let gate = account.facade.pause_listing(Some(account.documents));

    let mut slow = Box::pin(account.explorer.navigate_to(Some(account.documents)));
    assert!(futures::poll!(&mut slow).is_pending());

    let fast = account
        .explorer
        .navigate_to(Some(account.photos))
        .await
        .unwrap();
    assert_eq!(fast, NavigationOutcome::Applied);

    gate.release();
    assert_eq!(slow.await.unwrap(), NavigationOutcome::Superseded);

    let snapshot = account.explorer.snapshot().await;
    assert_eq!(snapshot.status, ExplorerStatus::Ready);
    assert_eq!(snapshot.context.current_folder_id(), Some(account.photos));
    assert_eq!(snapshot.target, Some(account.photos));
    assert_eq!(account.visible_names().await, ["beach.jpg"]);
}

#[tokio::test]
async fn test_failed_navigation_keeps_last_context_until_retry() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();
    let before = account.explorer.context().await;

    account
        .facade
        .fail_next(FacadeOp::ListFolders, AppError::network("connection reset"));
    let err = account
        .explorer
        .navigate_to(Some(account.documents))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(
        account.explorer.status().await,
        ExplorerStatus::Error("connection reset".to_string())
    );
    assert_eq!(account.explorer.context().await, before);

    let outcome = account.explorer.retry().await.unwrap();
    assert_eq!(outcome, NavigationOutcome::Applied);
    assert_eq!(
        account.explorer.context().await.current_folder_id(),
        Some(account.documents)
    );
    assert_eq!(account.visible_names().await, ["Work", "report.pdf"]);
}

#[tokio::test]
async fn test_missing_folder_fails_with_not_found() {
    let account = helpers::TestAccount::new();
    account
        .facade
        .delete_folder(account.photos, true)
        .await
        .unwrap();

    let err = account
        .explorer
        .navigate_to(Some(account.photos))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(account.explorer.status().await.error().is_some());
}

#[tokio::test]
async fn test_create_folder_at_root_refreshes_listing() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();

    let created = account
        .explorer
        .create_folder("Reports", None)
        .await
        .unwrap();
    assert_eq!(created.name, "Reports");
    assert!(created.parent_id.is_none());

    assert!(
        account
            .facade
            .calls()
            .contains(&FacadeCall::CreateFolder {
                name: "Reports".to_string(),
                parent: None,
            })
    );
    assert!(account.visible_names().await.contains(&"Reports".to_string()));
    assert_eq!(account.explorer.status().await, ExplorerStatus::Ready);
}

#[tokio::test]
async fn test_invalid_name_is_rejected_before_sending() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();

    for name in ["", "a/b", "  padded ", "CON"] {
        let err = account
            .explorer
            .create_folder(name, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation, "{name:?}");
    }
    assert_eq!(account.facade.mutation_count(), 0);
}

#[tokio::test]
async fn test_failed_mutation_leaves_context_unchanged() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();
    let before = account.explorer.context().await;

    let err = account
        .explorer
        .create_folder("photos", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(account.explorer.context().await, before);
    assert_eq!(account.explorer.status().await, ExplorerStatus::Ready);

    account
        .facade
        .fail_next(FacadeOp::RenameFile, AppError::network("timed out"));
    let err = account
        .explorer
        .rename_item(ItemRef::File(account.notes), "todo.txt")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(account.explorer.context().await, before);
    assert_eq!(account.explorer.status().await, ExplorerStatus::Ready);
}

#[tokio::test]
async fn test_rename_updates_listing() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();

    account
        .explorer
        .rename_item(ItemRef::Folder(account.photos), "Pictures")
        .await
        .unwrap();
    assert_eq!(
        account.visible_names().await,
        ["Documents", "Pictures", "notes.txt"]
    );
}

#[tokio::test]
async fn test_move_folder_into_own_subtree_is_rejected_locally() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();

    for target in [account.documents, account.archive] {
        let err = account
            .explorer
            .move_item(ItemRef::Folder(account.documents), Some(target))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }
    assert_eq!(account.facade.mutation_count(), 0);
    assert_eq!(
        account.facade.folder(account.documents).unwrap().parent_id,
        None
    );
}

#[tokio::test]
async fn test_move_file_to_root() {
    let account = helpers::TestAccount::new();
    account
        .explorer
        .navigate_to(Some(account.documents))
        .await
        .unwrap();

    account
        .explorer
        .move_item(ItemRef::File(account.report), None)
        .await
        .unwrap();
    assert_eq!(account.facade.file(account.report).unwrap().folder_id, None);
    assert_eq!(account.visible_names().await, ["Work"]);
}

#[tokio::test]
async fn test_move_refreshes_the_folder_it_left() {
    let account = helpers::TestAccount::new();

    account
        .explorer
        .reveal(ItemRef::File(account.report))
        .await
        .unwrap();
    assert_eq!(
        account.explorer.context().await.current_folder_id(),
        Some(account.documents)
    );
    account.facade.clear_calls();

    account
        .explorer
        .move_item(ItemRef::File(account.report), Some(account.photos))
        .await
        .unwrap();
    assert_eq!(
        account.facade.calls_of(FacadeOp::ListFiles),
        vec![FacadeCall::ListFiles(Some(account.documents))]
    );
    assert_eq!(account.visible_names().await, ["Work"]);

    account
        .explorer
        .reveal(ItemRef::Folder(account.work))
        .await
        .unwrap();
    assert_eq!(
        account.explorer.context().await.current_folder_id(),
        Some(account.documents)
    );
}

#[tokio::test]
async fn test_delete_then_restore_round_trip() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();

    account
        .explorer
        .delete_item(ItemRef::File(account.notes), false)
        .await
        .unwrap();
    assert_eq!(account.visible_names().await, ["Documents", "Photos"]);
    assert!(account.facade.file(account.notes).unwrap().is_deleted);

    account
        .explorer
        .restore_item(ItemRef::File(account.notes))
        .await
        .unwrap();
    assert_eq!(
        account.visible_names().await,
        ["Documents", "Photos", "notes.txt"]
    );
}

#[tokio::test]
async fn test_not_found_mutation_refreshes_view() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();
    account.facade.delete_file(account.notes, true).await.unwrap();
    account.facade.clear_calls();

    let err = account
        .explorer
        .rename_item(ItemRef::File(account.notes), "gone.txt")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(account.facade.calls_of(FacadeOp::ListFiles).len(), 1);
    assert_eq!(account.visible_names().await, ["Documents", "Photos"]);
}

#[tokio::test]
async fn test_close_cancels_in_flight_navigation() {
    let account = helpers::TestAccount::new();
    let gate = account.facade.pause_listing(Some(account.documents));

    let mut pending = Box::pin(account.explorer.navigate_to(Some(account.documents)));
    assert!(futures::poll!(&mut pending).is_pending());

    account.explorer.close().await;
    drop(gate);

    assert_eq!(pending.await.unwrap(), NavigationOutcome::Cancelled);
    assert!(account.explorer.is_closed());
    assert_eq!(account.explorer.status().await, ExplorerStatus::Idle);
    assert!(account.explorer.context().await.is_empty());

    let err = account
        .explorer
        .create_folder("Later", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Cancelled);
    assert_eq!(
        account.explorer.navigate_to(None).await.unwrap(),
        NavigationOutcome::Cancelled
    );
}

#[tokio::test]
async fn test_local_filter_never_fetches() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();
    account.facade.clear_calls();

    let hits = account.explorer.apply_search("PHO").await;
    assert_eq!(hits.folders.len(), 1);
    assert_eq!(hits.folders[0].id, account.photos);
    assert!(hits.files.is_empty());

    assert_eq!(account.explorer.context().await.len(), 3);
    assert_eq!(account.explorer.snapshot().await.search_term, "PHO");
    assert_eq!(account.explorer.filtered_items().await, hits);
    assert!(account.facade.calls().is_empty());

    assert_eq!(account.explorer.apply_search("").await.len(), 3);
}

#[tokio::test]
async fn test_remote_search_leaves_context() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();
    let before = account.explorer.context().await;

    let results = account.explorer.search_remote("report", None).await.unwrap();
    assert_eq!(results.files.len(), 1);
    assert_eq!(results.files[0].id, account.report);

    let scoped = account
        .explorer
        .search_remote("report", Some(account.photos))
        .await
        .unwrap();
    assert!(scoped.is_empty());

    assert!(account.explorer.search_remote("   ", None).await.unwrap().is_empty());
    assert_eq!(account.facade.calls_of(FacadeOp::Search).len(), 2);
    assert_eq!(account.explorer.context().await, before);
}

#[tokio::test]
async fn test_upload_checks_size_then_refreshes() {
    let account = helpers::TestAccount::with_config(ExplorerConfig {
        max_upload_bytes: 16,
        ..ExplorerConfig::default()
    });
    account.explorer.navigate_to(Some(account.photos)).await.unwrap();

    let err = account
        .explorer
        .upload_file(FileUpload {
            name: "big.bin".to_string(),
            bytes: vec![0; 17],
            mime_type: None,
            folder_id: Some(account.photos),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(account.facade.calls_of(FacadeOp::UploadFile).is_empty());

    let receipt = account
        .explorer
        .upload_file(FileUpload {
            name: "small.txt".to_string(),
            bytes: b"hello".to_vec(),
            mime_type: Some("text/plain".to_string()),
            folder_id: Some(account.photos),
        })
        .await
        .unwrap();
    assert_eq!(receipt.size, 5);
    assert_eq!(account.visible_names().await, ["beach.jpg", "small.txt"]);
}

#[tokio::test]
async fn test_move_destinations_skip_own_subtree() {
    let account = helpers::TestAccount::new();

    let for_file = account
        .explorer
        .move_destinations(ItemRef::File(account.notes))
        .await
        .unwrap();
    let listed: Vec<(String, usize)> = for_file
        .iter()
        .map(|n| (n.folder.name.clone(), n.depth))
        .collect();
    assert_eq!(
        listed,
        [
            ("Documents".to_string(), 0),
            ("Work".to_string(), 1),
            ("Archive".to_string(), 2),
            ("Photos".to_string(), 0),
        ]
    );

    let for_work = account
        .explorer
        .move_destinations(ItemRef::Folder(account.work))
        .await
        .unwrap();
    let ids: Vec<_> = for_work.iter().map(|n| n.folder.id).collect();
    assert_eq!(ids, [account.documents, account.photos]);
}

#[tokio::test]
async fn test_size_formatting_uses_configured_precision() {
    let account = helpers::TestAccount::with_config(ExplorerConfig {
        size_decimals: 1,
        ..ExplorerConfig::default()
    });
    assert_eq!(account.explorer.format_size(0), "0 Octets");
    assert_eq!(account.explorer.format_size(1536), "1.5 Ko");
}
