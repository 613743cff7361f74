//! Integration tests for the trash view.

mod helpers;

use cloudbox_client::{FacadeOp, RemoteFacade};
use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_entity::ItemRef;
use cloudbox_explorer::{EmptyTrashReport, ExplorerStatus, TrashReconciler};

#[tokio::test]
async fn test_trashed_folder_brings_its_contents() {
    let account = helpers::TestAccount::new();
    account
        .explorer
        .delete_item(ItemRef::Folder(account.documents), false)
        .await
        .unwrap();

    let trash = TrashReconciler::new(account.facade.clone());
    let listing = trash.load().await.unwrap();
    let folders: Vec<_> = listing.folders.iter().map(|f| f.id).collect();
    assert_eq!(folders, [account.documents, account.work, account.archive]);
    assert_eq!(listing.files.len(), 1);
    assert_eq!(listing.files[0].id, account.report);
    assert_eq!(trash.status().await, ExplorerStatus::Ready);
}

#[tokio::test]
async fn test_empty_trash_leaves_nothing_behind() {
    let account = helpers::TestAccount::new();
    account
        .facade
        .delete_folder(account.documents, false)
        .await
        .unwrap();
    account
        .facade
        .delete_file(account.notes, false)
        .await
        .unwrap();

    let trash = TrashReconciler::new(account.facade.clone());
    let report = trash.empty().await.unwrap();
    assert_eq!(
        report,
        EmptyTrashReport {
            deleted: 3,
            already_gone: 2,
        }
    );

    assert!(trash.listing().await.is_empty());
    assert!(trash.load().await.unwrap().is_empty());
    assert!(account.facade.folder(account.work).is_none());
    assert!(account.facade.file(account.report).is_none());
    assert!(account.facade.folder(account.photos).is_some());
}

#[tokio::test]
async fn test_empty_trash_stops_on_failure_and_reloads() {
    let account = helpers::TestAccount::new();
    account
        .facade
        .delete_file(account.notes, false)
        .await
        .unwrap();
    account
        .facade
        .delete_file(account.beach, false)
        .await
        .unwrap();

    let trash = TrashReconciler::new(account.facade.clone());
    account
        .facade
        .fail_next(FacadeOp::DeleteFile, AppError::network("offline"));

    let err = trash.empty().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(trash.listing().await.len(), 2);
}

#[tokio::test]
async fn test_restore_folder_brings_back_contents() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();
    account
        .explorer
        .delete_item(ItemRef::Folder(account.documents), false)
        .await
        .unwrap();
    assert_eq!(account.visible_names().await, ["Photos", "notes.txt"]);

    let trash = TrashReconciler::new(account.facade.clone());
    trash
        .restore(ItemRef::Folder(account.documents))
        .await
        .unwrap();
    assert!(trash.listing().await.is_empty());
    assert!(!account.facade.file(account.report).unwrap().is_deleted);

    account.explorer.refresh().await.unwrap();
    assert_eq!(
        account.visible_names().await,
        ["Documents", "Photos", "notes.txt"]
    );
}

#[tokio::test]
async fn test_restore_under_trashed_parent_lands_at_root() {
    let account = helpers::TestAccount::new();
    account
        .facade
        .delete_folder(account.documents, false)
        .await
        .unwrap();

    let trash = TrashReconciler::new(account.facade.clone());
    trash.load().await.unwrap();
    trash.restore(ItemRef::Folder(account.work)).await.unwrap();

    let work = account.facade.folder(account.work).unwrap();
    assert!(!work.is_deleted);
    assert_eq!(work.parent_id, None);

    let folders: Vec<_> = trash.listing().await.folders.iter().map(|f| f.id).collect();
    assert_eq!(folders, [account.documents]);
}

#[tokio::test]
async fn test_delete_permanently_single_item() {
    let account = helpers::TestAccount::new();
    account
        .facade
        .delete_file(account.beach, false)
        .await
        .unwrap();

    let trash = TrashReconciler::new(account.facade.clone());
    trash.load().await.unwrap();
    trash
        .delete_permanently(ItemRef::File(account.beach))
        .await
        .unwrap();

    assert!(account.facade.file(account.beach).is_none());
    assert!(trash.listing().await.is_empty());

    let err = trash
        .delete_permanently(ItemRef::File(account.beach))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
