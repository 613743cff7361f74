//! Integration tests for drag-and-drop moves.

mod helpers;

use cloudbox_client::{FacadeCall, FacadeOp};
use cloudbox_core::error::ErrorKind;
use cloudbox_entity::ItemRef;
use cloudbox_explorer::{DragPayload, DropOutcome, DropRejection, DropTarget};

#[tokio::test]
async fn test_drop_on_origin_folder_is_a_no_op() {
    let account = helpers::TestAccount::new();
    account
        .explorer
        .navigate_to(Some(account.documents))
        .await
        .unwrap();
    let report = account.facade.file(account.report).unwrap();

    account
        .explorer
        .begin_drag(DragPayload::for_file(&report))
        .await;
    assert!(!account.explorer.drag_enter(Some(account.documents)).await);
    assert_eq!(account.explorer.snapshot().await.drag.drag_over, None);

    let outcome = account
        .explorer
        .drop(Some(account.documents))
        .await
        .unwrap();
    assert_eq!(outcome, DropOutcome::Rejected(DropRejection::AlreadyThere));
    assert!(account.facade.calls_of(FacadeOp::MoveFile).is_empty());
    assert!(!account.explorer.snapshot().await.drag.is_active());
}

#[tokio::test]
async fn test_drop_file_into_another_folder_moves_it_once() {
    let account = helpers::TestAccount::new();
    account
        .explorer
        .navigate_to(Some(account.documents))
        .await
        .unwrap();
    let report = account.facade.file(account.report).unwrap();

    account
        .explorer
        .begin_drag(DragPayload::for_file(&report))
        .await;
    assert!(account.explorer.drag_enter(Some(account.photos)).await);
    assert_eq!(
        account.explorer.snapshot().await.drag.drag_over,
        Some(DropTarget::Folder(account.photos))
    );

    let outcome = account.explorer.drop(Some(account.photos)).await.unwrap();
    assert_eq!(outcome, DropOutcome::Moved(ItemRef::File(account.report)));

    assert_eq!(
        account.facade.calls_of(FacadeOp::MoveFile),
        vec![FacadeCall::MoveFile {
            id: account.report,
            target: Some(account.photos),
        }]
    );
    assert_eq!(
        account.facade.file(account.report).unwrap().folder_id,
        Some(account.photos)
    );
    assert_eq!(account.visible_names().await, ["Work"]);
    assert!(!account.explorer.snapshot().await.drag.is_active());
}

#[tokio::test]
async fn test_drop_folder_on_itself_is_rejected() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();
    let photos = account.facade.folder(account.photos).unwrap();

    account
        .explorer
        .begin_drag(DragPayload::for_folder(&photos))
        .await;
    assert!(!account.explorer.drag_enter(Some(account.photos)).await);

    let outcome = account.explorer.drop(Some(account.photos)).await.unwrap();
    assert_eq!(outcome, DropOutcome::Rejected(DropRejection::OntoItself));
    assert_eq!(account.facade.mutation_count(), 0);
}

#[tokio::test]
async fn test_drop_folder_into_descendant_fails_without_moving() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();
    let documents = account.facade.folder(account.documents).unwrap();

    account
        .explorer
        .begin_drag(DragPayload::for_folder(&documents))
        .await;
    let err = account
        .explorer
        .drop(Some(account.archive))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(account.facade.calls_of(FacadeOp::MoveFolder).is_empty());
    assert!(!account.explorer.snapshot().await.drag.is_active());
}

#[tokio::test]
async fn test_drop_folder_on_root() {
    let account = helpers::TestAccount::new();
    account
        .explorer
        .navigate_to(Some(account.documents))
        .await
        .unwrap();
    let work = account.facade.folder(account.work).unwrap();

    account
        .explorer
        .begin_drag(DragPayload::for_folder(&work))
        .await;
    assert!(account.explorer.drag_enter(None).await);
    assert_eq!(
        account.explorer.snapshot().await.drag.drag_over,
        Some(DropTarget::Root)
    );

    let outcome = account.explorer.drop(None).await.unwrap();
    assert_eq!(outcome, DropOutcome::Moved(ItemRef::Folder(account.work)));
    assert_eq!(account.facade.folder(account.work).unwrap().parent_id, None);
    assert_eq!(account.visible_names().await, ["report.pdf"]);
}

#[tokio::test]
async fn test_untyped_payload_round_trip() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();

    let raw = format!(
        r#"{{"id": {}, "name": "notes.txt", "isFolder": false, "originFolderId": null}}"#,
        account.notes.get()
    );
    let payload = DragPayload::from_json(&raw).unwrap();
    account.explorer.begin_drag(payload).await;

    let outcome = account.explorer.drop(Some(account.photos)).await.unwrap();
    assert_eq!(outcome, DropOutcome::Moved(ItemRef::File(account.notes)));
    assert_eq!(account.visible_names().await, ["Documents", "Photos"]);
}

#[tokio::test]
async fn test_drop_without_drag() {
    let account = helpers::TestAccount::new();
    let outcome = account.explorer.drop(Some(account.photos)).await.unwrap();
    assert_eq!(outcome, DropOutcome::NoDrag);
    assert_eq!(account.facade.mutation_count(), 0);
}

#[tokio::test]
async fn test_leave_and_end_clear_drag_state() {
    let account = helpers::TestAccount::new();
    let beach = account.facade.file(account.beach).unwrap();

    account
        .explorer
        .begin_drag(DragPayload::for_file(&beach))
        .await;
    assert!(account.explorer.drag_enter(None).await);
    account.explorer.drag_leave().await;

    let drag = account.explorer.snapshot().await.drag;
    assert!(drag.is_active());
    assert_eq!(drag.drag_over, None);

    account.explorer.end_drag().await;
    assert!(!account.explorer.snapshot().await.drag.is_active());
    assert_eq!(account.facade.mutation_count(), 0);
}
