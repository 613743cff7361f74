//! Integration tests for public share links.

mod helpers;

use chrono::{Duration, Utc};

use cloudbox_client::{FacadeOp, FileUpload, RemoteFacade};
use cloudbox_core::config::explorer::ExplorerConfig;
use cloudbox_core::error::ErrorKind;
use cloudbox_core::types::{FileId, ShareId};

#[tokio::test]
async fn test_create_list_and_revoke_share() {
    let account = helpers::TestAccount::new();
    let expires_at = Utc::now() + Duration::days(7);

    let link = account
        .explorer
        .create_share_link(account.report, Some(expires_at))
        .await
        .unwrap();
    assert_eq!(link.file_id, account.report);
    assert_eq!(link.expires_at, Some(expires_at));
    assert!(link.is_usable_at(Utc::now()));
    assert_eq!(
        account.explorer.share_url(&link),
        format!("http://localhost:5173/shared/{}", link.token)
    );

    let listed = account
        .explorer
        .list_shares(Some(account.report))
        .await
        .unwrap();
    assert_eq!(listed, vec![link.clone()]);
    assert!(
        account
            .explorer
            .list_shares(Some(account.beach))
            .await
            .unwrap()
            .is_empty()
    );

    account.explorer.revoke_share(link.id).await.unwrap();
    assert!(account.explorer.list_shares(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_share_creation_does_not_touch_the_view() {
    let account = helpers::TestAccount::new();
    account.explorer.navigate_to(None).await.unwrap();
    let before = account.explorer.snapshot().await;
    account.facade.clear_calls();

    account
        .explorer
        .create_share_link(account.notes, None)
        .await
        .unwrap();

    assert!(account.facade.calls_of(FacadeOp::ListFiles).is_empty());
    assert_eq!(account.explorer.snapshot().await, before);
}

#[tokio::test]
async fn test_past_expiry_is_rejected_locally() {
    let account = helpers::TestAccount::new();

    let err = account
        .explorer
        .create_share_link(account.report, Some(Utc::now() - Duration::hours(1)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(account.facade.calls_of(FacadeOp::CreateShare).is_empty());
}

#[tokio::test]
async fn test_share_missing_file_and_unknown_link() {
    let account = helpers::TestAccount::new();

    let err = account
        .explorer
        .create_share_link(FileId(999), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = account
        .explorer
        .revoke_share(ShareId(999))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_share_url_uses_configured_origin() {
    let account = helpers::TestAccount::with_config(ExplorerConfig {
        share_base_url: "https://box.example.org/".to_string(),
        ..ExplorerConfig::default()
    });

    let link = account
        .explorer
        .create_share_link(account.beach, None)
        .await
        .unwrap();
    assert_eq!(
        account.explorer.share_url(&link),
        format!("https://box.example.org/shared/{}", link.token)
    );
}

#[tokio::test]
async fn test_erasing_a_file_drops_its_links() {
    let account = helpers::TestAccount::new();
    account
        .explorer
        .create_share_link(account.notes, None)
        .await
        .unwrap();

    account
        .explorer
        .delete_item(cloudbox_entity::ItemRef::File(account.notes), true)
        .await
        .unwrap();
    assert!(account.explorer.list_shares(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_public_link_serves_the_file_until_revoked() {
    let account = helpers::TestAccount::new();
    let receipt = account
        .explorer
        .upload_file(FileUpload {
            name: "minutes.txt".to_string(),
            bytes: b"agenda".to_vec(),
            mime_type: Some("text/plain".to_string()),
            folder_id: None,
        })
        .await
        .unwrap();
    let link = account
        .explorer
        .create_share_link(receipt.id, None)
        .await
        .unwrap();

    let shared = account.facade.open_shared(&link.token).await.unwrap();
    assert_eq!(shared.id, receipt.id);
    assert_eq!(shared.download_name(), "minutes.txt");
    assert_eq!(shared.size, 6);
    let content = account.facade.download_shared(&link.token).await.unwrap();
    assert_eq!(content.bytes, b"agenda");

    account.explorer.revoke_share(link.id).await.unwrap();
    let err = account
        .facade
        .open_shared(&link.token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_public_link_to_trashed_file_is_not_found() {
    let account = helpers::TestAccount::new();
    let link = account
        .explorer
        .create_share_link(account.beach, None)
        .await
        .unwrap();

    account
        .explorer
        .delete_item(cloudbox_entity::ItemRef::File(account.beach), false)
        .await
        .unwrap();
    let err = account
        .facade
        .download_shared(&link.token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
