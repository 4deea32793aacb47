use memegen_asset_store::{request_url, submit, submit_and_sign, MockAssetStore, NO_FILE_SELECTED};
use memegen_common::error::MemeError;
use memegen_meme_model::{ContentIdentifier, SelectedAsset};

fn asset() -> SelectedAsset {
    SelectedAsset::new("cat.png", "image/png", vec![1, 2, 3]).unwrap()
}

#[tokio::test]
async fn submit_without_file_never_calls_store() {
    let store = MockAssetStore::new();
    let err = submit(&store, None).await.unwrap_err();
    match err {
        MemeError::Validation { message } => assert_eq!(message, NO_FILE_SELECTED),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.upload_calls(), 0);
}

#[tokio::test]
async fn request_url_without_cid_short_circuits() {
    let store = MockAssetStore::new();
    let err = request_url(&store, None, 300).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(store.sign_calls(), 0);
}

#[tokio::test]
async fn submit_and_sign_issues_exactly_one_signature() {
    let store = MockAssetStore::new().with_cid("abc123").with_gateway("gw");
    let asset = asset();
    let (cid, url) = submit_and_sign(&store, Some(&asset), 300).await.unwrap();

    assert_eq!(cid.as_str(), "abc123");
    assert!(url.as_str().starts_with("https://gw/files/abc123?"));
    assert_eq!(url.expires_in_secs, 300);
    assert_eq!(store.upload_calls(), 1);
    assert_eq!(store.sign_calls(), 1);
    assert_eq!(store.stored(&cid), Some(vec![1, 2, 3]));
}

#[tokio::test]
async fn upload_failure_skips_signing() {
    let store = MockAssetStore::new();
    store.set_fail_uploads(true);
    let asset = asset();
    let err = submit_and_sign(&store, Some(&asset), 300).await.unwrap_err();
    assert!(matches!(err, MemeError::Upload { .. }));
    assert_eq!(store.sign_calls(), 0);
}

#[tokio::test]
async fn signing_failure_is_reported_for_the_same_cid() {
    let store = MockAssetStore::new();
    store.set_fail_signing(true);
    let cid = ContentIdentifier::new("abc123").unwrap();

    let err = request_url(&store, Some(&cid), 300).await.unwrap_err();
    assert!(matches!(err, MemeError::SignedUrl { .. }));

    store.set_fail_signing(false);
    request_url(&store, Some(&cid), 300).await.unwrap();
    assert_eq!(store.signed_for(), vec![cid.clone(), cid]);
}
