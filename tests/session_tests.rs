use b2service::{B2Config, B2Service, Error};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};
mod common;
use common::*;

#[tokio::test]
async fn test_authorize_sends_basic_auth() {
    let server = mock_b2().await;
    let basic = format!("Basic {}", base64::encode(format!("{}:{}", ACCOUNT_ID, APPLICATION_KEY)));
    Mock::given(method("GET"))
        .and(path(api_path("b2_authorize_account")))
        .and(header("authorization", basic.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_json(&server, 5_000_000)))
        .expect(1)
        .mount(&server)
        .await;

    let mut service = service_for(&server);
    assert!(!service.is_authorized());
    service.authorize().await.unwrap();
    assert!(service.is_authorized());

    let auth = service.session().auth().unwrap();
    assert_eq!(auth.authorization_token, ACCOUNT_TOKEN);
    assert_eq!(auth.minimum_part_size, 5_000_000);
}

#[tokio::test]
async fn test_authorizes_once_across_operations() {
    let server = mock_b2().await;
    mount_authorize(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("b2_list_buckets")))
        .and(header("authorization", ACCOUNT_TOKEN))
        .and(body_partial_json(json!({ "accountId": ACCOUNT_ID })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "buckets": [] })))
        .expect(3)
        .mount(&server)
        .await;

    let mut service = service_for(&server);
    assert!(!service.bucket_exists("a").await.unwrap());
    assert!(!service.bucket_exists("b").await.unwrap());
    assert!(service.get_bucket_by_id("c").await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_authorization_is_retried_by_next_operation() {
    let server = mock_b2().await;
    Mock::given(method("GET"))
        .and(path(api_path("b2_authorize_account")))
        .respond_with(b2_error(401, "bad_auth_token"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_authorize(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("b2_list_buckets")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "buckets": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut service = service_for(&server);
    let err = service.bucket_exists(BUCKET_ID).await.unwrap_err();
    assert_eq!(err.b2_code(), Some("bad_auth_token"));
    assert!(!service.is_authorized());

    // The gap is still open, so this call authorizes again
    assert!(!service.bucket_exists(BUCKET_ID).await.unwrap());
    assert!(service.is_authorized());
}

#[tokio::test]
async fn test_get_bucket_by_id() {
    let server = mock_b2().await;
    mount_authorize(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("b2_list_buckets")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "buckets": [
                {
                    "accountId": ACCOUNT_ID,
                    "bucketId": "other",
                    "bucketName": "other-bucket",
                    "bucketType": "allPublic",
                    "bucketInfo": {},
                    "revision": 1
                },
                {
                    "accountId": ACCOUNT_ID,
                    "bucketId": BUCKET_ID,
                    "bucketName": BUCKET_NAME,
                    "bucketType": "allPrivate",
                    "bucketInfo": { "owner": "tests" },
                    "lifecycleRules": [],
                    "revision": 3
                }
            ]
        })))
        .mount(&server)
        .await;

    let mut service = service_for(&server);
    let bucket = service.get_bucket_by_id(BUCKET_ID).await.unwrap().unwrap();
    assert_eq!(bucket.bucket_name, BUCKET_NAME);
    assert_eq!(bucket.bucket_type, b2service::api::B2BucketType::AllPrivate);
    assert_eq!(bucket.revision, 3);
    assert!(service.bucket_exists("other").await.unwrap());
    assert!(!service.bucket_exists("missing").await.unwrap());
}

#[tokio::test]
async fn test_failed_bucket_listing_is_an_error() {
    let server = mock_b2().await;
    mount_authorize(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(api_path("b2_list_buckets")))
        .respond_with(b2_error(503, "service_unavailable"))
        .mount(&server)
        .await;

    let mut service = service_for(&server);
    let err = service.bucket_exists(BUCKET_ID).await.unwrap_err();
    assert!(matches!(err, Error::B2Error(ref e) if e.status == 503));
    // The session itself is still fine
    assert!(service.is_authorized());
}

#[tokio::test]
async fn test_timeout_is_applied() {
    let server = mock_b2().await;
    Mock::given(method("GET"))
        .and(path(api_path("b2_authorize_account")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(auth_json(&server, 5))
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = B2Config::new(ACCOUNT_ID, APPLICATION_KEY)
        .with_api_url(server.uri())
        .with_timeout(std::time::Duration::from_millis(50));
    let mut service = B2Service::new(config).unwrap();
    let err = service.authorize().await.unwrap_err();
    assert!(matches!(err, Error::ReqwestError(ref e) if e.is_timeout()));
}
