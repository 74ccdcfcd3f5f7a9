#![allow(dead_code)]

use b2service::{B2Config, B2Service};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCOUNT_ID: &str = "acc123";
pub const APPLICATION_KEY: &str = "K001secret";
pub const ACCOUNT_TOKEN: &str = "account_token";
pub const BUCKET_ID: &str = "bucket1";
pub const BUCKET_NAME: &str = "my-bucket";

/// A mock B2 that serves the api, upload and download hosts all at once
pub async fn mock_b2() -> MockServer {
    MockServer::start().await
}

pub fn service_for(server: &MockServer) -> B2Service {
    let config = B2Config::new(ACCOUNT_ID, APPLICATION_KEY).with_api_url(server.uri());
    B2Service::new(config).unwrap()
}

pub fn api_path(call: &str) -> String {
    format!("/b2api/v1/{}", call)
}

pub fn auth_json(server: &MockServer, minimum_part_size: u64) -> Value {
    auth_json_with_absolute(server, minimum_part_size, minimum_part_size)
}

pub fn auth_json_with_absolute(
    server: &MockServer,
    minimum_part_size: u64,
    absolute_minimum_part_size: u64,
) -> Value {
    json!({
        "accountId": ACCOUNT_ID,
        "authorizationToken": ACCOUNT_TOKEN,
        "apiUrl": server.uri(),
        "downloadUrl": server.uri(),
        "minimumPartSize": minimum_part_size,
        "absoluteMinimumPartSize": absolute_minimum_part_size,
        "recommendedPartSize": minimum_part_size,
    })
}

/// Authorization that must happen exactly 'times' times during the test
pub async fn mount_authorize(server: &MockServer, times: u64) {
    mount_authorize_with_part_size(server, times, 100_000_000).await;
}

pub async fn mount_authorize_with_part_size(server: &MockServer, times: u64, part_size: u64) {
    mount_authorize_with_part_sizes(server, times, part_size, part_size).await;
}

pub async fn mount_authorize_with_part_sizes(
    server: &MockServer,
    times: u64,
    minimum_part_size: u64,
    absolute_minimum_part_size: u64,
) {
    let body = auth_json_with_absolute(server, minimum_part_size, absolute_minimum_part_size);
    Mock::given(method("GET"))
        .and(path(api_path("b2_authorize_account")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

pub fn b2_error(status: u16, code: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "status": status,
        "code": code,
        "message": format!("mocked {}", code),
    }))
}

pub fn file_json(name: &str, id: &str) -> Value {
    json!({
        "accountId": ACCOUNT_ID,
        "action": "upload",
        "bucketId": BUCKET_ID,
        "contentLength": 5,
        "contentSha1": "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d",
        "contentType": "text/plain",
        "fileId": id,
        "fileInfo": {},
        "fileName": name,
        "uploadTimestamp": 1_600_000_000_000u64,
    })
}

pub fn upload_url_json(server: &MockServer, pod: &str, token: &str) -> Value {
    json!({
        "bucketId": BUCKET_ID,
        "uploadUrl": format!("{}/upload/{}", server.uri(), pod),
        "authorizationToken": token,
    })
}
