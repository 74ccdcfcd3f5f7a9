use crate::api::request::post_json;
use crate::api::{B2Auth, B2FileInfo};
use crate::Error;
use reqwest::Client;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
struct StartLargeFileBody<'a> {
    bucket_id: &'a str,
    file_name: &'a str,
    content_type: &'a str,
}

/// <https://www.backblaze.com/b2/docs/b2_start_large_file.html>
///
/// Returns the unfinished file, its `file_id` is what the other large file calls need \
/// If 'content_type' is None, "b2/x-auto" is used
pub async fn b2_start_large_file<T: AsRef<str>, Q: AsRef<str>>(
    client: &Client,
    auth: &B2Auth,
    bucket_id: T,
    file_name: Q,
    content_type: Option<&str>,
) -> Result<B2FileInfo, Error> {
    post_json(
        client,
        &auth.api_url_for("b2_start_large_file"),
        &auth.authorization_token,
        &StartLargeFileBody {
            bucket_id: bucket_id.as_ref(),
            file_name: file_name.as_ref(),
            content_type: content_type.unwrap_or("b2/x-auto"),
        },
    )
    .await
}
