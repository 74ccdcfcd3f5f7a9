use crate::api::request::post_json;
use crate::api::B2Auth;
use crate::Error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
struct CancelLargeFileBody<'a> {
    file_id: &'a str,
}

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Result object from [b2_cancel_large_file]
pub struct CancelLargeFileResult {
    pub file_id: String,
    pub account_id: String,
    pub bucket_id: String,
    pub file_name: String,
}

/// <https://www.backblaze.com/b2/docs/b2_cancel_large_file.html>
///
/// Deletes the parts uploaded so far
pub async fn b2_cancel_large_file<T: AsRef<str>>(
    client: &Client,
    auth: &B2Auth,
    file_id: T,
) -> Result<CancelLargeFileResult, Error> {
    post_json(
        client,
        &auth.api_url_for("b2_cancel_large_file"),
        &auth.authorization_token,
        &CancelLargeFileBody {
            file_id: file_id.as_ref(),
        },
    )
    .await
}
