use crate::api::request::post_json;
use crate::api::{B2Auth, B2FileInfo};
use crate::Error;
use reqwest::Client;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
struct FinishLargeFileBody<'a> {
    file_id: &'a str,
    part_sha1_array: &'a [String],
}

/// <https://www.backblaze.com/b2/docs/b2_finish_large_file.html>
///
/// 'part_sha1_array' holds the sha1 of every part, ordered by part number
pub async fn b2_finish_large_file<T: AsRef<str>>(
    client: &Client,
    auth: &B2Auth,
    file_id: T,
    part_sha1_array: &[String],
) -> Result<B2FileInfo, Error> {
    post_json(
        client,
        &auth.api_url_for("b2_finish_large_file"),
        &auth.authorization_token,
        &FinishLargeFileBody {
            file_id: file_id.as_ref(),
            part_sha1_array,
        },
    )
    .await
}
