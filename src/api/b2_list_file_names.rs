use crate::api::request::post_json;
use crate::api::{B2Auth, B2FileInfo};
use crate::Error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ListFileNamesBody<'a> {
    bucket_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_file_name: Option<&'a str>,
    max_file_count: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Contains up to `max_file_count` files and potentially where to continue from with [b2_list_file_names]
pub struct ListFilesResult {
    #[serde(default)]
    pub files: Vec<B2FileInfo>,
    pub next_file_name: Option<String>,
}

/// <https://www.backblaze.com/b2/docs/b2_list_file_names.html>
///
/// Note billing behavior regarding 'max_file_count' \
/// Leaving 'start_file_name' as None will go from the first file \
/// May return a 'next_file_name' which can be used to continue from where the previous call ended
pub async fn b2_list_file_names<T: AsRef<str>>(
    client: &Client,
    auth: &B2Auth,
    bucket_id: T,
    start_file_name: Option<&str>,
    max_file_count: u32,
) -> Result<ListFilesResult, Error> {
    let body = ListFileNamesBody {
        bucket_id: bucket_id.as_ref(),
        start_file_name,
        max_file_count,
    };

    post_json(
        client,
        &auth.api_url_for("b2_list_file_names"),
        &auth.authorization_token,
        &body,
    )
    .await
}
