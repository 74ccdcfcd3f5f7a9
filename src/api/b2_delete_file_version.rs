use crate::api::request::post_json;
use crate::api::B2Auth;
use crate::Error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
struct DeleteFileVersionBody<'a> {
    file_name: &'a str,
    file_id: &'a str,
}

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[serde(rename_all = "camelCase")]
/// Result object from [b2_delete_file_version]
pub struct DeleteFileVersionResult {
    pub file_name: String,
    pub file_id: String,
}

/// <https://www.backblaze.com/b2/docs/b2_delete_file_version.html>
///
/// Deletes exactly one version, other versions with the same name are kept
pub async fn b2_delete_file_version<T: AsRef<str>, Q: AsRef<str>>(
    client: &Client,
    auth: &B2Auth,
    file_name: T,
    file_id: Q,
) -> Result<DeleteFileVersionResult, Error> {
    post_json(
        client,
        &auth.api_url_for("b2_delete_file_version"),
        &auth.authorization_token,
        &DeleteFileVersionBody {
            file_name: file_name.as_ref(),
            file_id: file_id.as_ref(),
        },
    )
    .await
}
