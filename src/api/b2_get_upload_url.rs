use crate::api::request::post_json;
use crate::api::B2Auth;
use crate::Error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
struct GetUploadUrlBody<'a> {
    bucket_id: &'a str,
}

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Authorization and upload url
/// Needed for b2_upload_file
///
/// The url points at a single storage pod, if that pod is busy or gone you need a new one
pub struct UploadAuth {
    pub bucket_id: String,
    pub upload_url: String,
    pub authorization_token: String,
}

/// <https://www.backblaze.com/b2/docs/b2_get_upload_url.html>
pub async fn b2_get_upload_url<T: AsRef<str>>(
    client: &Client,
    auth: &B2Auth,
    bucket_id: T,
) -> Result<UploadAuth, Error> {
    post_json(
        client,
        &auth.api_url_for("b2_get_upload_url"),
        &auth.authorization_token,
        &GetUploadUrlBody {
            bucket_id: bucket_id.as_ref(),
        },
    )
    .await
}
