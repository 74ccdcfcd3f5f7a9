use crate::api::request::post_json;
use crate::api::B2Auth;
use crate::Error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
struct GetUploadPartUrlBody<'a> {
    file_id: &'a str,
}

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Authorization and upload url for the parts of one large file
/// Needed for b2_upload_part
pub struct UploadPartAuth {
    pub file_id: String,
    pub upload_url: String,
    pub authorization_token: String,
}

/// <https://www.backblaze.com/b2/docs/b2_get_upload_part_url.html>
pub async fn b2_get_upload_part_url<T: AsRef<str>>(
    client: &Client,
    auth: &B2Auth,
    file_id: T,
) -> Result<UploadPartAuth, Error> {
    post_json(
        client,
        &auth.api_url_for("b2_get_upload_part_url"),
        &auth.authorization_token,
        &GetUploadPartUrlBody {
            file_id: file_id.as_ref(),
        },
    )
    .await
}
